//! Byte-level tokenizer for OpenFOAM dictionary files.
//!
//! OpenFOAM text files are whitespace-insensitive and may carry `//` line
//! comments and `/* ... */` block comments between any two tokens, including
//! inside list data. [`FoamTokenizer`] wraps a buffered, seekable stream and
//! offers the small set of primitives every typed reader is built from.
//!
//! Lookahead is held in a two-byte peek buffer, so telling `//`, `/*` and a
//! lone `/` apart never requires seeking backwards.

use crate::mesh_error::FoamMeshError;
use num_traits::PrimInt;
use std::collections::VecDeque;
use std::io::{BufRead, Seek, SeekFrom};
use std::str::FromStr;

/// Bytes that always form a token on their own.
const DELIMITERS: &[u8] = b"{};";

/// A saved stream position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamMark {
    offset: u64,
    line: usize,
}

impl StreamMark {
    /// Byte offset from the start of the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// 1-based line number at the mark.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Tokenizer over a buffered, seekable OpenFOAM text stream.
#[derive(Debug)]
pub struct FoamTokenizer<R> {
    reader: R,
    lookahead: VecDeque<u8>,
    line: usize,
    data_start: StreamMark,
}

impl<R: BufRead + Seek> FoamTokenizer<R> {
    /// Wraps `reader`. The data-start mark initially points at the reader's
    /// current position.
    pub fn new(mut reader: R) -> Result<Self, FoamMeshError> {
        let offset = reader
            .stream_position()
            .map_err(|err| FoamMeshError::from_io(err, 1))?;
        Ok(Self {
            reader,
            lookahead: VecDeque::with_capacity(2),
            line: 1,
            data_start: StreamMark { offset, line: 1 },
        })
    }

    /// Current 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the byte `n` positions ahead without consuming anything.
    fn peek_nth(&mut self, n: usize) -> Result<Option<u8>, FoamMeshError> {
        while self.lookahead.len() <= n {
            let line = self.line;
            let buf = self
                .reader
                .fill_buf()
                .map_err(|err| FoamMeshError::from_io(err, line))?;
            let byte = match buf.first() {
                Some(&b) => b,
                None => return Ok(None),
            };
            self.reader.consume(1);
            self.lookahead.push_back(byte);
        }
        Ok(self.lookahead.get(n).copied())
    }

    /// Returns the next byte without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Result<Option<u8>, FoamMeshError> {
        self.peek_nth(0)
    }

    fn bump(&mut self) -> Result<Option<u8>, FoamMeshError> {
        self.peek_nth(0)?;
        let byte = self.lookahead.pop_front();
        if byte == Some(b'\n') {
            self.line += 1;
        }
        Ok(byte)
    }

    fn eof(&self, expected: &'static str) -> FoamMeshError {
        FoamMeshError::UnexpectedEof {
            line: self.line,
            expected,
        }
    }

    fn parse_error(&self, message: String) -> FoamMeshError {
        FoamMeshError::Parse {
            line: self.line,
            message,
        }
    }

    /// Advances past whitespace, `//` comments and `/* */` comments, leaving
    /// the cursor on the first significant byte (or at end of stream).
    ///
    /// Calling it twice in a row never moves the cursor the second time.
    pub fn skip_whitespace_and_comments(&mut self) -> Result<(), FoamMeshError> {
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump()?;
                }
                Some(b'/') => match self.peek_nth(1)? {
                    Some(b'/') => {
                        // a line comment may end the file without a newline
                        while let Some(b) = self.bump()? {
                            if b == b'\n' {
                                break;
                            }
                        }
                    }
                    Some(b'*') => {
                        let start = self.line;
                        self.bump()?;
                        self.bump()?;
                        self.skip_block_comment(start)?;
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Consumes the body of a block comment up to and including `*/`.
    fn skip_block_comment(&mut self, start: usize) -> Result<(), FoamMeshError> {
        loop {
            match self.bump()? {
                None => return Err(FoamMeshError::UnterminatedComment { line: start }),
                Some(b'*') => {
                    while self.peek()? == Some(b'*') {
                        self.bump()?;
                    }
                    if self.peek()? == Some(b'/') {
                        self.bump()?;
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Reads the next token: a maximal run of non-whitespace bytes.
    ///
    /// `{`, `}` and `;` terminate a token and are returned as one-byte
    /// tokens when they come first.
    pub fn read_token(&mut self) -> Result<String, FoamMeshError> {
        self.skip_whitespace_and_comments()?;
        let first = self.peek()?.ok_or_else(|| self.eof("a token"))?;
        if DELIMITERS.contains(&first) {
            self.bump()?;
            return Ok(char::from(first).to_string());
        }
        let mut bytes = Vec::new();
        while let Some(b) = self.peek()? {
            if b.is_ascii_whitespace() || DELIMITERS.contains(&b) {
                break;
            }
            bytes.push(b);
            self.bump()?;
        }
        self.text_from(bytes)
    }

    /// Parses a decimal integer with an optional sign.
    ///
    /// Unsigned targets reject a leading `-` through the parse itself.
    pub fn read_int<T>(&mut self) -> Result<T, FoamMeshError>
    where
        T: PrimInt + FromStr,
    {
        self.skip_whitespace_and_comments()?;
        let mut digits = String::new();
        if let Some(sign @ (b'-' | b'+')) = self.peek()? {
            digits.push(char::from(sign));
            self.bump()?;
        }
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            digits.push(char::from(b));
            self.bump()?;
        }
        if digits.trim_start_matches(['-', '+']).is_empty() {
            return match self.peek()? {
                None => Err(self.eof("an integer")),
                Some(b) => Err(self.parse_error(format!(
                    "expected an integer, found `{}`",
                    char::from(b).escape_default()
                ))),
            };
        }
        digits
            .parse::<T>()
            .map_err(|_| self.parse_error(format!("invalid integer `{digits}`")))
    }

    /// Advances past the next occurrence of `c`, whatever precedes it.
    pub fn skip_to_char(&mut self, c: u8) -> Result<(), FoamMeshError> {
        loop {
            match self.bump()? {
                Some(b) if b == c => return Ok(()),
                Some(_) => {}
                None => return Err(self.eof("a delimiter")),
            }
        }
    }

    /// Skips whitespace and comments, then consumes `c`, which must be the
    /// next significant byte.
    pub fn skip_to_char_after_comments(&mut self, c: u8) -> Result<(), FoamMeshError> {
        self.skip_whitespace_and_comments()?;
        match self.bump()? {
            Some(b) if b == c => Ok(()),
            Some(b) => Err(self.parse_error(format!(
                "expected `{}`, found `{}`",
                char::from(c),
                char::from(b).escape_default()
            ))),
            None => Err(self.eof("a delimiter")),
        }
    }

    /// Reads everything up to `c`. The delimiter is consumed but not returned.
    pub fn read_until(&mut self, c: u8) -> Result<String, FoamMeshError> {
        let mut bytes = Vec::new();
        loop {
            match self.bump()? {
                Some(b) if b == c => break,
                Some(b) => bytes.push(b),
                None => return Err(self.eof("a delimiter")),
            }
        }
        self.text_from(bytes)
    }

    /// Like [`read_until`](Self::read_until) with surrounding whitespace trimmed.
    pub fn read_until_trim(&mut self, c: u8) -> Result<String, FoamMeshError> {
        let text = self.read_until(c)?;
        Ok(text.trim().to_string())
    }

    /// Fails unless only whitespace and comments remain.
    pub fn expect_eof(&mut self) -> Result<(), FoamMeshError> {
        self.skip_whitespace_and_comments()?;
        match self.peek()? {
            None => Ok(()),
            Some(_) => Err(FoamMeshError::TrailingData { line: self.line }),
        }
    }

    /// Current position, accounting for buffered lookahead.
    pub fn position(&mut self) -> Result<StreamMark, FoamMeshError> {
        let line = self.line;
        let offset = self
            .reader
            .stream_position()
            .map_err(|err| FoamMeshError::from_io(err, line))?
            - self.lookahead.len() as u64;
        Ok(StreamMark {
            offset,
            line: self.line,
        })
    }

    /// Records the current position as the start of item data.
    pub fn mark_data_start(&mut self) -> Result<StreamMark, FoamMeshError> {
        self.data_start = self.position()?;
        Ok(self.data_start)
    }

    /// Returns the cursor to the last [`mark_data_start`](Self::mark_data_start).
    pub fn rewind_to_data_start(&mut self) -> Result<(), FoamMeshError> {
        let mark = self.data_start;
        self.reader
            .seek(SeekFrom::Start(mark.offset))
            .map_err(|err| FoamMeshError::from_io(err, mark.line))?;
        self.lookahead.clear();
        self.line = self.data_start.line;
        Ok(())
    }

    fn text_from(&self, bytes: Vec<u8>) -> Result<String, FoamMeshError> {
        String::from_utf8(bytes).map_err(|_| self.parse_error("invalid UTF-8 in token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn tok(text: &str) -> FoamTokenizer<Cursor<&[u8]>> {
        FoamTokenizer::new(Cursor::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn skips_line_and_block_comments() {
        let mut t = tok("  // line\n /* block\n ** with * stars **/ \t 42");
        t.skip_whitespace_and_comments().unwrap();
        assert_eq!(t.peek().unwrap(), Some(b'4'));
        assert_eq!(t.line(), 3);
        assert_eq!(t.read_int::<u32>().unwrap(), 42);
    }

    #[test]
    fn lone_slash_is_significant() {
        let mut t = tok("  /x");
        t.skip_whitespace_and_comments().unwrap();
        assert_eq!(t.read_token().unwrap(), "/x");
    }

    #[test]
    fn unterminated_block_comment_fails() {
        let mut t = tok("\n/* never closed *");
        assert_eq!(
            t.skip_whitespace_and_comments(),
            Err(FoamMeshError::UnterminatedComment { line: 2 })
        );
    }

    #[test]
    fn line_comment_may_end_the_stream() {
        let mut t = tok(") // trailing");
        t.skip_to_char_after_comments(b')').unwrap();
        t.expect_eof().unwrap();
    }

    #[test]
    fn tokens_split_on_delimiters() {
        let mut t = tok("FoamFile{version 2.0;}");
        assert_eq!(t.read_token().unwrap(), "FoamFile");
        assert_eq!(t.read_token().unwrap(), "{");
        assert_eq!(t.read_token().unwrap(), "version");
        assert_eq!(t.read_until_trim(b';').unwrap(), "2.0");
        assert_eq!(t.read_token().unwrap(), "}");
        assert!(matches!(
            t.read_token(),
            Err(FoamMeshError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn integers_respect_sign_and_target() {
        let mut t = tok("-7 +3 -1 x");
        assert_eq!(t.read_int::<i64>().unwrap(), -7);
        assert_eq!(t.read_int::<u32>().unwrap(), 3);
        assert!(matches!(
            t.read_int::<u32>(),
            Err(FoamMeshError::Parse { .. })
        ));
        assert!(matches!(
            t.read_int::<u32>(),
            Err(FoamMeshError::Parse { .. })
        ));
    }

    #[test]
    fn integer_stops_before_parenthesis() {
        let mut t = tok("4(3 9)");
        assert_eq!(t.read_int::<u32>().unwrap(), 4);
        t.skip_to_char_after_comments(b'(').unwrap();
        assert_eq!(t.read_int::<u32>().unwrap(), 3);
    }

    #[test]
    fn skip_to_char_requires_the_delimiter() {
        let mut t = tok(" /* c */ ( x");
        t.skip_to_char_after_comments(b'(').unwrap();
        assert!(matches!(
            t.skip_to_char_after_comments(b')'),
            Err(FoamMeshError::Parse { .. })
        ));
        let mut raw = tok("abc)def");
        raw.skip_to_char(b')').unwrap();
        assert_eq!(raw.read_token().unwrap(), "def");
        assert!(matches!(
            raw.skip_to_char(b')'),
            Err(FoamMeshError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn trailing_data_is_reported() {
        let mut t = tok("  /* ok */ \n junk");
        assert_eq!(t.expect_eof(), Err(FoamMeshError::TrailingData { line: 2 }));
    }

    #[test]
    fn rewind_restores_position_and_line() {
        let mut t = tok("header\n( 1\n2 3 )");
        t.skip_to_char(b'(').unwrap();
        let mark = t.mark_data_start().unwrap();
        assert_eq!(mark.offset(), 8);
        assert_eq!(mark.line(), 2);
        let first: Vec<u32> = (0..3).map(|_| t.read_int().unwrap()).collect();
        t.rewind_to_data_start().unwrap();
        assert_eq!(t.line(), 2);
        let again: Vec<u32> = (0..3).map(|_| t.read_int().unwrap()).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, again);
    }

    #[test]
    fn position_accounts_for_lookahead() {
        let mut t = tok("/a");
        t.skip_whitespace_and_comments().unwrap();
        assert_eq!(t.position().unwrap().offset(), 0);
    }

    /// A stream that fails with `UnexpectedEof` once `limit` bytes are read.
    struct Truncated {
        data: &'static [u8],
        pos: usize,
        limit: usize,
    }

    impl std::io::Read for Truncated {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = {
                let avail = self.fill_buf()?;
                let n = avail.len().min(buf.len());
                buf[..n].copy_from_slice(&avail[..n]);
                n
            };
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for Truncated {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            if self.pos >= self.limit {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "truncated",
                ));
            }
            Ok(&self.data[self.pos..self.limit])
        }

        fn consume(&mut self, amt: usize) {
            self.pos += amt;
        }
    }

    impl Seek for Truncated {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            match pos {
                SeekFrom::Start(p) => self.pos = p as usize,
                SeekFrom::Current(d) => self.pos = (self.pos as i64 + d) as usize,
                SeekFrom::End(_) => return Err(std::io::Error::other("unsupported")),
            }
            Ok(self.pos as u64)
        }
    }

    #[test]
    fn stream_errors_carry_the_current_line() {
        let mut t = FoamTokenizer::new(Truncated {
            data: b"1\n2\n3\n",
            pos: 0,
            limit: 4,
        })
        .unwrap();
        assert_eq!(t.read_int::<u32>().unwrap(), 1);
        assert_eq!(t.read_int::<u32>().unwrap(), 2);
        assert_eq!(
            t.read_int::<u32>(),
            Err(FoamMeshError::UnexpectedEof {
                line: 3,
                expected: "more data"
            })
        );
    }

    fn filler() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just(" ".to_string()),
                Just("\n".to_string()),
                Just("\t".to_string()),
                Just("// note\n".to_string()),
                Just("/* a * b **/".to_string()),
                Just("/**/".to_string()),
            ],
            0..8,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn skipping_is_idempotent(prefix in filler(), value in 0u32..100_000) {
            let text = format!("{prefix}{value}");
            let mut t = tok(&text);
            t.skip_whitespace_and_comments().unwrap();
            let first = t.position().unwrap();
            t.skip_whitespace_and_comments().unwrap();
            prop_assert_eq!(first, t.position().unwrap());
            prop_assert_eq!(t.read_int::<u32>().unwrap(), value);
        }
    }
}
