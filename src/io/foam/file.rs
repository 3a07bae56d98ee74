//! Shared base of the typed OpenFOAM list readers.
//!
//! [`FoamFile`] owns one stream, its parsed header, and the leading item
//! count. The per-class post-header step is selected by [`FoamFileKind`]
//! and runs exactly once inside [`FoamFile::open`]:
//!
//! ```text
//! FoamFile { ... }   // header, cached
//! 68                 // leading count
//! (                  // consumed; the data-start mark is taken after it
//!  ...items...
//! )
//! ```

use crate::io::foam::header::FoamHeader;
use crate::io::foam::tokenizer::{FoamTokenizer, StreamMark};
use crate::mesh_error::FoamMeshError;
use std::io::{BufRead, Seek};

/// The list classes this crate can read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoamFileKind {
    /// `class faceList` (`faces`).
    Faces,
    /// `class labelList` (`owner`, `neighbour`).
    Labels,
    /// `class vectorField` (`points`).
    Points,
}

impl FoamFileKind {
    /// The header `class` value this kind requires.
    pub fn class_name(self) -> &'static str {
        match self {
            FoamFileKind::Faces => "faceList",
            FoamFileKind::Labels => "labelList",
            FoamFileKind::Points => "vectorField",
        }
    }

    /// Validates the header, reads the leading count, consumes the opening
    /// `(` and re-marks the data start.
    fn after_read_header<R: BufRead + Seek>(
        self,
        header: &FoamHeader,
        tok: &mut FoamTokenizer<R>,
    ) -> Result<usize, FoamMeshError> {
        let format = header.get_or("format", "ascii");
        if format != "ascii" {
            return Err(FoamMeshError::UnsupportedFormat(format.to_string()));
        }
        header.expect_class(self.class_name())?;
        let count = tok.read_int::<usize>()?;
        tok.skip_to_char_after_comments(b'(')?;
        tok.mark_data_start()?;
        Ok(count)
    }
}

/// A header-validated OpenFOAM list file positioned on its first item.
#[derive(Debug)]
pub struct FoamFile<R> {
    kind: FoamFileKind,
    header: FoamHeader,
    count: usize,
    tok: FoamTokenizer<R>,
}

impl<R: BufRead + Seek> FoamFile<R> {
    /// Reads and validates the header of `reader` as a `kind` file.
    pub fn open(reader: R, kind: FoamFileKind) -> Result<Self, FoamMeshError> {
        let mut tok = FoamTokenizer::new(reader)?;
        tok.skip_whitespace_and_comments()?;
        let header = FoamHeader::read(&mut tok)?;
        tok.skip_whitespace_and_comments()?;
        tok.mark_data_start()?;
        let count = kind.after_read_header(&header, &mut tok)?;
        log::debug!(
            "opened {} `{}` with {count} items",
            kind.class_name(),
            header.get_or("object", "?"),
        );
        Ok(Self {
            kind,
            header,
            count,
            tok,
        })
    }

    #[inline]
    pub fn kind(&self) -> FoamFileKind {
        self.kind
    }

    #[inline]
    pub fn header(&self) -> &FoamHeader {
        &self.header
    }

    /// The count that precedes the data block.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn tokenizer(&mut self) -> &mut FoamTokenizer<R> {
        &mut self.tok
    }

    /// Moves back to the first item.
    pub fn rewind(&mut self) -> Result<(), FoamMeshError> {
        self.tok.rewind_to_data_start()
    }

    /// Current stream position.
    pub fn position(&mut self) -> Result<StreamMark, FoamMeshError> {
        self.tok.position()
    }

    /// Consumes the closing `)` of the data block and checks that nothing
    /// but whitespace and comments follows it.
    pub fn finish(&mut self) -> Result<(), FoamMeshError> {
        self.tok.skip_to_char_after_comments(b')')?;
        self.tok.expect_eof()
    }
}
