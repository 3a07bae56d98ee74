//! The `FoamFile { ... }` header dictionary.
//!
//! Every OpenFOAM data file opens with a small dictionary:
//!
//! ```text
//! FoamFile
//! {
//!     version     2.0;
//!     format      ascii;
//!     class       faceList;
//!     location    "constant/polyMesh";
//!     object      faces;
//! }
//! ```
//!
//! [`FoamHeader`] caches those `key value;` pairs for lookup. Values are kept
//! raw apart from trimming, so quoted values keep their quotes.

use crate::io::foam::tokenizer::FoamTokenizer;
use crate::mesh_error::FoamMeshError;
use hashbrown::HashMap;
use std::io::{BufRead, Seek};

/// Keyword that opens the header block.
pub const HEADER_KEYWORD: &str = "FoamFile";

/// Cached header entries of one OpenFOAM file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoamHeader {
    values: HashMap<String, String>,
}

impl FoamHeader {
    /// Parses the header block and leaves the tokenizer just past its `}`.
    ///
    /// A repeated key keeps its last value.
    pub fn read<R: BufRead + Seek>(tok: &mut FoamTokenizer<R>) -> Result<Self, FoamMeshError> {
        let keyword = tok.read_token()?;
        if keyword != HEADER_KEYWORD {
            return Err(FoamMeshError::Parse {
                line: tok.line(),
                message: format!("expected `{HEADER_KEYWORD}`, found `{keyword}`"),
            });
        }
        tok.skip_to_char_after_comments(b'{')?;

        let mut values = HashMap::new();
        loop {
            let key = tok.read_token()?;
            match key.as_str() {
                "}" => break,
                "{" | ";" => {
                    return Err(FoamMeshError::Parse {
                        line: tok.line(),
                        message: format!("unexpected `{key}` in {HEADER_KEYWORD} header"),
                    });
                }
                _ => {
                    let value = tok.read_until_trim(b';')?;
                    values.insert(key, value);
                }
            }
        }
        Ok(Self { values })
    }

    /// Looks up a required entry.
    pub fn get(&self, key: &str) -> Result<&str, FoamMeshError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| FoamMeshError::MissingHeaderKey(key.to_string()))
    }

    /// Looks up an entry, falling back to `default` when it is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).map(String::as_str).unwrap_or(default)
    }

    /// True when `key` exists and equals `expected`.
    pub fn value_is(&self, key: &str, expected: &str) -> bool {
        self.values.get(key).is_some_and(|v| v == expected)
    }

    /// Checks the declared `class`. A mismatch means the wrong file was
    /// handed to a reader.
    pub fn expect_class(&self, expected: &'static str) -> Result<(), FoamMeshError> {
        let found = self.get("class")?;
        if found == expected {
            Ok(())
        } else {
            Err(FoamMeshError::ClassMismatch {
                expected,
                found: found.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses the `note` entry OpenFOAM writes into `owner` and `neighbour`.
    pub fn note(&self) -> Option<MeshNote> {
        self.values.get("note").map(|raw| MeshNote::parse(raw))
    }
}

/// Mesh sizes recorded in a header `note`, e.g.
/// `"nPoints:8  nCells:1  nFaces:6  nInternalFaces:0"`.
///
/// Unknown or malformed fields are left as `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshNote {
    pub n_points: Option<usize>,
    pub n_cells: Option<usize>,
    pub n_faces: Option<usize>,
    pub n_internal_faces: Option<usize>,
}

impl MeshNote {
    pub fn parse(raw: &str) -> Self {
        let mut note = MeshNote::default();
        for field in raw.trim_matches('"').split_whitespace() {
            let Some((key, value)) = field.split_once(':') else {
                continue;
            };
            let Ok(value) = value.parse::<usize>() else {
                continue;
            };
            match key {
                "nPoints" => note.n_points = Some(value),
                "nCells" => note.n_cells = Some(value),
                "nFaces" => note.n_faces = Some(value),
                "nInternalFaces" => note.n_internal_faces = Some(value),
                _ => {}
            }
        }
        note
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<(FoamHeader, String), FoamMeshError> {
        let mut tok = FoamTokenizer::new(Cursor::new(text.as_bytes()))?;
        let header = FoamHeader::read(&mut tok)?;
        let rest = tok.read_token().unwrap_or_default();
        Ok((header, rest))
    }

    const BANNER: &str = r#"/*--------------------------------*- C++ -*----------------------------------*\
  =========                 |
  \\      /  F ield         | OpenFOAM: The Open Source CFD Toolbox
   \\    /   O peration     | Website:  https://openfoam.org
\*---------------------------------------------------------------------------*/
FoamFile
{
    version     2.0;
    format      ascii;
    class       labelList;
    note        "nPoints:8 nCells:1 nFaces:6 nInternalFaces:0";
    location    "constant/polyMesh";
    object      owner;
}
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //

6
"#;

    #[test]
    fn reads_header_after_banner() {
        let (header, rest) = parse(BANNER).unwrap();
        assert_eq!(header.len(), 6);
        assert_eq!(header.get("class").unwrap(), "labelList");
        assert_eq!(header.get("location").unwrap(), "\"constant/polyMesh\"");
        assert!(header.value_is("format", "ascii"));
        assert!(!header.value_is("format", "binary"));
        assert_eq!(rest, "6");
    }

    #[test]
    fn missing_keys_use_default_or_fail() {
        let (header, _) = parse(BANNER).unwrap();
        assert_eq!(header.get_or("arch", "LSB;label=32"), "LSB;label=32");
        assert_eq!(
            header.get("arch"),
            Err(FoamMeshError::MissingHeaderKey("arch".into()))
        );
    }

    #[test]
    fn class_mismatch_is_reported() {
        let (header, _) = parse(BANNER).unwrap();
        header.expect_class("labelList").unwrap();
        assert_eq!(
            header.expect_class("faceList"),
            Err(FoamMeshError::ClassMismatch {
                expected: "faceList",
                found: "labelList".into(),
            })
        );
    }

    #[test]
    fn note_counts_are_parsed() {
        let (header, _) = parse(BANNER).unwrap();
        let note = header.note().unwrap();
        assert_eq!(note.n_points, Some(8));
        assert_eq!(note.n_cells, Some(1));
        assert_eq!(note.n_faces, Some(6));
        assert_eq!(note.n_internal_faces, Some(0));
        assert_eq!(MeshNote::parse("\"nCells:x other\""), MeshNote::default());
    }

    #[test]
    fn rejects_missing_keyword_and_unclosed_header() {
        assert!(matches!(
            parse("FoamFiles { class x; }"),
            Err(FoamMeshError::Parse { .. })
        ));
        assert!(matches!(
            parse("FoamFile { class labelList;"),
            Err(FoamMeshError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            parse("FoamFile { class labelList }"),
            Err(FoamMeshError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn last_repeated_key_wins() {
        let (header, _) = parse("FoamFile{class a; class b;}").unwrap();
        assert_eq!(header.get("class").unwrap(), "b");
        assert_eq!(header.len(), 1);
    }

    proptest! {
        #[test]
        fn lookup_returns_trimmed_value(
            entries in prop::collection::vec(("[a-z][a-zA-Z0-9]{0,8}", "[a-zA-Z0-9.\"/]{1,12}"), 1..6),
            pad in "[ \t]{0,3}",
        ) {
            let mut text = String::from("FoamFile\n{\n");
            for (k, v) in &entries {
                text.push_str(&format!("  {k}{pad} {v}{pad};\n"));
            }
            text.push('}');
            let (header, _) = parse(&text).unwrap();
            for (k, _) in &entries {
                let last = entries.iter().rev().find(|(key, _)| key == k).unwrap();
                prop_assert_eq!(header.get(k).unwrap(), last.1.as_str());
            }
        }
    }
}
