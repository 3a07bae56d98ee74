//! Where the four polyMesh files come from.

use crate::mesh_error::FoamMeshError;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::{Path, PathBuf};

/// The files that make up an OpenFOAM polyMesh, in opening order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolyMeshFile {
    Points,
    Faces,
    Owner,
    Neighbour,
}

impl PolyMeshFile {
    pub const ALL: [PolyMeshFile; 4] = [
        PolyMeshFile::Points,
        PolyMeshFile::Faces,
        PolyMeshFile::Owner,
        PolyMeshFile::Neighbour,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PolyMeshFile::Points => "points",
            PolyMeshFile::Faces => "faces",
            PolyMeshFile::Owner => "owner",
            PolyMeshFile::Neighbour => "neighbour",
        }
    }
}

/// Opens the raw streams of a case.
pub trait CaseSource {
    type Stream: BufRead + Seek;

    fn open(&self, file: PolyMeshFile) -> Result<Self::Stream, FoamMeshError>;
}

/// A polyMesh directory on disk.
#[derive(Clone, Debug)]
pub struct CaseDir {
    root: PathBuf,
}

impl CaseDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The working directory, which the host sets to the case folder.
    pub fn current() -> Self {
        Self::new(".")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CaseSource for CaseDir {
    type Stream = BufReader<File>;

    fn open(&self, file: PolyMeshFile) -> Result<Self::Stream, FoamMeshError> {
        let path = self.root.join(file.file_name());
        let handle = File::open(&path)
            .map_err(|err| FoamMeshError::Io(format!("{}: {err}", path.display())))?;
        Ok(BufReader::new(handle))
    }
}

/// A case held in memory, mostly for tests and embedding.
#[derive(Clone, Copy, Debug)]
pub struct InMemoryCase<'a> {
    pub points: &'a [u8],
    pub faces: &'a [u8],
    pub owner: &'a [u8],
    pub neighbour: &'a [u8],
}

impl<'a> InMemoryCase<'a> {
    pub fn new(points: &'a str, faces: &'a str, owner: &'a str, neighbour: &'a str) -> Self {
        Self {
            points: points.as_bytes(),
            faces: faces.as_bytes(),
            owner: owner.as_bytes(),
            neighbour: neighbour.as_bytes(),
        }
    }
}

impl<'a> CaseSource for InMemoryCase<'a> {
    type Stream = Cursor<&'a [u8]>;

    fn open(&self, file: PolyMeshFile) -> Result<Self::Stream, FoamMeshError> {
        let bytes = match file {
            PolyMeshFile::Points => self.points,
            PolyMeshFile::Faces => self.faces,
            PolyMeshFile::Owner => self.owner,
            PolyMeshFile::Neighbour => self.neighbour,
        };
        Ok(Cursor::new(bytes))
    }
}
