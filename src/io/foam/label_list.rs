//! Reader for `class labelList` files (`owner` and `neighbour`).

use crate::io::foam::file::{FoamFile, FoamFileKind};
use crate::io::foam::header::MeshNote;
use crate::mesh_error::FoamMeshError;
use std::io::{BufRead, Seek};

/// Streams unsigned labels. Owner and neighbour files share this reader;
/// which role a stream plays is up to the caller.
#[derive(Debug)]
pub struct LabelListFile<R> {
    file: FoamFile<R>,
}

impl<R: BufRead + Seek> LabelListFile<R> {
    pub fn open(reader: R) -> Result<Self, FoamMeshError> {
        Ok(Self {
            file: FoamFile::open(reader, FoamFileKind::Labels)?,
        })
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.file.count()
    }

    #[inline]
    pub fn read_next_label(&mut self) -> Result<u32, FoamMeshError> {
        self.file.tokenizer().read_int()
    }

    /// Mesh sizes from the header `note`, when present.
    pub fn note(&self) -> Option<MeshNote> {
        self.file.header().note()
    }

    pub fn rewind(&mut self) -> Result<(), FoamMeshError> {
        self.file.rewind()
    }

    pub fn finish(&mut self) -> Result<(), FoamMeshError> {
        self.file.finish()
    }

    pub fn file(&self) -> &FoamFile<R> {
        &self.file
    }
}
