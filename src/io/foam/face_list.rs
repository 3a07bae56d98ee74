//! Reader for `class faceList` files (`constant/polyMesh/faces`).

use crate::io::foam::file::{FoamFile, FoamFileKind};
use crate::mesh_error::FoamMeshError;
use crate::topology::face::{FaceArity, FaceRecord};
use std::io::{BufRead, Seek};

/// Streams face records such as `4(3 9 10 0)` one at a time.
#[derive(Debug)]
pub struct FaceListFile<R> {
    file: FoamFile<R>,
}

impl<R: BufRead + Seek> FaceListFile<R> {
    pub fn open(reader: R) -> Result<Self, FoamMeshError> {
        Ok(Self {
            file: FoamFile::open(reader, FoamFileKind::Faces)?,
        })
    }

    /// Number of faces declared by the file.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.file.count()
    }

    /// Reads the next `n(i0 i1 ...)` entry.
    ///
    /// Indices are not checked against the point count here; only 3- and
    /// 4-vertex faces are accepted.
    pub fn read_next_face(&mut self) -> Result<FaceRecord, FoamMeshError> {
        let tok = self.file.tokenizer();
        let count = tok.read_int::<u32>()?;
        let arity = FaceArity::from_count(count).ok_or(FoamMeshError::UnsupportedFaceArity(count))?;
        tok.skip_to_char_after_comments(b'(')?;
        let mut index = [0u32; 4];
        let vertices = &mut index[..arity.len()];
        for slot in vertices.iter_mut() {
            *slot = tok.read_int()?;
        }
        tok.skip_to_char_after_comments(b')')?;
        FaceRecord::from_slice(vertices).ok_or(FoamMeshError::UnsupportedFaceArity(count))
    }

    /// Returns to the first face.
    pub fn rewind(&mut self) -> Result<(), FoamMeshError> {
        self.file.rewind()
    }

    /// Expects the closing `)` followed by end of file.
    pub fn finish(&mut self) -> Result<(), FoamMeshError> {
        self.file.finish()
    }

    pub fn file(&self) -> &FoamFile<R> {
        &self.file
    }
}
