//! Reader for `class vectorField` files (`constant/polyMesh/points`).

use crate::io::VertexSink;
use crate::io::foam::file::{FoamFile, FoamFileKind};
use crate::io::progress::{ImportProgress, run_step, tick};
use crate::mesh_error::FoamMeshError;
use itertools::Itertools;
use std::io::{BufRead, Seek};

/// Reads `(x y z)` triples straight into a [`VertexSink`].
#[derive(Debug)]
pub struct VectorFieldFile<R> {
    file: FoamFile<R>,
}

impl<R: BufRead + Seek> VectorFieldFile<R> {
    pub fn open(reader: R) -> Result<Self, FoamMeshError> {
        Ok(Self {
            file: FoamFile::open(reader, FoamFileKind::Points)?,
        })
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.file.count()
    }

    /// Loads every point into `sink`, ticking `progress` once per point.
    ///
    /// A file declaring zero points is rejected. After the last point the
    /// list must close with `)` and the file must end.
    pub fn read_all_points<S, P>(&mut self, sink: &mut S, progress: &mut P) -> Result<(), FoamMeshError>
    where
        S: VertexSink + ?Sized,
        P: ImportProgress + ?Sized,
    {
        let num_points = self.num_points();
        if num_points == 0 {
            return Err(FoamMeshError::EmptyPointList);
        }
        sink.allocate(num_points)?;
        run_step(progress, num_points, |progress| {
            for index in 0..num_points {
                let xyz = self.read_next_point()?;
                sink.set_xyz(index, xyz)?;
                tick(progress)?;
            }
            self.file.finish()
        })
    }

    /// Reads one `(x y z)` entry.
    pub fn read_next_point(&mut self) -> Result<[f64; 3], FoamMeshError> {
        let tok = self.file.tokenizer();
        tok.skip_to_char_after_comments(b'(')?;
        let line = tok.line();
        let text = tok.read_until(b')')?;
        parse_xyz(&text).ok_or_else(|| FoamMeshError::Parse {
            line,
            message: format!("expected three coordinates, found `({})`", text.trim()),
        })
    }

    pub fn rewind(&mut self) -> Result<(), FoamMeshError> {
        self.file.rewind()
    }

    pub fn file(&self) -> &FoamFile<R> {
        &self.file
    }
}

/// Parses exactly three whitespace-separated floats.
fn parse_xyz(text: &str) -> Option<[f64; 3]> {
    let (x, y, z) = text.split_whitespace().collect_tuple::<(&str, &str, &str)>()?;
    Some([x.parse().ok()?, y.parse().ok()?, z.parse().ok()?])
}
