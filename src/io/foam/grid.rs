//! Assembly of an OpenFOAM polyMesh into a host grid model.
//!
//! OpenFOAM and the grid model disagree on face orientation:
//!
//! ```text
//!                --- interior face normal --->
//!  OpenFOAM   cell[low index]       cell[high index]
//!  grid model cell[neighbour]       cell[owner]
//!
//!                --- boundary face normal --->
//!  OpenFOAM   cell[owner]           (exterior)
//!  grid model (exterior)            cell[owner]
//! ```
//!
//! Interior faces are fixed by swapping owner and neighbour when
//! `owner < neighbour`; the vertex order is left alone. Boundary faces have no
//! second cell to swap with, so their winding is reversed.
//!
//! The first `numNeighbourLabels` records of `faces` and `owner` are the
//! interior faces; the rest are boundary faces. That positional split is the
//! only interior/boundary marker the format has.

use crate::io::foam::case::{CaseSource, PolyMeshFile};
use crate::io::foam::face_list::FaceListFile;
use crate::io::foam::label_list::LabelListFile;
use crate::io::foam::vector_field::VectorFieldFile;
use crate::io::progress::{ImportProgress, run_step, tick};
use crate::io::{FaceAssembler, GridModel};
use crate::mesh_error::FoamMeshError;
use crate::topology::face::{AssembledFace, FaceRecord};
use crate::topology::poly_mesh::max_cells;
use std::io::{BufRead, Seek};

/// Major progress steps of one import: points, then faces.
pub const NUM_MAJOR_STEPS: usize = 2;

/// Progress of a [`FoamGridReader`].
///
/// States are reached in declaration order; any failure moves the reader to
/// [`AssemblyState::Failed`], from which it cannot be restarted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssemblyState {
    Unopened,
    FilesOpened,
    PointsLoaded,
    InteriorFacesAssembled,
    BoundaryFacesAssembled,
    Finalized,
    Failed,
}

impl AssemblyState {
    pub fn name(self) -> &'static str {
        match self {
            AssemblyState::Unopened => "Unopened",
            AssemblyState::FilesOpened => "FilesOpened",
            AssemblyState::PointsLoaded => "PointsLoaded",
            AssemblyState::InteriorFacesAssembled => "InteriorFacesAssembled",
            AssemblyState::BoundaryFacesAssembled => "BoundaryFacesAssembled",
            AssemblyState::Finalized => "Finalized",
            AssemblyState::Failed => "Failed",
        }
    }
}

/// Optional settings for polyMesh import.
#[derive(Debug, Default, Clone, Copy)]
pub struct FoamReadOptions {
    /// Fail when a header `note` disagrees with the list counts instead of
    /// logging a warning.
    pub strict_note: bool,
}

/// Relabels an interior face for the grid-model convention.
///
/// Returns `(owner, neighbour)` as they must be recorded. Equal labels are
/// passed through unchanged.
#[inline]
pub fn orient_interior(owner: u32, neighbour: u32) -> (u32, u32) {
    if owner < neighbour {
        (neighbour, owner)
    } else {
        (owner, neighbour)
    }
}

/// The four opened, header-checked readers.
struct OpenCase<R> {
    points: VectorFieldFile<R>,
    faces: FaceListFile<R>,
    owner: LabelListFile<R>,
    neighbour: LabelListFile<R>,
    /// `nCells` from the owner note, once it passed the plausibility check.
    cell_hint: Option<usize>,
}

/// Reads one polyMesh case into a [`GridModel`].
#[derive(Debug)]
pub struct FoamGridReader<S> {
    source: S,
    options: FoamReadOptions,
    state: AssemblyState,
    reached: AssemblyState,
    interior_faces: usize,
    boundary_faces: usize,
}

impl<S: CaseSource> FoamGridReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, FoamReadOptions::default())
    }

    pub fn with_options(source: S, options: FoamReadOptions) -> Self {
        Self {
            source,
            options,
            state: AssemblyState::Unopened,
            reached: AssemblyState::Unopened,
            interior_faces: 0,
            boundary_faces: 0,
        }
    }

    /// Current state, `Failed` included.
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// The last state reached successfully. Never `Failed`.
    pub fn last_reached(&self) -> AssemblyState {
        self.reached
    }

    /// Interior and boundary faces pushed so far.
    pub fn face_counts(&self) -> (usize, usize) {
        (self.interior_faces, self.boundary_faces)
    }

    /// Runs the whole import. On any failure nothing is returned and the
    /// reader ends in [`AssemblyState::Failed`].
    pub fn read<M, P>(
        &mut self,
        model: M,
        progress: &mut P,
    ) -> Result<<M::Assembler as FaceAssembler>::Mesh, FoamMeshError>
    where
        M: GridModel,
        P: ImportProgress + ?Sized,
    {
        if self.state != AssemblyState::Unopened {
            return Err(FoamMeshError::InvalidState(self.state.name()));
        }
        if progress.begin_import(NUM_MAJOR_STEPS).is_break() {
            progress.end_import(false);
            return Err(self.fail(FoamMeshError::Cancelled));
        }
        let result = self.run(model, progress);
        let confirmed = progress.end_import(result.is_ok());
        match result {
            Ok(mesh) if confirmed => {
                log::info!(
                    "imported OpenFOAM mesh: {} interior and {} boundary faces",
                    self.interior_faces,
                    self.boundary_faces
                );
                Ok(mesh)
            }
            Ok(_) => Err(self.fail(FoamMeshError::Cancelled)),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn run<M, P>(
        &mut self,
        mut model: M,
        progress: &mut P,
    ) -> Result<<M::Assembler as FaceAssembler>::Mesh, FoamMeshError>
    where
        M: GridModel,
        P: ImportProgress + ?Sized,
    {
        let mut case = self.open_case()?;
        self.advance(AssemblyState::FilesOpened);

        case.points.read_all_points(&mut model, progress)?;
        self.advance(AssemblyState::PointsLoaded);

        let mut assembler = model.into_assembler()?;
        if let Some(num_cells) = case.cell_hint {
            assembler.reserve_cells(num_cells);
        }

        let num_faces = case.faces.num_faces();
        run_step(progress, num_faces, |progress| {
            self.assemble_interior(&mut case, &mut assembler, progress)?;
            self.advance(AssemblyState::InteriorFacesAssembled);
            self.assemble_boundary(&mut case, &mut assembler, progress)?;
            self.advance(AssemblyState::BoundaryFacesAssembled);
            Ok(())
        })?;

        let mesh = assembler.finalize()?;
        self.advance(AssemblyState::Finalized);
        Ok(mesh)
    }

    /// Opens points, faces, owner and neighbour, then checks that their
    /// counts describe one mesh.
    fn open_case(&self) -> Result<OpenCase<S::Stream>, FoamMeshError> {
        let mut case = OpenCase {
            points: VectorFieldFile::open(self.source.open(PolyMeshFile::Points)?)?,
            faces: FaceListFile::open(self.source.open(PolyMeshFile::Faces)?)?,
            owner: LabelListFile::open(self.source.open(PolyMeshFile::Owner)?)?,
            neighbour: LabelListFile::open(self.source.open(PolyMeshFile::Neighbour)?)?,
            cell_hint: None,
        };

        let faces = case.faces.num_faces();
        let owners = case.owner.num_labels();
        let neighbours = case.neighbour.num_labels();
        if owners != faces {
            return Err(FoamMeshError::OwnerCountMismatch { owners, faces });
        }
        if neighbours >= faces {
            return Err(FoamMeshError::NeighbourCountTooLarge { neighbours, faces });
        }
        self.check_notes(&case)?;
        case.cell_hint = self.checked_cell_hint(&case)?;
        Ok(case)
    }

    fn check_notes<R: BufRead + Seek>(&self, case: &OpenCase<R>) -> Result<(), FoamMeshError> {
        for note in [case.owner.note(), case.neighbour.note()].into_iter().flatten() {
            let checks = [
                ("nPoints", note.n_points, case.points.num_points()),
                ("nFaces", note.n_faces, case.faces.num_faces()),
                ("nInternalFaces", note.n_internal_faces, case.neighbour.num_labels()),
            ];
            for (key, noted, actual) in checks {
                let Some(noted) = noted else { continue };
                if noted == actual {
                    continue;
                }
                if self.options.strict_note {
                    return Err(FoamMeshError::NoteMismatch { key, noted, actual });
                }
                log::warn!("header note reports {key} = {noted}, but the file holds {actual}");
            }
        }
        Ok(())
    }

    /// `nCells` from the owner note, dropped (or rejected when strict) if it
    /// exceeds what the faces can bound: every cell needs at least 4 faces and
    /// an interior face counts for two cells.
    fn checked_cell_hint<R: BufRead + Seek>(
        &self,
        case: &OpenCase<R>,
    ) -> Result<Option<usize>, FoamMeshError> {
        let Some(noted) = case.owner.note().and_then(|note| note.n_cells) else {
            return Ok(None);
        };
        let max = max_cells(case.faces.num_faces(), case.neighbour.num_labels());
        if noted <= max {
            return Ok(Some(noted));
        }
        if self.options.strict_note {
            return Err(FoamMeshError::ImplausibleCellCount { noted, max });
        }
        log::warn!(
            "header note reports nCells = {noted}, but the faces bound at most {max}; ignoring it"
        );
        Ok(None)
    }

    fn assemble_interior<R, A, P>(
        &mut self,
        case: &mut OpenCase<R>,
        assembler: &mut A,
        progress: &mut P,
    ) -> Result<(), FoamMeshError>
    where
        R: BufRead + Seek,
        A: FaceAssembler,
        P: ImportProgress + ?Sized,
    {
        let num_points = case.points.num_points();
        for index in 0..case.neighbour.num_labels() {
            let face = read_face_vertices(&mut case.faces, index, num_points)?;
            let owner = case.owner.read_next_label()?;
            let neighbour = case.neighbour.read_next_label()?;
            let (owner, neighbour) = orient_interior(owner, neighbour);
            assembler.push_face(&AssembledFace::interior(face, owner, neighbour))?;
            self.interior_faces += 1;
            tick(progress)?;
        }
        case.neighbour.finish()
    }

    fn assemble_boundary<R, A, P>(
        &mut self,
        case: &mut OpenCase<R>,
        assembler: &mut A,
        progress: &mut P,
    ) -> Result<(), FoamMeshError>
    where
        R: BufRead + Seek,
        A: FaceAssembler,
        P: ImportProgress + ?Sized,
    {
        let num_points = case.points.num_points();
        for index in case.neighbour.num_labels()..case.faces.num_faces() {
            let face = read_face_vertices(&mut case.faces, index, num_points)?;
            let owner = case.owner.read_next_label()?;
            assembler.push_face(&AssembledFace::boundary(face.reversed(), owner))?;
            self.boundary_faces += 1;
            tick(progress)?;
        }
        case.owner.finish()?;
        case.faces.finish()
    }

    fn advance(&mut self, state: AssemblyState) {
        log::debug!("OpenFOAM import: {} -> {}", self.state.name(), state.name());
        self.state = state;
        self.reached = state;
    }

    fn fail(&mut self, err: FoamMeshError) -> FoamMeshError {
        log::warn!("OpenFOAM import failed after {}: {err}", self.reached.name());
        self.state = AssemblyState::Failed;
        err
    }
}

/// Reads face `index` and checks every vertex against the point count.
fn read_face_vertices<R: BufRead + Seek>(
    faces: &mut FaceListFile<R>,
    index: usize,
    num_points: usize,
) -> Result<FaceRecord, FoamMeshError> {
    let face = faces.read_next_face()?;
    match face.vertices().iter().find(|&&v| v as usize >= num_points) {
        Some(&vertex) => Err(FoamMeshError::VertexIndexOutOfRange {
            face: index,
            vertex,
            num_points,
        }),
        None => Ok(face),
    }
}
