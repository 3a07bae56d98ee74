//! Face-based polyhedral mesh: the in-crate grid model.
//!
//! Import runs in three stages that mirror the [`crate::io`] traits:
//!
//! 1. [`PolyMeshBuilder`] collects vertex coordinates ([`VertexSink`]).
//! 2. [`PolyMeshAssembler`] collects oriented faces ([`FaceAssembler`]).
//! 3. [`FaceAssembler::finalize`] stitches faces into cells and returns a
//!    [`PolyMesh`].
//!
//! Faces are stored in the grid-model orientation: each face normal points
//! into its owner and away from its neighbour.

use crate::io::{FaceAssembler, GridModel, VertexSink};
use crate::mesh_error::FoamMeshError;
use crate::topology::cell_type::CellType;
use crate::topology::face::{AssembledFace, FaceArity, FaceKind};
use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Optional finalize-time checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolyMeshOptions {
    /// Require every cell to be closed with consistently wound faces.
    pub validate_cells: bool,
}

impl PolyMeshOptions {
    /// Enable all cell checks.
    pub fn all() -> Self {
        Self {
            validate_cells: true,
        }
    }
}

/// Vertex container stage.
#[derive(Debug, Default, Clone)]
pub struct PolyMeshBuilder {
    options: PolyMeshOptions,
    points: Vec<[f64; 3]>,
}

impl PolyMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PolyMeshOptions) -> Self {
        Self {
            options,
            points: Vec::new(),
        }
    }
}

impl VertexSink for PolyMeshBuilder {
    fn allocate(&mut self, count: usize) -> Result<(), FoamMeshError> {
        self.points = vec![[0.0; 3]; count];
        Ok(())
    }

    fn set_xyz(&mut self, index: usize, xyz: [f64; 3]) -> Result<(), FoamMeshError> {
        let len = self.points.len();
        let slot = self.points.get_mut(index).ok_or_else(|| {
            FoamMeshError::GridModel(format!("vertex {index} outside allocated {len}"))
        })?;
        *slot = xyz;
        Ok(())
    }
}

impl GridModel for PolyMeshBuilder {
    type Assembler = PolyMeshAssembler;

    fn into_assembler(self) -> Result<PolyMeshAssembler, FoamMeshError> {
        if self.points.is_empty() {
            return Err(FoamMeshError::GridModel(
                "face assembly needs at least one vertex".into(),
            ));
        }
        Ok(PolyMeshAssembler {
            options: self.options,
            points: self.points,
            faces: Vec::new(),
            cell_hint: 0,
        })
    }
}

/// Face collection stage.
#[derive(Debug, Clone)]
pub struct PolyMeshAssembler {
    options: PolyMeshOptions,
    points: Vec<[f64; 3]>,
    faces: Vec<AssembledFace>,
    cell_hint: usize,
}

impl PolyMeshAssembler {
    /// Faces pushed so far.
    pub fn faces(&self) -> &[AssembledFace] {
        &self.faces
    }
}

impl FaceAssembler for PolyMeshAssembler {
    type Mesh = PolyMesh;

    fn push_face(&mut self, face: &AssembledFace) -> Result<(), FoamMeshError> {
        let num_points = self.points.len();
        if let Some(&vertex) = face.face.vertices().iter().find(|&&v| v as usize >= num_points) {
            return Err(FoamMeshError::VertexIndexOutOfRange {
                face: self.faces.len(),
                vertex,
                num_points,
            });
        }
        match (face.kind, face.neighbour) {
            (FaceKind::Interior, Some(_)) | (FaceKind::Boundary, None) => {}
            _ => {
                return Err(FoamMeshError::GridModel(format!(
                    "face {} is {:?} but neighbour is {:?}",
                    self.faces.len(),
                    face.kind,
                    face.neighbour
                )));
            }
        }
        self.faces.push(*face);
        Ok(())
    }

    fn reserve_cells(&mut self, num_cells: usize) {
        self.cell_hint = num_cells;
    }

    fn finalize(self) -> Result<PolyMesh, FoamMeshError> {
        let num_cells = face_cells(&self.faces)
            .max()
            .map_or(0, |max| max as usize + 1);
        let num_interior = self
            .faces
            .iter()
            .filter(|f| f.neighbour.is_some())
            .count();
        if num_cells > max_cells(self.faces.len(), num_interior) {
            return Err(undersized_cell(&self.faces, num_cells));
        }
        if self.cell_hint != 0 && self.cell_hint != num_cells {
            log::debug!(
                "expected {} cells, stitching {num_cells}",
                self.cell_hint
            );
        }

        let mut cell_faces: Vec<Vec<u32>> = vec![Vec::new(); num_cells];
        for (id, face) in self.faces.iter().enumerate() {
            let id = id as u32;
            cell_faces[face.owner as usize].push(id);
            if let Some(nbr) = face.neighbour {
                cell_faces[nbr as usize].push(id);
            }
        }

        let mut cells = Vec::with_capacity(num_cells);
        for (cell, faces) in cell_faces.into_iter().enumerate() {
            let cell = cell as u32;
            if faces.is_empty() {
                return Err(FoamMeshError::EmptyCell { cell });
            }
            if faces.len() < 4 {
                return Err(FoamMeshError::OpenCell {
                    cell,
                    faces: faces.len(),
                });
            }
            let triangles = faces
                .iter()
                .filter(|&&f| self.faces[f as usize].face.arity() == FaceArity::Triangle)
                .count();
            let by_faces = CellType::from_face_counts(triangles, faces.len() - triangles);
            let cell_type = classify(by_faces, &faces, &self.faces);
            if self.options.validate_cells {
                check_cell_closure(cell, &faces, &self.faces)?;
            }
            cells.push(PolyCell { cell_type, faces });
        }

        log::debug!(
            "stitched {} faces into {} cells",
            self.faces.len(),
            cells.len()
        );
        Ok(PolyMesh {
            points: self.points,
            faces: self.faces,
            cells,
        })
    }
}

/// Upper bound on the cell count of a mesh with `faces` faces, `interior` of
/// them shared by two cells.
pub fn max_cells(faces: usize, interior: usize) -> usize {
    (faces.saturating_add(interior) / 4).max(1)
}

/// Keeps `by_faces` only when the cell also has the corner count of that
/// type; a matching face signature over other vertices is a polyhedron.
fn classify(by_faces: CellType, face_ids: &[u32], faces: &[AssembledFace]) -> CellType {
    let Some(expected) = by_faces.vertex_count() else {
        return by_faces;
    };
    let corners = face_ids
        .iter()
        .flat_map(|&f| faces[f as usize].face.vertices().iter().copied())
        .unique()
        .count();
    if corners == expected {
        by_faces
    } else {
        CellType::Polyhedron
    }
}

/// Every cell label a face touches: its owner, then its neighbour if any.
fn face_cells(faces: &[AssembledFace]) -> impl Iterator<Item = u32> + '_ {
    faces
        .iter()
        .flat_map(|f| std::iter::once(f.owner).chain(f.neighbour))
}

/// Finds the first cell that is empty or has fewer than 4 faces without
/// allocating per cell. Only called when `num_cells` exceeds [`max_cells`],
/// so such a cell exists among the first few labels.
fn undersized_cell(faces: &[AssembledFace], num_cells: usize) -> FoamMeshError {
    let counts = face_cells(faces).counts();
    for cell in (0..num_cells).map(|c| c as u32) {
        match counts.get(&cell) {
            None => return FoamMeshError::EmptyCell { cell },
            Some(&n) if n < 4 => return FoamMeshError::OpenCell { cell, faces: n },
            Some(_) => {}
        }
    }
    FoamMeshError::GridModel(format!(
        "{num_cells} cells cannot be bounded by {} faces",
        faces.len()
    ))
}

/// Every edge of a closed cell must be used exactly twice, once in each
/// direction, when all faces are wound into the cell.
fn check_cell_closure(
    cell: u32,
    face_ids: &[u32],
    faces: &[AssembledFace],
) -> Result<(), FoamMeshError> {
    let mut edges: HashMap<(u32, u32), (u32, u32)> = HashMap::new();
    for &id in face_ids {
        let Some(face) = faces[id as usize].oriented_into(cell) else {
            continue;
        };
        for (a, b) in face.edges() {
            let entry = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }
    for &(forward, backward) in edges.values() {
        if forward + backward != 2 {
            return Err(FoamMeshError::OpenCell {
                cell,
                faces: face_ids.len(),
            });
        }
        if forward != 1 {
            return Err(FoamMeshError::InconsistentOrientation { cell });
        }
    }
    Ok(())
}

/// One stitched cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyCell {
    pub cell_type: CellType,
    /// Indices into [`PolyMesh::faces`].
    pub faces: Vec<u32>,
}

/// A finalized polyhedral mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    points: Vec<[f64; 3]>,
    faces: Vec<AssembledFace>,
    cells: Vec<PolyCell>,
}

impl PolyMesh {
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn faces(&self) -> &[AssembledFace] {
        &self.faces
    }

    pub fn cells(&self) -> &[PolyCell] {
        &self.cells
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_interior_faces(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| f.kind == FaceKind::Interior)
            .count()
    }

    pub fn num_boundary_faces(&self) -> usize {
        self.faces.len() - self.num_interior_faces()
    }

    /// Distinct vertices of `cell`, ascending.
    pub fn cell_vertices(&self, cell: usize) -> Vec<u32> {
        self.cells[cell]
            .faces
            .iter()
            .flat_map(|&f| self.faces[f as usize].face.vertices().iter().copied())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Arithmetic mean of the distinct vertices of `cell`.
    pub fn cell_centroid(&self, cell: usize) -> [f64; 3] {
        let vertices = self.cell_vertices(cell);
        let mut c = [0.0; 3];
        for &v in &vertices {
            let p = self.points[v as usize];
            for k in 0..3 {
                c[k] += p[k];
            }
        }
        let n = vertices.len().max(1) as f64;
        c.map(|x| x / n)
    }
}
