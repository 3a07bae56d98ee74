//! Mesh import boundary.
//!
//! The readers in [`foam`] never own the final mesh. They drive a host grid
//! model through the traits below: first a [`VertexSink`] receives every
//! point, then the model turns into a [`FaceAssembler`] that accepts oriented
//! faces one at a time and finally stitches them into cells.
//!
//! [`crate::topology::poly_mesh::PolyMeshBuilder`] is the in-crate model.

pub mod foam;
pub mod progress;

use crate::mesh_error::FoamMeshError;
use crate::topology::face::AssembledFace;

/// Destination for point coordinates.
pub trait VertexSink {
    /// Sizes the container for `count` points. Called once, before any
    /// [`set_xyz`](Self::set_xyz).
    fn allocate(&mut self, count: usize) -> Result<(), FoamMeshError>;

    /// Stores the coordinates of point `index`.
    fn set_xyz(&mut self, index: usize, xyz: [f64; 3]) -> Result<(), FoamMeshError>;
}

/// A host grid model: a vertex container that can start face assembly.
pub trait GridModel: VertexSink {
    type Assembler: FaceAssembler;

    /// Creates the face assembler over the loaded vertices.
    fn into_assembler(self) -> Result<Self::Assembler, FoamMeshError>;
}

/// Incremental face-to-cell builder.
pub trait FaceAssembler {
    /// The finished mesh.
    type Mesh;

    /// Accepts one face. Orientation is already corrected: the normal points
    /// into `owner` and away from `neighbour`.
    fn push_face(&mut self, face: &AssembledFace) -> Result<(), FoamMeshError>;

    /// Size hint for the number of cells.
    fn reserve_cells(&mut self, _num_cells: usize) {}

    /// Stitches all submitted faces into cells. Nothing is committed when
    /// this fails.
    fn finalize(self) -> Result<Self::Mesh, FoamMeshError>;
}
