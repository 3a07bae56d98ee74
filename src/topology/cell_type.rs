//! Cell type metadata for imported cells.

use serde::{Deserialize, Serialize};

/// Element types a polyMesh import can produce.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 1D segment.
    Bar,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex: 4 triangles.
    Tetrahedron,
    /// 1 quad and 4 triangles.
    Pyramid,
    /// Wedge: 2 triangles and 3 quads.
    Prism,
    /// 6 quads.
    Hexahedron,
    /// Any other closed set of triangles and quads.
    Polyhedron,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Polyhedron
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Bar => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron
            | CellType::Pyramid
            | CellType::Prism
            | CellType::Hexahedron
            | CellType::Polyhedron => 3,
        }
    }

    /// Classifies a volume cell by how many triangular and quadrilateral
    /// faces bound it.
    pub fn from_face_counts(triangles: usize, quads: usize) -> Self {
        match (triangles, quads) {
            (4, 0) => CellType::Tetrahedron,
            (4, 1) => CellType::Pyramid,
            (2, 3) => CellType::Prism,
            (0, 6) => CellType::Hexahedron,
            _ => CellType::Polyhedron,
        }
    }

    /// Name used when advertising supported elements to a host.
    pub fn token(self) -> &'static str {
        match self {
            CellType::Bar => "Bar",
            CellType::Triangle => "Tri",
            CellType::Quadrilateral => "Quad",
            CellType::Tetrahedron => "Tet",
            CellType::Pyramid => "Pyramid",
            CellType::Prism => "Wedge",
            CellType::Hexahedron => "Hex",
            CellType::Polyhedron => "Polyhedron",
        }
    }

    /// Number of corner vertices, when fixed by the type.
    pub fn vertex_count(self) -> Option<usize> {
        match self {
            CellType::Bar => Some(2),
            CellType::Triangle => Some(3),
            CellType::Quadrilateral | CellType::Tetrahedron => Some(4),
            CellType::Pyramid => Some(5),
            CellType::Prism => Some(6),
            CellType::Hexahedron => Some(8),
            CellType::Polyhedron => None,
        }
    }
}
