//! Face records as read from a `faces` file and as handed to a grid model.

use serde::{Deserialize, Serialize};

/// Number of vertices of a supported face.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum FaceArity {
    Triangle,
    Quad,
}

impl FaceArity {
    /// Maps a vertex count to an arity; only 3 and 4 are supported.
    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            3 => Some(FaceArity::Triangle),
            4 => Some(FaceArity::Quad),
            _ => None,
        }
    }

    #[inline]
    pub fn len(self) -> usize {
        match self {
            FaceArity::Triangle => 3,
            FaceArity::Quad => 4,
        }
    }
}

/// A triangle or quad given as indices into the point list.
///
/// The vertex order defines the face normal by the right-hand rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    arity: FaceArity,
    index: [u32; 4],
}

impl FaceRecord {
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self {
            arity: FaceArity::Triangle,
            index: [a, b, c, 0],
        }
    }

    pub fn quad(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self {
            arity: FaceArity::Quad,
            index: [a, b, c, d],
        }
    }

    /// Builds a face from a slice of 3 or 4 indices.
    pub fn from_slice(vertices: &[u32]) -> Option<Self> {
        match *vertices {
            [a, b, c] => Some(Self::triangle(a, b, c)),
            [a, b, c, d] => Some(Self::quad(a, b, c, d)),
            _ => None,
        }
    }

    #[inline]
    pub fn arity(&self) -> FaceArity {
        self.arity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arity.len()
    }

    /// The vertex indices in winding order.
    #[inline]
    pub fn vertices(&self) -> &[u32] {
        &self.index[..self.arity.len()]
    }

    /// The same face with its winding, and so its normal, reversed.
    ///
    /// Swapping one pair of non-adjacent positions reverses a closed loop:
    /// positions 1 and 3 of a quad, 1 and 2 of a triangle. Vertex 0 stays first.
    pub fn reversed(mut self) -> Self {
        match self.arity {
            FaceArity::Quad => self.index.swap(1, 3),
            FaceArity::Triangle => self.index.swap(1, 2),
        }
        self
    }

    /// Directed edges `(v[i], v[i + 1])` around the face, closing the loop.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let v = self.vertices();
        (0..v.len()).map(move |i| (v[i], v[(i + 1) % v.len()]))
    }
}

/// Whether a face separates two cells or bounds the domain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum FaceKind {
    Interior,
    Boundary,
}

/// One face as submitted to a [`FaceAssembler`](crate::io::FaceAssembler).
///
/// Orientation follows the grid-model convention: the normal points from
/// `neighbour` into `owner`, and for boundary faces into `owner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledFace {
    pub kind: FaceKind,
    pub face: FaceRecord,
    pub owner: u32,
    /// `None` for boundary faces.
    pub neighbour: Option<u32>,
}

impl AssembledFace {
    pub fn interior(face: FaceRecord, owner: u32, neighbour: u32) -> Self {
        Self {
            kind: FaceKind::Interior,
            face,
            owner,
            neighbour: Some(neighbour),
        }
    }

    pub fn boundary(face: FaceRecord, owner: u32) -> Self {
        Self {
            kind: FaceKind::Boundary,
            face,
            owner,
            neighbour: None,
        }
    }

    /// The face wound so its normal points into `cell`, if `cell` touches it.
    pub fn oriented_into(&self, cell: u32) -> Option<FaceRecord> {
        if self.owner == cell {
            Some(self.face)
        } else if self.neighbour == Some(cell) {
            Some(self.face.reversed())
        } else {
            None
        }
    }
}
