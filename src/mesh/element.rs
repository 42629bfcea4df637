use crate::config::MAX_INLINE_ELEMENT_NODES;

use smallvec::SmallVec;
use std::fmt;

/// Ordered node IDs of an element (or of one of its faces/edges)
pub type ElementNodes = SmallVec<[usize; MAX_INLINE_ELEMENT_NODES]>;

/// Topological dimension class of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Edge,
    Face,
    Volume,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Face => write!(f, "face"),
            Self::Volume => write!(f, "volume"),
        }
    }
}

/// The fixed inventory of supported element types
///
/// Node order follows the standard local numbering: corner nodes first, then mid-side nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Seg2,
    Seg3,
    Tria3,
    Tria6,
    Quad4,
    Quad8,
    Tetra4,
    Tetra10,
    Penta6,
    Penta15,
    Hexa8,
    Hexa20,
}

impl ElementType {
    pub const ALL: [Self; 12] = [
        Self::Seg2,
        Self::Seg3,
        Self::Tria3,
        Self::Tria6,
        Self::Quad4,
        Self::Quad8,
        Self::Tetra4,
        Self::Tetra10,
        Self::Penta6,
        Self::Penta15,
        Self::Hexa8,
        Self::Hexa20,
    ];

    pub const fn node_count(&self) -> usize {
        match self {
            Self::Seg2 => 2,
            Self::Seg3 => 3,
            Self::Tria3 => 3,
            Self::Tria6 => 6,
            Self::Quad4 => 4,
            Self::Quad8 => 8,
            Self::Tetra4 => 4,
            Self::Tetra10 => 10,
            Self::Penta6 => 6,
            Self::Penta15 => 15,
            Self::Hexa8 => 8,
            Self::Hexa20 => 20,
        }
    }

    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Seg2 | Self::Seg3 => Dimension::Edge,
            Self::Tria3 | Self::Tria6 | Self::Quad4 | Self::Quad8 => Dimension::Face,
            _ => Dimension::Volume,
        }
    }

    /// Has mid-side nodes
    pub const fn is_quadratic(&self) -> bool {
        matches!(
            self,
            Self::Seg3 | Self::Tria6 | Self::Quad8 | Self::Tetra10 | Self::Penta15 | Self::Hexa20
        )
    }

    /// Node counts are unique within a dimension, so they identify the element type
    pub fn from_node_count(dimension: Dimension, node_count: usize) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.dimension() == dimension && kind.node_count() == node_count)
    }

    /// Key of this element type's connectivity table in the mesh interchange format
    pub const fn interchange_key(&self) -> &'static str {
        match self {
            Self::Seg2 => "Seg2Elem",
            Self::Seg3 => "Seg3Elem",
            Self::Tria3 => "Tria3Elem",
            Self::Tria6 => "Tria6Elem",
            Self::Quad4 => "Quad4Elem",
            Self::Quad8 => "Quad8Elem",
            Self::Tetra4 => "Tetra4Elem",
            Self::Tetra10 => "Tetra10Elem",
            Self::Penta6 => "Penta6Elem",
            Self::Penta15 => "Penta15Elem",
            Self::Hexa8 => "Hexa8Elem",
            Self::Hexa20 => "Hexa20Elem",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A mesh primitive defined by an ordered list of node IDs
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: usize,
    pub kind: ElementType,
    pub nodes: ElementNodes,
}

impl Element {
    pub fn new(id: usize, kind: ElementType, nodes: &[usize]) -> Self {
        Self {
            id,
            kind,
            nodes: ElementNodes::from_slice(nodes),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.kind.dimension()
    }
}
