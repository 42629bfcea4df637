use crate::mesh::element::ElementType;

/// (sorted local node indices, node order of the face or edge)
///
/// Local indices are 1-based positions in the volume element's node sequence
pub type Pattern = (&'static [u8], &'static [u8]);

// ----------------------------------------------------------------------------------------------------
// Faces
// ----------------------------------------------------------------------------------------------------

/// tetra4 --> tria3 faces
pub const TETRA4_FACES: [Pattern; 4] = [
    (&[1, 2, 3], &[1, 2, 3]),
    (&[1, 2, 4], &[1, 4, 2]),
    (&[1, 3, 4], &[1, 3, 4]),
    (&[2, 3, 4], &[2, 4, 3]),
];

/// tetra10 --> tria6 faces
pub const TETRA10_FACES: [Pattern; 4] = [
    (&[1, 2, 3, 5, 6, 7], &[1, 2, 3, 5, 6, 7]),
    (&[1, 2, 4, 5, 8, 9], &[1, 4, 2, 8, 9, 5]),
    (&[1, 3, 4, 7, 8, 10], &[1, 3, 4, 7, 10, 8]),
    (&[2, 3, 4, 6, 9, 10], &[2, 4, 3, 9, 10, 6]),
];

/// hexa8 --> quad4 faces
pub const HEXA8_FACES: [Pattern; 6] = [
    (&[1, 2, 3, 4], &[1, 2, 3, 4]),
    (&[5, 6, 7, 8], &[5, 8, 7, 6]),
    (&[1, 2, 5, 6], &[1, 5, 6, 2]),
    (&[3, 4, 7, 8], &[3, 7, 8, 4]),
    (&[1, 4, 5, 8], &[1, 4, 8, 5]),
    (&[2, 3, 6, 7], &[2, 6, 7, 3]),
];

/// hexa20 --> quad8 faces
pub const HEXA20_FACES: [Pattern; 6] = [
    (&[1, 2, 3, 4, 9, 10, 11, 12], &[1, 2, 3, 4, 9, 10, 11, 12]),
    (&[5, 6, 7, 8, 13, 14, 15, 16], &[5, 8, 7, 6, 16, 15, 14, 13]),
    (&[1, 2, 5, 6, 9, 13, 17, 18], &[1, 5, 6, 2, 17, 13, 18, 9]),
    (&[3, 4, 7, 8, 11, 15, 19, 20], &[3, 7, 8, 4, 19, 15, 20, 11]),
    (&[1, 4, 5, 8, 12, 16, 17, 20], &[1, 4, 8, 5, 12, 20, 16, 17]),
    (&[2, 3, 6, 7, 10, 14, 18, 19], &[2, 6, 7, 3, 18, 14, 19, 10]),
];

/// penta6 --> tria3 and quad4 faces
pub const PENTA6_FACES: [Pattern; 5] = [
    (&[1, 2, 3], &[1, 2, 3]),
    (&[4, 5, 6], &[4, 6, 5]),
    (&[1, 2, 4, 5], &[1, 4, 5, 2]),
    (&[1, 3, 4, 6], &[1, 3, 6, 4]),
    (&[2, 3, 5, 6], &[2, 5, 6, 3]),
];

/// penta15 --> tria6 and quad8 faces
pub const PENTA15_FACES: [Pattern; 5] = [
    (&[1, 2, 3, 7, 8, 9], &[1, 2, 3, 7, 8, 9]),
    (&[4, 5, 6, 10, 11, 12], &[4, 6, 5, 12, 11, 10]),
    (&[1, 2, 4, 5, 7, 10, 13, 14], &[1, 4, 5, 2, 13, 10, 14, 7]),
    (&[1, 3, 4, 6, 9, 12, 13, 15], &[1, 3, 6, 4, 9, 15, 12, 13]),
    (&[2, 3, 5, 6, 8, 11, 14, 15], &[2, 5, 6, 3, 14, 11, 15, 8]),
];

// ----------------------------------------------------------------------------------------------------
// Edges
// ----------------------------------------------------------------------------------------------------

/// tetra4 --> seg2 edges
pub const TETRA4_EDGES: [Pattern; 6] = [
    (&[1, 2], &[1, 2]),
    (&[2, 3], &[2, 3]),
    (&[1, 3], &[3, 1]),
    (&[1, 4], &[1, 4]),
    (&[2, 4], &[2, 4]),
    (&[3, 4], &[3, 4]),
];

/// tetra10 --> seg3 edges (end, end, mid)
pub const TETRA10_EDGES: [Pattern; 6] = [
    (&[1, 2, 5], &[1, 2, 5]),
    (&[2, 3, 6], &[2, 3, 6]),
    (&[1, 3, 7], &[3, 1, 7]),
    (&[1, 4, 8], &[1, 4, 8]),
    (&[2, 4, 9], &[2, 4, 9]),
    (&[3, 4, 10], &[3, 4, 10]),
];

/// hexa8 --> seg2 edges
pub const HEXA8_EDGES: [Pattern; 12] = [
    (&[1, 2], &[1, 2]),
    (&[2, 3], &[2, 3]),
    (&[3, 4], &[3, 4]),
    (&[1, 4], &[4, 1]),
    (&[5, 6], &[5, 6]),
    (&[6, 7], &[6, 7]),
    (&[7, 8], &[7, 8]),
    (&[5, 8], &[8, 5]),
    (&[1, 5], &[1, 5]),
    (&[2, 6], &[2, 6]),
    (&[3, 7], &[3, 7]),
    (&[4, 8], &[4, 8]),
];

/// hexa20 --> seg3 edges (end, end, mid)
pub const HEXA20_EDGES: [Pattern; 12] = [
    (&[1, 2, 9], &[1, 2, 9]),
    (&[2, 3, 10], &[2, 3, 10]),
    (&[3, 4, 11], &[3, 4, 11]),
    (&[1, 4, 12], &[4, 1, 12]),
    (&[5, 6, 13], &[5, 6, 13]),
    (&[6, 7, 14], &[6, 7, 14]),
    (&[7, 8, 15], &[7, 8, 15]),
    (&[5, 8, 16], &[8, 5, 16]),
    (&[1, 5, 17], &[1, 5, 17]),
    (&[2, 6, 18], &[2, 6, 18]),
    (&[3, 7, 19], &[3, 7, 19]),
    (&[4, 8, 20], &[4, 8, 20]),
];

/// penta6 --> seg2 edges
pub const PENTA6_EDGES: [Pattern; 9] = [
    (&[1, 2], &[1, 2]),
    (&[2, 3], &[2, 3]),
    (&[1, 3], &[3, 1]),
    (&[4, 5], &[4, 5]),
    (&[5, 6], &[5, 6]),
    (&[4, 6], &[6, 4]),
    (&[1, 4], &[1, 4]),
    (&[2, 5], &[2, 5]),
    (&[3, 6], &[3, 6]),
];

/// penta15 --> seg3 edges (end, end, mid)
pub const PENTA15_EDGES: [Pattern; 9] = [
    (&[1, 2, 7], &[1, 2, 7]),
    (&[2, 3, 8], &[2, 3, 8]),
    (&[1, 3, 9], &[3, 1, 9]),
    (&[4, 5, 10], &[4, 5, 10]),
    (&[5, 6, 11], &[5, 6, 11]),
    (&[4, 6, 12], &[6, 4, 12]),
    (&[1, 4, 13], &[1, 4, 13]),
    (&[2, 5, 14], &[2, 5, 14]),
    (&[3, 6, 15], &[3, 6, 15]),
];

/// Face patterns of a volume element type (empty for edge and face types)
pub fn face_patterns(kind: ElementType) -> &'static [Pattern] {
    match kind {
        ElementType::Tetra4 => &TETRA4_FACES,
        ElementType::Tetra10 => &TETRA10_FACES,
        ElementType::Hexa8 => &HEXA8_FACES,
        ElementType::Hexa20 => &HEXA20_FACES,
        ElementType::Penta6 => &PENTA6_FACES,
        ElementType::Penta15 => &PENTA15_FACES,
        _ => &[],
    }
}

/// Edge patterns of a volume element type (empty for edge and face types)
pub fn edge_patterns(kind: ElementType) -> &'static [Pattern] {
    match kind {
        ElementType::Tetra4 => &TETRA4_EDGES,
        ElementType::Tetra10 => &TETRA10_EDGES,
        ElementType::Hexa8 => &HEXA8_EDGES,
        ElementType::Hexa20 => &HEXA20_EDGES,
        ElementType::Penta6 => &PENTA6_EDGES,
        ElementType::Penta15 => &PENTA15_EDGES,
        _ => &[],
    }
}

/// Node order matching a sorted set of local indices
pub fn canonical_order(patterns: &'static [Pattern], sorted_local: &[u8]) -> Option<&'static [u8]> {
    patterns
        .iter()
        .find(|(local, _)| *local == sorted_local)
        .map(|(_, order)| *order)
}
