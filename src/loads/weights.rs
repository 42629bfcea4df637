use crate::config::QuadAreaRule;
use crate::error::{Diagnostics, MeshIssue};
use crate::geometry::{distance, triangle_area, Point};
use crate::reconstruct::FaceEdgeTable;

use std::collections::BTreeMap;

/// `[(node_id, length or area), ...]`: one entry per node per mesh edge/face, so shared nodes appear more than once
pub type NodeMeasures = Vec<(usize, f64)>;

/// Share of each mesh edge's length carried by its nodes
///
/// ```text
///   2 nodes:  P1 ______ P2         1/2  1/2
///   3 nodes:  P1 ___ P3 ___ P2     1/6  1/6  2/3 (P3)
/// ```
///
/// The 3 node weights integrate the quadratic shape functions exactly; the length is |P3 - P1| + |P2 - P3|.
pub fn node_lengths(
    nodes: &BTreeMap<usize, Point>,
    edge_table: &FaceEdgeTable,
    diagnostics: &mut Diagnostics,
) -> NodeMeasures {
    if nodes.is_empty() || edge_table.is_empty() {
        diagnostics.report(MeshIssue::EmptyInput {
            context: if nodes.is_empty() { "node table" } else { "edge table" },
        });
        return Vec::new();
    }

    let mut node_lengths = Vec::with_capacity(edge_table.len() * 3);
    for (edge_id, edge_nodes) in edge_table.iter() {
        let points = match points_of(nodes, *edge_id, edge_nodes, diagnostics) {
            Some(points) => points,
            None => continue,
        };

        match points.len() {
            2 => {
                let end_length = distance(&points[0], &points[1]) / 2.0;
                node_lengths.push((edge_nodes[0], end_length));
                node_lengths.push((edge_nodes[1], end_length));
            }
            3 => {
                let length = distance(&points[0], &points[2]) + distance(&points[2], &points[1]);
                node_lengths.push((edge_nodes[0], length / 6.0));
                node_lengths.push((edge_nodes[1], length / 6.0));
                node_lengths.push((edge_nodes[2], length * 2.0 / 3.0));
            }
            node_count => diagnostics.report(MeshIssue::UnknownElementType {
                element: *edge_id,
                node_count,
                context: "edge",
            }),
        }
    }
    node_lengths
}

/// Share of each mesh face's area carried by its nodes
///
/// Face nodes must be in face order (corners, then mid-side nodes).
///
/// ```text
///   tria3:  area/3 per corner
///   quad4:  area/4 per corner, area = A(P1 P2 P3) + A(P1 P3 P4) (see QuadAreaRule)
///
///   tria6:          P3              quad8:  P4 ____ P7 ____ P3
///                   /\                        | t4 / | \ t3 |
///                  /t3\                       |  /   |   \  |
///              P6 /----\ P5                P8 |/ t5  | t6 \ | P6
///                / \t4 / \                    |\     |     /|
///               /t1 \ / t2\                   |  \   |   /  |
///           P1 /_____V_____\ P2               | t1 \ | / t2 |
///                    P4                     P1 ----- P5 ----- P2
///
///   corners: 0                              corners: -(t1 + ... + t6)/12
///   mid-side: (t1 + t2 + t3 + t4)/3         mid-side: (t1 + ... + t6)/3
/// ```
///
/// Results are exact when the mid-side nodes lie on the straight line between their corners
pub fn node_areas(
    nodes: &BTreeMap<usize, Point>,
    face_table: &FaceEdgeTable,
    quad_area: QuadAreaRule,
    diagnostics: &mut Diagnostics,
) -> NodeMeasures {
    if nodes.is_empty() || face_table.is_empty() {
        diagnostics.report(MeshIssue::EmptyInput {
            context: if nodes.is_empty() { "node table" } else { "face table" },
        });
        return Vec::new();
    }

    let mut node_areas = Vec::with_capacity(face_table.len() * 8);
    for (face_id, face_nodes) in face_table.iter() {
        let p = match points_of(nodes, *face_id, face_nodes, diagnostics) {
            Some(points) => points,
            None => continue,
        };

        let weights: Vec<f64> = match p.len() {
            3 => {
                let corner = triangle_area(&p[0], &p[1], &p[2]) / 3.0;
                vec![corner; 3]
            }
            4 => {
                let t1 = triangle_area(&p[0], &p[1], &p[2]);
                let t2 = triangle_area(&p[0], &p[2], &p[3]);
                let area = match quad_area {
                    QuadAreaRule::TwoTriangles => t1 + t2,
                    QuadAreaRule::FirstTriangleTwice => t1 + t1,
                };
                vec![area / 4.0; 4]
            }
            6 => {
                let area = triangle_area(&p[0], &p[3], &p[5])
                    + triangle_area(&p[1], &p[4], &p[3])
                    + triangle_area(&p[2], &p[5], &p[4])
                    + triangle_area(&p[3], &p[4], &p[5]);
                let mid = area / 3.0;
                vec![0.0, 0.0, 0.0, mid, mid, mid]
            }
            8 => {
                let area = triangle_area(&p[0], &p[4], &p[7])
                    + triangle_area(&p[4], &p[1], &p[5])
                    + triangle_area(&p[5], &p[2], &p[6])
                    + triangle_area(&p[6], &p[3], &p[7])
                    + triangle_area(&p[4], &p[6], &p[7])
                    + triangle_area(&p[4], &p[5], &p[6]);
                let corner = -area / 12.0;
                let mid = area / 3.0;
                vec![corner, corner, corner, corner, mid, mid, mid, mid]
            }
            node_count => {
                diagnostics.report(MeshIssue::UnknownElementType {
                    element: *face_id,
                    node_count,
                    context: "face",
                });
                continue;
            }
        };

        node_areas.extend(face_nodes.iter().copied().zip(weights));
    }
    node_areas
}

/// `{ node_id : summed length or area }`
pub fn node_sum_measures(node_measures: &[(usize, f64)]) -> BTreeMap<usize, f64> {
    let mut sums = BTreeMap::new();
    for (node_id, measure) in node_measures {
        *sums.entry(*node_id).or_insert(0.0) += measure;
    }
    sums
}

fn points_of(
    nodes: &BTreeMap<usize, Point>,
    element_id: usize,
    element_nodes: &[usize],
    diagnostics: &mut Diagnostics,
) -> Option<Vec<Point>> {
    let mut points = Vec::with_capacity(element_nodes.len());
    for node_id in element_nodes {
        match nodes.get(node_id) {
            Some(point) => points.push(*point),
            None => {
                diagnostics.report(MeshIssue::MissingNode {
                    element: element_id,
                    node: *node_id,
                });
                return None;
            }
        }
    }
    Some(points)
}
