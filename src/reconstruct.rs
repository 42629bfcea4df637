/// Fixed face and edge node orders of each volume element type
pub mod canonical;

use crate::classify::{elements_by_nodes, elements_sharing_nodes, volumes_by_face_nodes};
use crate::element_table::ElementTable;
use crate::error::{Diagnostics, MeshIssue};
use crate::geometry::SubShape;
use crate::mesh::element::{Dimension, ElementNodes, ElementType};
use crate::mesh::{has_face_data, FemMesh, MeshClass};
use canonical::{canonical_order, edge_patterns, face_patterns, Pattern};

use std::collections::{BTreeMap, BTreeSet};

/// `{ element_id : [node_id, ... , node_id] }` describing the mesh faces or mesh edges on a geometric face or edge
///
/// The key is the ID of the element the face/edge was taken from: a volume element in solid meshes, otherwise the face/edge element itself
pub type FaceEdgeTable = BTreeMap<usize, ElementNodes>;

/// A face/edge table along with the data it was derived from
#[derive(Clone, Debug, Default)]
pub(crate) struct RefTable {
    pub reference_nodes: Vec<usize>,
    /// before duplicates were removed
    pub raw: FaceEdgeTable,
    pub table: FaceEdgeTable,
}

/// The mesh edges lying on a geometric edge
///
/// * solid and face meshes: every element with at least two nodes on the edge contributes the nodes it has there.
///   In solid meshes these are put in edge order (end, end, mid) using the element's local numbering.
///   Duplicate edges are removed (first element wins).
/// * edge meshes: the edge elements fully on the edge, with all of their nodes
pub fn ref_edge_table<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    edge: &SubShape,
    diagnostics: &mut Diagnostics,
) -> FaceEdgeTable {
    ref_edge_table_parts(mesh, element_table, edge, diagnostics).table
}

/// The mesh faces lying on a geometric face
///
/// * solid meshes without face elements: the volume elements with a face on the geometric face (found by the mesh's
///   volumes-by-face query if it has one, by counting face nodes otherwise) contribute that face,
///   ordered as a tria3/quad4/tria6/quad8 by the element's local numbering. Duplicate faces are removed.
/// * solid meshes with face elements: the face elements the mesh places on the geometric face
/// * face meshes: the face elements fully on the geometric face
pub fn ref_face_table<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    face: &SubShape,
    diagnostics: &mut Diagnostics,
) -> FaceEdgeTable {
    ref_face_table_parts(mesh, element_table, face, diagnostics).table
}

pub(crate) fn ref_edge_table_parts<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    edge: &SubShape,
    diagnostics: &mut Diagnostics,
) -> RefTable {
    let reference_nodes = mesh.nodes_by_edge(edge);
    let node_set: BTreeSet<usize> = reference_nodes.iter().copied().collect();

    let mesh_class = MeshClass::of(mesh);
    let raw = match mesh_class {
        Some(MeshClass::Solid) => {
            let candidates = elements_sharing_nodes(element_table, &node_set, 2);
            let subsets = nodes_on_reference(element_table, &candidates, &node_set);
            build_edges_of_volume_elements(&subsets, element_table, diagnostics)
        }
        Some(MeshClass::Face) => {
            let candidates = elements_sharing_nodes(element_table, &node_set, 2);
            nodes_on_reference(element_table, &candidates, &node_set)
        }
        Some(MeshClass::Edge) => {
            full_nodes(element_table, &elements_by_nodes(element_table, &node_set))
        }
        None => FaceEdgeTable::new(),
    };

    let table = match mesh_class {
        Some(MeshClass::Edge) | None => raw.clone(),
        _ => delete_duplicate_elements(&raw),
    };

    RefTable {
        reference_nodes,
        raw,
        table,
    }
}

pub(crate) fn ref_face_table_parts<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    face: &SubShape,
    diagnostics: &mut Diagnostics,
) -> RefTable {
    let reference_nodes = mesh.nodes_by_face(face);
    let node_set: BTreeSet<usize> = reference_nodes.iter().copied().collect();

    let mut deduplicate = false;
    let raw = match MeshClass::of(mesh) {
        Some(MeshClass::Solid) if !has_face_data(mesh) => {
            let candidates: Vec<usize> = match mesh.volumes_by_face(face) {
                Some(volumes) => {
                    log::info!("{}: volume elements found by the mesh's volumes-by-face query", face.key);
                    volumes
                        .into_iter()
                        .filter(|volume_id| element_table.contains_key(volume_id))
                        .collect()
                }
                None => {
                    log::info!("{}: volume elements found by counting face nodes", face.key);
                    volumes_by_face_nodes(element_table, &node_set, diagnostics)
                }
            };
            deduplicate = true;
            let subsets = nodes_on_reference(element_table, &candidates, &node_set);
            build_faces_of_volume_elements(&subsets, element_table, diagnostics)
        }
        Some(MeshClass::Solid) => mesh
            .faces_by_face(face)
            .into_iter()
            .filter_map(|face_id| {
                mesh.element_nodes(face_id)
                    .map(|nodes| (face_id, ElementNodes::from_slice(nodes)))
            })
            .collect(),
        Some(MeshClass::Face) => {
            full_nodes(element_table, &elements_by_nodes(element_table, &node_set))
        }
        Some(MeshClass::Edge) | None => FaceEdgeTable::new(),
    };

    let table = if deduplicate {
        delete_duplicate_elements(&raw)
    } else {
        raw.clone()
    };

    RefTable {
        reference_nodes,
        raw,
        table,
    }
}

/// Put the face nodes of volume elements in face order
///
/// `face_table` holds, per volume element, the nodes the element has on a face (in any order).
/// Volume elements whose face nodes match none of their faces are reported and left out.
pub fn build_faces_of_volume_elements(
    face_table: &FaceEdgeTable,
    element_table: &ElementTable,
    diagnostics: &mut Diagnostics,
) -> FaceEdgeTable {
    build_from_patterns(
        face_table,
        element_table,
        face_patterns,
        |element, node_count, local_indices| MeshIssue::FaceNotFound {
            element,
            node_count,
            local_indices,
        },
        diagnostics,
    )
}

/// Put the edge nodes of volume elements in edge order (end, end[, mid])
///
/// Volume elements whose edge nodes match none of their edges are reported and left out.
pub fn build_edges_of_volume_elements(
    edge_table: &FaceEdgeTable,
    element_table: &ElementTable,
    diagnostics: &mut Diagnostics,
) -> FaceEdgeTable {
    build_from_patterns(
        edge_table,
        element_table,
        edge_patterns,
        |element, node_count, local_indices| MeshIssue::EdgeNotFound {
            element,
            node_count,
            local_indices,
        },
        diagnostics,
    )
}

/// Remove entries whose node set was already recorded under a lower element ID
pub fn delete_duplicate_elements(table: &FaceEdgeTable) -> FaceEdgeTable {
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    table
        .iter()
        .filter(|(_, nodes)| {
            let mut sorted_nodes = nodes.to_vec();
            sorted_nodes.sort_unstable();
            seen.insert(sorted_nodes)
        })
        .map(|(element_id, nodes)| (*element_id, nodes.clone()))
        .collect()
}

// ----------------------------------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------------------------------

// the nodes of each element that are in `node_set`, in element order
fn nodes_on_reference(
    element_table: &ElementTable,
    element_ids: &[usize],
    node_set: &BTreeSet<usize>,
) -> FaceEdgeTable {
    element_ids
        .iter()
        .filter_map(|element_id| {
            element_table.get(element_id).map(|element_nodes| {
                (
                    *element_id,
                    element_nodes
                        .iter()
                        .filter(|node| node_set.contains(*node))
                        .copied()
                        .collect(),
                )
            })
        })
        .collect()
}

fn full_nodes(element_table: &ElementTable, element_ids: &[usize]) -> FaceEdgeTable {
    element_ids
        .iter()
        .filter_map(|element_id| {
            element_table
                .get(element_id)
                .map(|element_nodes| (*element_id, element_nodes.clone()))
        })
        .collect()
}

fn build_from_patterns(
    table: &FaceEdgeTable,
    element_table: &ElementTable,
    patterns_of: fn(ElementType) -> &'static [Pattern],
    not_found: impl Fn(usize, usize, Vec<u8>) -> MeshIssue,
    diagnostics: &mut Diagnostics,
) -> FaceEdgeTable {
    let mut ordered = FaceEdgeTable::new();

    for (element_id, sub_nodes) in table.iter() {
        let element_nodes = match element_table.get(element_id) {
            Some(element_nodes) => element_nodes,
            None => continue,
        };

        let kind = match ElementType::from_node_count(Dimension::Volume, element_nodes.len()) {
            Some(kind) => kind,
            None => {
                diagnostics.report(MeshIssue::UnknownElementType {
                    element: *element_id,
                    node_count: element_nodes.len(),
                    context: "volume",
                });
                continue;
            }
        };

        // local node number = index + 1
        let mut local_indices: Vec<u8> = sub_nodes
            .iter()
            .filter_map(|node| element_nodes.iter().position(|n| n == node))
            .map(|index| (index + 1) as u8)
            .collect();
        local_indices.sort_unstable();

        match canonical_order(patterns_of(kind), &local_indices) {
            Some(order) => {
                ordered.insert(
                    *element_id,
                    order
                        .iter()
                        .map(|local| element_nodes[*local as usize - 1])
                        .collect(),
                );
            }
            None => diagnostics.report(not_found(
                *element_id,
                element_nodes.len(),
                local_indices,
            )),
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_table::element_table;
    use crate::geometry::{Point, Shape, ShapeKey, ShapeKind, SubShapeName};
    use crate::mesh::Mesh;

    /// A mesh without the volumes-by-face query
    struct CountingMesh(Mesh);

    impl FemMesh for CountingMesh {
        fn nodes(&self) -> &BTreeMap<usize, Point> {
            self.0.nodes()
        }
        fn volume_ids(&self) -> Vec<usize> {
            self.0.volume_ids()
        }
        fn face_ids(&self) -> Vec<usize> {
            self.0.face_ids()
        }
        fn edge_ids(&self) -> Vec<usize> {
            self.0.edge_ids()
        }
        fn element_nodes(&self, element_id: usize) -> Option<&[usize]> {
            self.0.element_nodes(element_id)
        }
        fn nodes_by_vertex(&self, vertex: &SubShape) -> Vec<usize> {
            self.0.nodes_by_vertex(vertex)
        }
        fn nodes_by_edge(&self, edge: &SubShape) -> Vec<usize> {
            self.0.nodes_by_edge(edge)
        }
        fn nodes_by_face(&self, face: &SubShape) -> Vec<usize> {
            self.0.nodes_by_face(face)
        }
        fn nodes_by_solid(&self, solid: &SubShape) -> Vec<usize> {
            self.0.nodes_by_solid(solid)
        }
        fn faces_by_face(&self, face: &SubShape) -> Vec<usize> {
            self.0.faces_by_face(face)
        }
    }

    fn table_of(elements: &[(usize, &[usize])]) -> FaceEdgeTable {
        elements
            .iter()
            .map(|(id, nodes)| (*id, ElementNodes::from_slice(nodes)))
            .collect()
    }

    fn bar() -> (Mesh, Shape) {
        let mesh = Mesh::from_file("./test_input/hexa8_bar.json").unwrap();
        let shape_json =
            json::parse(&std::fs::read_to_string("./test_input/bar_shape.json").unwrap()).unwrap();
        (mesh, Shape::from_json(&shape_json).unwrap())
    }

    #[test]
    fn hexa8_top_face() {
        let element_table = table_of(&[(1, &[1, 2, 3, 4, 5, 6, 7, 8])]);
        let face_table = table_of(&[(1, &[5, 6, 7, 8])]);

        let mut diagnostics = Diagnostics::new();
        let faces = build_faces_of_volume_elements(&face_table, &element_table, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(faces[&1].as_slice(), &[5, 8, 7, 6]);
    }

    #[test]
    fn faces_are_reordered_from_global_ids() {
        // a hexa20 with arbitrary global IDs: global = 100 + local
        let element_nodes: Vec<usize> = (101..=120).collect();
        let element_table = table_of(&[(7, &element_nodes)]);

        let expected_faces: [[usize; 8]; 6] = [
            [101, 102, 103, 104, 109, 110, 111, 112],
            [105, 108, 107, 106, 116, 115, 114, 113],
            [101, 105, 106, 102, 117, 113, 118, 109],
            [103, 107, 108, 104, 119, 115, 120, 111],
            [101, 104, 108, 105, 112, 120, 116, 117],
            [102, 106, 107, 103, 118, 114, 119, 110],
        ];

        for expected in expected_faces {
            let face_nodes: Vec<usize> = expected.iter().rev().copied().collect();
            let face_table = table_of(&[(7, &face_nodes)]);

            let mut diagnostics = Diagnostics::new();
            let faces =
                build_faces_of_volume_elements(&face_table, &element_table, &mut diagnostics);

            assert!(diagnostics.is_empty());
            assert_eq!(faces[&7].as_slice(), &expected);
        }
    }

    #[test]
    fn every_volume_face_and_edge_reconstructs() {
        let volumes = [
            ElementType::Tetra4,
            ElementType::Tetra10,
            ElementType::Hexa8,
            ElementType::Hexa20,
            ElementType::Penta6,
            ElementType::Penta15,
        ];

        for kind in volumes {
            let element_nodes: Vec<usize> = (1..=kind.node_count()).map(|l| 10 * l).collect();
            let element_table = table_of(&[(1, &element_nodes)]);

            for (local, _) in face_patterns(kind).iter().chain(edge_patterns(kind)) {
                let sub_nodes: Vec<usize> = local.iter().map(|l| 10 * *l as usize).collect();
                let sub_table = table_of(&[(1, &sub_nodes)]);

                let mut diagnostics = Diagnostics::new();
                let built = if face_patterns(kind).iter().any(|(l, _)| l == local) {
                    build_faces_of_volume_elements(&sub_table, &element_table, &mut diagnostics)
                } else {
                    build_edges_of_volume_elements(&sub_table, &element_table, &mut diagnostics)
                };

                assert!(diagnostics.is_empty(), "{} {:?}", kind, local);
                let mut rebuilt = built[&1].to_vec();
                assert_eq!(rebuilt.len(), local.len());
                rebuilt.sort_unstable();
                assert_eq!(rebuilt, sub_nodes);
            }
        }
    }

    #[test]
    fn unmatched_face_is_reported() {
        let element_table = table_of(&[(3, &[1, 2, 3, 4, 5, 6, 7, 8]), (4, &[1, 2, 3, 4, 9])]);
        let face_table = table_of(&[(3, &[1, 2, 7, 8]), (4, &[1, 2, 3, 4])]);

        let mut diagnostics = Diagnostics::new();
        let faces = build_faces_of_volume_elements(&face_table, &element_table, &mut diagnostics);

        assert!(faces.is_empty());
        assert_eq!(
            diagnostics.issues(),
            &[
                MeshIssue::FaceNotFound {
                    element: 3,
                    node_count: 8,
                    local_indices: vec![1, 2, 7, 8],
                },
                MeshIssue::UnknownElementType {
                    element: 4,
                    node_count: 5,
                    context: "volume",
                },
            ]
        );
    }

    #[test]
    fn first_seen_wins() {
        let table = table_of(&[(4, &[3, 2, 1]), (2, &[7, 8, 9]), (9, &[1, 3, 2]), (5, &[1, 2, 4])]);
        let unique = delete_duplicate_elements(&table);

        assert_eq!(unique.keys().copied().collect::<Vec<_>>(), vec![2, 4, 5]);
        assert_eq!(unique[&4].as_slice(), &[3, 2, 1]);
    }

    #[test]
    fn bar_faces_and_edges() {
        let (mesh, shape) = bar();
        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);

        let face_3 = shape.element(&SubShapeName::named("Face3")).unwrap();
        let faces = ref_face_table(&mesh, &element_table, &face_3, &mut diagnostics);
        assert_eq!(faces.len(), 10);
        // element 1: nodes (0,0,0) (0,0,1) (1,0,1) (1,0,0)
        assert_eq!(faces[&1].as_slice(), &[1, 4, 8, 5]);

        let face_1 = shape.element(&SubShapeName::named("Face1")).unwrap();
        let faces = ref_face_table(&mesh, &element_table, &face_1, &mut diagnostics);
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[&1].as_slice(), &[1, 2, 3, 4]);

        let edge_1 = shape.element(&SubShapeName::named("Edge1")).unwrap();
        let edges = ref_edge_table(&mesh, &element_table, &edge_1, &mut diagnostics);
        assert_eq!(edges.len(), 10);
        assert!(edges
            .iter()
            .all(|(id, nodes)| nodes.as_slice() == [4 * (id - 1) + 1, 4 * id + 1]));

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn shared_edge_is_taken_once() {
        let (mesh, shape) = bar();
        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);

        // nodes 1 and 4 (the edge y = 0 of the x = 0 end face) belong to element 1 only
        let edge_2 = shape.element(&SubShapeName::named("Edge2")).unwrap();
        let parts = ref_edge_table_parts(&mesh, &element_table, &edge_2, &mut diagnostics);
        assert_eq!(parts.reference_nodes, vec![1, 4]);
        assert_eq!(parts.table.len(), 1);
        assert_eq!(parts.table[&1].as_slice(), &[4, 1]);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let (mesh, shape) = bar();
        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);
        let before = element_table.clone();

        let face_4 = shape.element(&SubShapeName::named("Face4")).unwrap();
        let first = ref_face_table(&mesh, &element_table, &face_4, &mut diagnostics);
        let second = ref_face_table(&mesh, &element_table, &face_4, &mut diagnostics);

        assert_eq!(first, second);
        assert_eq!(element_table, before);
    }

    #[test]
    fn duplicate_volume_edges_are_removed() {
        // two hexa8 sharing the face x = 1; the edge (1,0,0)-(1,1,0) lies on both
        let mut mesh = Mesh::blank();
        let mut id = 1;
        for x in 0..3 {
            for (y, z) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
                mesh.add_node(id, Point::new(x as f64, y, z)).unwrap();
                id += 1;
            }
        }
        mesh.add_element(1, ElementType::Hexa8, &[1, 2, 3, 4, 5, 6, 7, 8])
            .unwrap();
        mesh.add_element(2, ElementType::Hexa8, &[5, 6, 7, 8, 9, 10, 11, 12])
            .unwrap();
        mesh.add_group(ShapeKey::parse("Block:Edge5"), vec![5, 6]);

        let edge = SubShape {
            key: ShapeKey::parse("Block:Edge5"),
            kind: ShapeKind::Edge,
            length: 1.0,
            area: 0.0,
        };

        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);
        let parts = ref_edge_table_parts(&mesh, &element_table, &edge, &mut diagnostics);

        assert_eq!(parts.raw.len(), 2);
        assert_eq!(parts.raw[&1].as_slice(), &[5, 6]);
        assert_eq!(parts.raw[&2].as_slice(), &[5, 6]);
        assert_eq!(parts.table.len(), 1);
        assert!(parts.table.contains_key(&1));
    }

    #[test]
    fn tetra_faces_use_the_volumes_by_face_query() {
        let mut mesh = Mesh::blank();
        for (id, [x, y, z]) in [
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
        ] {
            mesh.add_node(id, Point::new(x, y, z)).unwrap();
        }
        mesh.add_element(1, ElementType::Tetra4, &[1, 2, 3, 4])
            .unwrap();
        mesh.add_group(ShapeKey::parse("Tet:Face2"), vec![1, 2, 4]);

        let face = SubShape {
            key: ShapeKey::parse("Tet:Face2"),
            kind: ShapeKind::Face,
            length: 0.0,
            area: 0.5,
        };

        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);
        let faces = ref_face_table(&mesh, &element_table, &face, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(faces[&1].as_slice(), &[1, 4, 2]);
    }

    #[test]
    fn face_mesh_tables_keep_element_order() {
        let mesh_json = json::parse(
            r#"{
                "Nodes": {
                    "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0], "3": [2.0, 0.0, 0.0],
                    "4": [0.0, 1.0, 0.0], "5": [1.0, 1.0, 0.0], "6": [2.0, 1.0, 0.0]
                },
                "Quad4Elem": { "1": [1, 2, 5, 4], "2": [2, 3, 6, 5] },
                "Groups": { "Plate:Face1": [1, 2, 3, 4, 5, 6], "Plate:Edge1": [1, 2, 3] }
            }"#,
        )
        .unwrap();
        let mesh = Mesh::from_json(&mesh_json).unwrap();

        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);

        let face = SubShape {
            key: ShapeKey::parse("Plate:Face1"),
            kind: ShapeKind::Face,
            length: 6.0,
            area: 2.0,
        };
        let faces = ref_face_table(&mesh, &element_table, &face, &mut diagnostics);
        assert_eq!(faces[&1].as_slice(), &[1, 2, 5, 4]);
        assert_eq!(faces[&2].as_slice(), &[2, 3, 6, 5]);

        let edge = SubShape {
            key: ShapeKey::parse("Plate:Edge1"),
            kind: ShapeKind::Edge,
            length: 2.0,
            area: 0.0,
        };
        let edges = ref_edge_table(&mesh, &element_table, &edge, &mut diagnostics);
        assert_eq!(edges[&1].as_slice(), &[1, 2]);
        assert_eq!(edges[&2].as_slice(), &[2, 3]);
    }

    #[test]
    fn faces_found_by_counting_face_nodes() {
        let (mesh, shape) = bar();
        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);
        let face_3 = shape.element(&SubShapeName::named("Face3")).unwrap();

        let queried = ref_face_table(&mesh, &element_table, &face_3, &mut diagnostics);
        let counted = ref_face_table(
            &CountingMesh(mesh.clone()),
            &element_table,
            &face_3,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
        assert_eq!(counted.len(), 10);
        assert_eq!(counted, queried);
    }

    #[test]
    fn mixed_wedge_and_tetra_faces() {
        let mut mesh = Mesh::blank();
        for (id, [x, y, z]) in [
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
            (5, [1.0, 0.0, 1.0]),
            (6, [0.0, 1.0, 1.0]),
            (7, [1.0, 1.0, 0.0]),
        ] {
            mesh.add_node(id, Point::new(x, y, z)).unwrap();
        }
        mesh.add_element(1, ElementType::Penta6, &[1, 2, 3, 4, 5, 6])
            .unwrap();
        mesh.add_element(2, ElementType::Tetra4, &[2, 7, 3, 5])
            .unwrap();
        mesh.add_group(ShapeKey::parse("Block:Face1"), vec![1, 2, 3, 7]);

        let face = SubShape {
            key: ShapeKey::parse("Block:Face1"),
            kind: ShapeKind::Face,
            length: 0.0,
            area: 1.0,
        };

        let mut diagnostics = Diagnostics::new();
        let element_table = element_table(&mesh, &mut diagnostics);
        let faces = ref_face_table(&mesh, &element_table, &face, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[&1].as_slice(), &[1, 2, 3]);
        assert_eq!(faces[&2].as_slice(), &[2, 7, 3]);
    }
}
