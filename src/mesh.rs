/// Element types, dimensions and node sequences
pub mod element;

use crate::error::ImportError;
use crate::geometry::{Point, ShapeKey, SubShape};
use crate::reconstruct::canonical::face_patterns;
use element::{Dimension, Element, ElementType};

use json::JsonValue;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::read_to_string;

/// The queries the mesh tools need from a finite element mesh
///
/// Node-by-shape queries link the mesh to the geometric model it was generated from.
/// Every query returns freshly allocated data; implementations are never mutated.
pub trait FemMesh {
    /// Coordinates of every node by node ID
    fn nodes(&self) -> &BTreeMap<usize, Point>;

    /// IDs of all volume elements, ascending
    fn volume_ids(&self) -> Vec<usize>;
    /// IDs of all face elements, ascending
    fn face_ids(&self) -> Vec<usize>;
    /// IDs of all edge elements, ascending
    fn edge_ids(&self) -> Vec<usize>;

    fn volume_count(&self) -> usize {
        self.volume_ids().len()
    }

    fn face_count(&self) -> usize {
        self.face_ids().len()
    }

    fn edge_count(&self) -> usize {
        self.edge_ids().len()
    }

    /// Ordered node IDs of any element
    fn element_nodes(&self, element_id: usize) -> Option<&[usize]>;

    fn nodes_by_vertex(&self, vertex: &SubShape) -> Vec<usize>;
    fn nodes_by_edge(&self, edge: &SubShape) -> Vec<usize>;
    fn nodes_by_face(&self, face: &SubShape) -> Vec<usize>;
    fn nodes_by_solid(&self, solid: &SubShape) -> Vec<usize>;

    /// Explicit face elements lying on a geometric face
    fn faces_by_face(&self, face: &SubShape) -> Vec<usize>;

    /// Volume elements with one of their faces on a geometric face
    ///
    /// `None` if the mesh can't answer this query; callers then fall back to counting face nodes
    fn volumes_by_face(&self, _face: &SubShape) -> Option<Vec<usize>> {
        None
    }
}

/// A mesh is exactly one of these, decided by the highest dimension it holds elements of
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshClass {
    /// has volume elements
    Solid,
    /// no volumes, has faces
    Face,
    /// only line elements
    Edge,
}

impl MeshClass {
    /// Classify a mesh. Returns `None` if it has no elements at all
    pub fn of<M: FemMesh + ?Sized>(mesh: &M) -> Option<Self> {
        if mesh.volume_count() > 0 {
            Some(Self::Solid)
        } else if mesh.face_count() > 0 {
            Some(Self::Face)
        } else if mesh.edge_count() > 0 {
            Some(Self::Edge)
        } else {
            None
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Solid => Dimension::Volume,
            Self::Face => Dimension::Face,
            Self::Edge => Dimension::Edge,
        }
    }
}

/// A solid mesh may or may not carry explicit face elements next to its volumes
pub fn has_face_data<M: FemMesh + ?Sized>(mesh: &M) -> bool {
    mesh.face_count() > 0
}

/// An in-memory finite element mesh
///
/// Geometric association is given by node groups keyed by [ShapeKey]; they stand in for
/// the node-by-shape queries of a mesher that knows the geometry it meshed.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub nodes: BTreeMap<usize, Point>,
    pub elements: BTreeMap<usize, Element>,
    groups: BTreeMap<ShapeKey, Vec<usize>>,
}

impl Mesh {
    /// Construct a completely empty Mesh
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: usize, coords: Point) -> Result<(), ImportError> {
        if self.nodes.insert(id, coords).is_some() {
            return Err(ImportError::malformed(
                "mesh",
                format!("node {} is defined more than once", id),
            ));
        }
        Ok(())
    }

    pub fn add_element(
        &mut self,
        id: usize,
        kind: ElementType,
        nodes: &[usize],
    ) -> Result<(), ImportError> {
        if nodes.len() != kind.node_count() {
            return Err(ImportError::malformed(
                "mesh",
                format!(
                    "{} element {} has {} nodes; expected {}",
                    kind,
                    id,
                    nodes.len(),
                    kind.node_count()
                ),
            ));
        }
        if let Some(missing) = nodes.iter().find(|node_id| !self.nodes.contains_key(*node_id)) {
            return Err(ImportError::malformed(
                "mesh",
                format!("{} element {} references unknown node {}", kind, id, missing),
            ));
        }
        if self.elements.contains_key(&id) {
            return Err(ImportError::malformed(
                "mesh",
                format!("element {} is defined more than once", id),
            ));
        }

        self.elements.insert(id, Element::new(id, kind, nodes));
        Ok(())
    }

    /// Associate a set of nodes with a shape or sub-shape
    pub fn add_group(&mut self, key: ShapeKey, mut nodes: Vec<usize>) {
        nodes.sort_unstable();
        nodes.dedup();
        self.groups.insert(key, nodes);
    }

    pub fn group(&self, key: &ShapeKey) -> Option<&[usize]> {
        self.groups.get(key).map(|nodes| nodes.as_slice())
    }

    /// Construct a Mesh from a JSON file (see [Mesh::from_json] for the format)
    pub fn from_file(path: impl AsRef<str>) -> Result<Self, ImportError> {
        let mesh_file_contents = read_to_string(path.as_ref())?;
        let mesh_file_json = json::parse(&mesh_file_contents)?;
        Self::from_json(&mesh_file_json)
    }

    /// Construct a Mesh from a JSON interchange object with the following format
    ///
    /// Node and element IDs are object keys. Each element type has its own connectivity table;
    /// tables for unused types can be omitted.
    ///
    /// ```text
    ///     4 *----------* 3
    ///       |          |
    ///       |    1     |
    ///       |          |
    ///     1 *----------* 2
    /// ```
    ///
    /// mesh.json
    /// ```JSON
    /// {
    ///     "Nodes": {
    ///         "1": [0.0, 0.0, 0.0],
    ///         "2": [1.0, 0.0, 0.0],
    ///         "3": [1.0, 1.0, 0.0],
    ///         "4": [0.0, 1.0, 0.0]
    ///     },
    ///     "Quad4Elem": {
    ///         "1": [1, 2, 3, 4]
    ///     },
    ///     "Groups": {
    ///         "Plate:Face1": [1, 2, 3, 4],
    ///         "Plate:Edge1": [1, 2]
    ///     }
    /// }
    /// ```
    ///
    /// Recognized element tables: `Seg2Elem`, `Seg3Elem`, `Tria3Elem`, `Tria6Elem`, `Quad4Elem`, `Quad8Elem`,
    /// `Tetra4Elem`, `Tetra10Elem`, `Penta6Elem`, `Penta15Elem`, `Hexa8Elem`, `Hexa20Elem`
    pub fn from_json(mesh_json: &JsonValue) -> Result<Self, ImportError> {
        let mut mesh = Self::blank();

        if !mesh_json["Nodes"].is_object() || mesh_json["Nodes"].is_empty() {
            return Err(ImportError::NoNodes);
        }
        for (node_key, node_json) in mesh_json["Nodes"].entries() {
            let id = parse_id(node_key, "node")?;
            mesh.add_node(id, parse_point(node_json, id)?)?;
        }

        if ElementType::ALL
            .iter()
            .all(|kind| mesh_json[kind.interchange_key()].is_empty())
        {
            return Err(ImportError::NoElements);
        }
        for kind in ElementType::ALL {
            let table = &mesh_json[kind.interchange_key()];
            if table.is_null() {
                continue;
            }
            if !table.is_object() {
                return Err(ImportError::malformed(
                    kind.interchange_key(),
                    "element tables must be objects",
                ));
            }

            for (element_key, element_json) in table.entries() {
                let id = parse_id(element_key, kind.interchange_key())?;
                let node_ids = element_json
                    .members()
                    .map(|node_json| {
                        node_json.as_usize().ok_or_else(|| {
                            ImportError::malformed(
                                kind.interchange_key(),
                                format!("node ids of element {} must be positive integers", id),
                            )
                        })
                    })
                    .collect::<Result<Vec<usize>, ImportError>>()?;
                mesh.add_element(id, kind, &node_ids)?;
            }
        }

        let groups = &mesh_json["Groups"];
        if !groups.is_null() && !groups.is_object() {
            return Err(ImportError::malformed(
                "Groups",
                "node groups must be an object of node id arrays",
            ));
        }
        for (group_key, group_json) in groups.entries() {
            let node_ids = group_json
                .members()
                .map(|node_json| {
                    node_json
                        .as_usize()
                        .filter(|node_id| mesh.nodes.contains_key(node_id))
                        .ok_or_else(|| {
                            ImportError::malformed(
                                "Groups",
                                format!("{} must only list known node ids", group_key),
                            )
                        })
                })
                .collect::<Result<Vec<usize>, ImportError>>()?;
            mesh.add_group(ShapeKey::parse(group_key), node_ids);
        }

        let counts = mesh.element_type_counts();
        log::info!(
            "imported mesh: {} nodes, {}",
            mesh.nodes.len(),
            ElementType::ALL
                .iter()
                .map(|kind| format!("{} {}", counts.get(kind).unwrap_or(&0), kind))
                .collect::<Vec<String>>()
                .join(", ")
        );

        Ok(mesh)
    }

    /// Number of elements of each type present in the mesh
    pub fn element_type_counts(&self) -> BTreeMap<ElementType, usize> {
        let mut counts = BTreeMap::new();
        for element in self.elements.values() {
            *counts.entry(element.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn element(&self, element_id: usize) -> Option<&Element> {
        self.elements.get(&element_id)
    }

    fn ids_of(&self, dimension: Dimension) -> Vec<usize> {
        self.elements
            .values()
            .filter(|element| element.dimension() == dimension)
            .map(|element| element.id)
            .collect()
    }

    fn count_of(&self, dimension: Dimension) -> usize {
        self.elements
            .values()
            .filter(|element| element.dimension() == dimension)
            .count()
    }

    fn group_nodes(&self, sub_shape: &SubShape) -> Vec<usize> {
        self.group(&sub_shape.key)
            .map(|nodes| nodes.to_vec())
            .unwrap_or_default()
    }
}

impl FemMesh for Mesh {
    fn nodes(&self) -> &BTreeMap<usize, Point> {
        &self.nodes
    }

    fn volume_ids(&self) -> Vec<usize> {
        self.ids_of(Dimension::Volume)
    }

    fn face_ids(&self) -> Vec<usize> {
        self.ids_of(Dimension::Face)
    }

    fn edge_ids(&self) -> Vec<usize> {
        self.ids_of(Dimension::Edge)
    }

    fn volume_count(&self) -> usize {
        self.count_of(Dimension::Volume)
    }

    fn face_count(&self) -> usize {
        self.count_of(Dimension::Face)
    }

    fn edge_count(&self) -> usize {
        self.count_of(Dimension::Edge)
    }

    fn element_nodes(&self, element_id: usize) -> Option<&[usize]> {
        self.elements
            .get(&element_id)
            .map(|element| element.nodes.as_slice())
    }

    fn nodes_by_vertex(&self, vertex: &SubShape) -> Vec<usize> {
        self.group_nodes(vertex)
    }

    fn nodes_by_edge(&self, edge: &SubShape) -> Vec<usize> {
        self.group_nodes(edge)
    }

    fn nodes_by_face(&self, face: &SubShape) -> Vec<usize> {
        self.group_nodes(face)
    }

    fn nodes_by_solid(&self, solid: &SubShape) -> Vec<usize> {
        self.group_nodes(solid)
    }

    fn faces_by_face(&self, face: &SubShape) -> Vec<usize> {
        let face_nodes: BTreeSet<usize> = self.group_nodes(face).into_iter().collect();
        self.elements
            .values()
            .filter(|element| element.dimension() == Dimension::Face)
            .filter(|element| element.nodes.iter().all(|node| face_nodes.contains(node)))
            .map(|element| element.id)
            .collect()
    }

    /// Answered whenever the mesh holds volume elements
    ///
    /// A volume element qualifies if all nodes of one of its faces are on the geometric face.
    fn volumes_by_face(&self, face: &SubShape) -> Option<Vec<usize>> {
        if self.volume_count() == 0 {
            return None;
        }

        let face_nodes: BTreeSet<usize> = self.group_nodes(face).into_iter().collect();
        let volumes = self
            .elements
            .values()
            .filter(|element| element.dimension() == Dimension::Volume)
            .filter(|element| {
                face_patterns(element.kind).iter().any(|(local, _)| {
                    local
                        .iter()
                        .all(|l| face_nodes.contains(&element.nodes[*l as usize - 1]))
                })
            })
            .map(|element| element.id)
            .collect();

        Some(volumes)
    }
}

fn parse_id(key: &str, context: &str) -> Result<usize, ImportError> {
    key.trim().parse::<usize>().map_err(|_| {
        ImportError::malformed(context, format!("'{}' is not a positive integer id", key))
    })
}

fn parse_point(node_json: &JsonValue, id: usize) -> Result<Point, ImportError> {
    let coords: Vec<f64> = node_json.members().filter_map(|c| c.as_f64()).collect();
    if !node_json.is_array() || coords.len() != 3 || node_json.len() != 3 {
        return Err(ImportError::malformed(
            "Nodes",
            format!("node {} must be an array of 3 numerical values", id),
        ));
    }
    Ok(Point::new(coords[0], coords[1], coords[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ShapeKind, SubShapeName};

    fn face_of(shape: &str, name: &str) -> SubShape {
        SubShape {
            key: ShapeKey::new(shape, SubShapeName::named(name)),
            kind: ShapeKind::Face,
            length: 0.0,
            area: 0.0,
        }
    }

    #[test]
    fn mesh_from_file() {
        let mesh = Mesh::from_file("./test_input/hexa8_bar.json").unwrap();

        assert_eq!(mesh.nodes.len(), 44);
        assert_eq!(mesh.volume_count(), 10);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(MeshClass::of(&mesh), Some(MeshClass::Solid));
        assert!(!has_face_data(&mesh));

        assert_eq!(mesh.element_type_counts()[&ElementType::Hexa8], 10);
        assert_eq!(mesh.element_nodes(1).unwrap().len(), 8);

        let end_face = mesh.nodes_by_face(&face_of("Bar", "Face1"));
        assert_eq!(end_face.len(), 4);
        assert!(end_face
            .iter()
            .all(|node_id| mesh.nodes[node_id].x.abs() < 1e-14));

        assert_eq!(mesh.volumes_by_face(&face_of("Bar", "Face1")), Some(vec![1]));
        assert_eq!(
            mesh.volumes_by_face(&face_of("Bar", "Face3")),
            Some((1..=10).collect::<Vec<usize>>())
        );
    }

    #[test]
    fn mesh_classification() {
        let mut mesh = Mesh::blank();
        assert_eq!(MeshClass::of(&mesh), None);

        for (id, x) in [(1, 0.0), (2, 1.0), (3, 2.0)] {
            mesh.add_node(id, Point::new(x, 0.0, 0.0)).unwrap();
        }
        mesh.add_element(1, ElementType::Seg2, &[1, 2]).unwrap();
        assert_eq!(MeshClass::of(&mesh), Some(MeshClass::Edge));

        mesh.add_node(4, Point::new(0.0, 1.0, 0.0)).unwrap();
        mesh.add_element(2, ElementType::Tria3, &[1, 2, 4]).unwrap();
        assert_eq!(MeshClass::of(&mesh), Some(MeshClass::Face));
        assert_eq!(MeshClass::Face.dimension(), Dimension::Face);

        mesh.add_node(5, Point::new(0.0, 0.0, 1.0)).unwrap();
        mesh.add_element(3, ElementType::Tetra4, &[1, 2, 4, 5])
            .unwrap();
        assert_eq!(MeshClass::of(&mesh), Some(MeshClass::Solid));
        assert!(has_face_data(&mesh));
    }

    #[test]
    fn tetra_volumes_by_face() {
        let mut mesh = Mesh::blank();
        for (id, [x, y, z]) in [
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
        ] {
            mesh.add_node(id, Point::new(x, y, z)).unwrap();
        }
        mesh.add_element(7, ElementType::Tetra4, &[1, 2, 3, 4])
            .unwrap();
        mesh.add_group(ShapeKey::parse("Tet:Face1"), vec![3, 1, 2]);
        mesh.add_group(ShapeKey::parse("Tet:Edge1"), vec![1, 2]);

        assert_eq!(mesh.volumes_by_face(&face_of("Tet", "Face1")), Some(vec![7]));
        assert_eq!(mesh.volumes_by_face(&face_of("Tet", "Edge1")), Some(vec![]));
        assert_eq!(mesh.group(&ShapeKey::parse("Tet:Face1")), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn volumes_by_face_in_mixed_mesh() {
        // a wedge and a tetra sharing the edge 2-3, both with a triangle on z = 0
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
        mesh.add_group(ShapeKey::parse("Block:Face2"), vec![1, 2, 4, 5]);

        assert_eq!(mesh.volumes_by_face(&face_of("Block", "Face1")), Some(vec![1, 2]));
        assert_eq!(mesh.volumes_by_face(&face_of("Block", "Face2")), Some(vec![1]));

        let mut edges_only = Mesh::blank();
        edges_only.add_node(1, Point::new(0.0, 0.0, 0.0)).unwrap();
        edges_only.add_node(2, Point::new(1.0, 0.0, 0.0)).unwrap();
        edges_only.add_element(1, ElementType::Seg2, &[1, 2]).unwrap();
        assert_eq!(edges_only.volumes_by_face(&face_of("Line", "Face1")), None);
    }

    #[test]
    fn faces_by_face_with_face_data() {
        let mesh_json = json::parse(
            r#"{
                "Nodes": {
                    "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0], "3": [0.0, 1.0, 0.0], "4": [0.0, 0.0, 1.0]
                },
                "Tetra4Elem": { "1": [1, 2, 3, 4] },
                "Tria3Elem": { "2": [1, 3, 2], "3": [1, 2, 4] },
                "Groups": { "Tet:Face1": [1, 2, 3] }
            }"#,
        )
        .unwrap();
        let mesh = Mesh::from_json(&mesh_json).unwrap();

        assert!(has_face_data(&mesh));
        assert_eq!(mesh.faces_by_face(&face_of("Tet", "Face1")), vec![2]);
    }

    #[test]
    fn import_without_nodes() {
        let mesh_json = json::parse(r#"{ "Nodes": {}, "Seg2Elem": { "1": [1, 2] } }"#).unwrap();
        assert!(matches!(
            Mesh::from_json(&mesh_json),
            Err(ImportError::NoNodes)
        ));
    }

    #[test]
    fn import_without_elements() {
        let mesh_json = json::parse(r#"{ "Nodes": { "1": [0.0, 0.0, 0.0] } }"#).unwrap();
        assert!(matches!(
            Mesh::from_json(&mesh_json),
            Err(ImportError::NoElements)
        ));
    }

    #[test]
    fn import_unknown_node() {
        let mesh_json = json::parse(
            r#"{ "Nodes": { "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0] }, "Seg2Elem": { "1": [1, 3] } }"#,
        )
        .unwrap();
        assert!(matches!(
            Mesh::from_json(&mesh_json),
            Err(ImportError::Malformed { .. })
        ));
    }

    #[test]
    fn import_wrong_node_count() {
        let mesh_json = json::parse(
            r#"{ "Nodes": { "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0] }, "Seg3Elem": { "1": [1, 2] } }"#,
        )
        .unwrap();
        assert!(Mesh::from_json(&mesh_json).is_err());
    }

    #[test]
    fn import_bad_coordinates() {
        let mesh_json = json::parse(
            r#"{ "Nodes": { "1": [0.0, 0.0], "2": [1.0, 0.0, 0.0] }, "Seg2Elem": { "1": [1, 2] } }"#,
        )
        .unwrap();
        assert!(Mesh::from_json(&mesh_json).is_err());
    }

    #[test]
    fn import_duplicate_element_id() {
        let mesh_json = json::parse(
            r#"{
                "Nodes": { "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0], "3": [1.0, 1.0, 0.0] },
                "Seg2Elem": { "1": [1, 2] },
                "Tria3Elem": { "1": [1, 2, 3] }
            }"#,
        )
        .unwrap();
        assert!(Mesh::from_json(&mesh_json).is_err());
    }

    #[test]
    fn import_groups_must_be_an_object() {
        let mesh_json = json::parse(
            r#"{
                "Nodes": { "1": [0.0, 0.0, 0.0], "2": [1.0, 0.0, 0.0] },
                "Seg2Elem": { "1": [1, 2] },
                "Groups": [[1, 2]]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            Mesh::from_json(&mesh_json),
            Err(ImportError::Malformed { ref context, .. }) if context == "Groups"
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Mesh::from_file("./test_input/does_not_exist.json"),
            Err(ImportError::Io(_))
        ));
    }
}
