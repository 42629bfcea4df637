use crate::element_table::ElementTable;
use crate::error::{Diagnostics, MeshIssue};
use crate::geometry::Reference;
use crate::mesh::FemMesh;
use crate::resolve::elements_by_references;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use std::collections::BTreeSet;

// ----------------------------------------------------------------------------------------------------
// Node Set Membership
// ----------------------------------------------------------------------------------------------------

/// Elements whose nodes are all in `nodes` (ascending element ID)
pub fn elements_by_nodes(element_table: &ElementTable, nodes: &BTreeSet<usize>) -> Vec<usize> {
    element_table
        .iter()
        .filter(|(_, element_nodes)| element_nodes.iter().all(|node| nodes.contains(node)))
        .map(|(element_id, _)| *element_id)
        .collect()
}

/// Hexa and penta volume elements with one of their faces in `face_nodes`
///
/// An element qualifies if the number of its nodes found in `face_nodes` is the node count of one of its faces:
///
/// | volume nodes | face nodes |
/// |---|---|
/// | 8 | 4 |
/// | 20 | 8 |
/// | 6 | 3 or 4 |
/// | 15 | 6 or 8 |
///
/// Pentahedra accept both counts since they have triangular and quadrilateral faces.
/// Elements with any other node count are reported and skipped.
pub fn volumes_by_face_nodes(
    element_table: &ElementTable,
    face_nodes: &BTreeSet<usize>,
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    let mut volumes = Vec::new();
    for (element_id, element_nodes) in element_table.iter() {
        let on_face = element_nodes
            .iter()
            .filter(|node| face_nodes.contains(*node))
            .count();

        let accepted = match element_nodes.len() {
            8 => on_face == 4,
            20 => on_face == 8,
            6 => on_face == 3 || on_face == 4,
            15 => on_face == 6 || on_face == 8,
            node_count => {
                diagnostics.report(MeshIssue::UnknownElementType {
                    element: *element_id,
                    node_count,
                    context: "hexa or penta volume",
                });
                false
            }
        };

        if accepted {
            volumes.push(*element_id);
        }
    }
    volumes
}

/// Elements with at least `min_shared` nodes in `nodes`
pub fn elements_sharing_nodes(
    element_table: &ElementTable,
    nodes: &BTreeSet<usize>,
    min_shared: usize,
) -> Vec<usize> {
    element_table
        .iter()
        .filter(|(_, element_nodes)| {
            element_nodes
                .iter()
                .filter(|node| nodes.contains(*node))
                .count()
                >= min_shared
        })
        .map(|(element_id, _)| *element_id)
        .collect()
}

// ----------------------------------------------------------------------------------------------------
// Property Element Sets
// ----------------------------------------------------------------------------------------------------

/// The kinds of property object that claim mesh elements
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKind {
    Material { name: String },
    BeamSection { width: f64, height: f64 },
    ShellThickness { thickness: f64 },
}

impl PropertyKind {
    /// Short element set label, unique given the object's position in its list
    pub fn short_name(&self, index: usize) -> String {
        match self {
            Self::Material { .. } => format!("Mat{}", index),
            Self::BeamSection { .. } => format!("Beam{}", index),
            Self::ShellThickness { .. } => format!("Shell{}", index),
        }
    }
}

/// A material, beam section or shell thickness along with the shapes it applies to
///
/// An object without references applies to every element not claimed by another object
#[derive(Clone, Debug)]
pub struct PropertyObject {
    pub name: String,
    pub kind: PropertyKind,
    pub references: Vec<Reference>,
}

impl PropertyObject {
    pub fn new(name: impl Into<String>, kind: PropertyKind, references: Vec<Reference>) -> Self {
        Self {
            name: name.into(),
            kind,
            references,
        }
    }
}

/// The mesh elements assigned to one [PropertyObject]
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSet {
    pub object: String,
    pub short_name: String,
    pub elements: Vec<usize>,
}

impl ElementSet {
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "object": self.object.clone(),
            "short_name": self.short_name.clone(),
            "elements": JsonValue::from(self.elements.clone()),
        }
    }
}

/// Partition the elements of `element_table` among a list of property objects
///
/// Each object with references gets the elements fully covered by its references' nodes.
/// The first object without references gets every element no other object claimed; further
/// unreferenced objects are reported and receive nothing. The summed set sizes are checked against the table size.
pub fn element_sets<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    objects: &[PropertyObject],
    diagnostics: &mut Diagnostics,
) -> Vec<ElementSet> {
    let mut sets: Vec<ElementSet> = objects
        .iter()
        .enumerate()
        .map(|(i, object)| ElementSet {
            object: object.name.clone(),
            short_name: object.kind.short_name(i),
            elements: Vec::new(),
        })
        .collect();

    let mut count = 0;
    let mut referenced = BTreeSet::new();
    let mut unreferenced = Vec::new();

    for (i, object) in objects.iter().enumerate() {
        if object.references.is_empty() {
            unreferenced.push(i);
            continue;
        }
        let elements =
            elements_by_references(mesh, element_table, &object.references, diagnostics);
        count += elements.len();
        referenced.extend(elements.iter().copied());
        sets[i].elements = elements;
    }

    if unreferenced.len() > 1 {
        diagnostics.report(MeshIssue::AmbiguousRemainder {
            objects: unreferenced
                .iter()
                .map(|i| objects[*i].name.clone())
                .collect(),
        });
    }
    if let Some(remainder_target) = unreferenced.first() {
        let remaining: Vec<usize> = element_table
            .keys()
            .filter(|element_id| !referenced.contains(*element_id))
            .copied()
            .collect();
        count += remaining.len();
        sets[*remainder_target].elements = remaining;
    }

    element_count_ok(element_table, count, diagnostics);
    sets
}

/// Does `count` equal the number of elements in `element_table`
pub fn element_count_ok(
    element_table: &ElementTable,
    count: usize,
    diagnostics: &mut Diagnostics,
) -> bool {
    if count == element_table.len() {
        true
    } else {
        diagnostics.report(MeshIssue::ElementCountMismatch {
            expected: element_table.len(),
            counted: count,
        });
        false
    }
}
