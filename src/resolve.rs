use crate::classify::elements_by_nodes;
use crate::element_table::ElementTable;
use crate::error::{Diagnostics, MeshIssue};
use crate::geometry::{Reference, ShapeKind, SubShape};
use crate::mesh::FemMesh;

use std::collections::BTreeSet;

/// Look up every sub-element named by a reference on its shape
///
/// Names the shape doesn't have are reported and skipped
pub fn resolve_sub_shapes(reference: &Reference, diagnostics: &mut Diagnostics) -> Vec<SubShape> {
    let mut sub_shapes = Vec::with_capacity(reference.elements.len());
    for name in reference.elements.iter() {
        match reference.shape.element(name) {
            Some(sub_shape) => sub_shapes.push(sub_shape),
            None => diagnostics.report(MeshIssue::UnknownSubShape {
                shape: reference.shape.name.clone(),
                name: name.to_string(),
            }),
        }
    }
    sub_shapes
}

/// Mesh nodes incident to a single sub-shape, dispatched on its kind
///
/// Kinds other than Vertex, Edge, Face and Solid are reported and yield no nodes
pub fn nodes_by_sub_shape<M: FemMesh + ?Sized>(
    mesh: &M,
    sub_shape: &SubShape,
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    log::debug!("ReferenceShape: {}, {}", sub_shape.kind, sub_shape.key);

    match sub_shape.kind {
        ShapeKind::Vertex => mesh.nodes_by_vertex(sub_shape),
        ShapeKind::Edge => mesh.nodes_by_edge(sub_shape),
        ShapeKind::Face => mesh.nodes_by_face(sub_shape),
        ShapeKind::Solid => mesh.nodes_by_solid(sub_shape),
        kind => {
            diagnostics.report(MeshIssue::UnsupportedShapeKind {
                reference: sub_shape.key.clone(),
                kind,
            });
            Vec::new()
        }
    }
}

/// Mesh nodes of every sub-element of a reference
///
/// Nodes shared between sub-elements appear once per sub-element
pub fn nodes_by_reference<M: FemMesh + ?Sized>(
    mesh: &M,
    reference: &Reference,
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    resolve_sub_shapes(reference, diagnostics)
        .iter()
        .flat_map(|sub_shape| nodes_by_sub_shape(mesh, sub_shape, diagnostics))
        .collect()
}

/// Unique mesh nodes of a list of references (sorted by node ID)
pub fn nodes_by_references<M: FemMesh + ?Sized>(
    mesh: &M,
    references: &[Reference],
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    node_set_of_references(mesh, references, diagnostics)
        .into_iter()
        .collect()
}

/// Elements whose nodes all lie in the union of the nodes of a list of references
pub fn elements_by_references<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    references: &[Reference],
    diagnostics: &mut Diagnostics,
) -> Vec<usize> {
    let nodes = node_set_of_references(mesh, references, diagnostics);
    elements_by_nodes(element_table, &nodes)
}

fn node_set_of_references<M: FemMesh + ?Sized>(
    mesh: &M,
    references: &[Reference],
    diagnostics: &mut Diagnostics,
) -> BTreeSet<usize> {
    let mut nodes = BTreeSet::new();
    for reference in references {
        nodes.extend(nodes_by_reference(mesh, reference, diagnostics));
    }
    nodes
}
