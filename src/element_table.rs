use crate::error::{Diagnostics, MeshIssue};
use crate::mesh::{element::ElementNodes, FemMesh, MeshClass};

use std::collections::BTreeMap;

/// `{ element_id : [node_id, node_id, ... , node_id] }` for the elements of a mesh's dominant dimension
pub type ElementTable = BTreeMap<usize, ElementNodes>;

/// Build the element table of a mesh
///
/// Only the dominant dimension is scanned: volumes of a solid mesh, faces of a face mesh, or edges of an edge mesh.
/// An empty table is returned (and an issue reported) if the mesh has no elements at all.
pub fn element_table<M: FemMesh + ?Sized>(mesh: &M, diagnostics: &mut Diagnostics) -> ElementTable {
    let element_ids = match MeshClass::of(mesh) {
        Some(MeshClass::Solid) => mesh.volume_ids(),
        Some(MeshClass::Face) => mesh.face_ids(),
        Some(MeshClass::Edge) => mesh.edge_ids(),
        None => {
            diagnostics.report(MeshIssue::UnclassifiedMesh);
            return ElementTable::new();
        }
    };

    element_ids
        .into_iter()
        .filter_map(|element_id| {
            mesh.element_nodes(element_id)
                .map(|nodes| (element_id, ElementNodes::from_slice(nodes)))
        })
        .collect()
}
