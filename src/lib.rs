//! Indexing tools for finite element meshes generated from a geometric model, and the
//! distribution of boundary loads onto mesh nodes
//!
//! A typical load case:
//! ```no_run
//! use fem_mesh_tools::*;
//! use std::sync::Arc;
//!
//! let mesh = Mesh::from_file("./test_input/hexa8_bar.json").unwrap();
//! let shape_json = json::parse(&std::fs::read_to_string("./test_input/bar_shape.json").unwrap()).unwrap();
//! let bar = Arc::new(Shape::from_json(&shape_json).unwrap());
//!
//! let mut diagnostics = Diagnostics::new();
//! let table = element_table(&mesh, &mut diagnostics);
//!
//! let pressure = LoadObject::new("Pressure", 100.0, vec![Reference::named(bar, &["Face3"])]);
//! let node_loads = face_node_loads(&mesh, &table, &pressure, &DistributionOptions::default(), &mut diagnostics);
//!
//! assert!(diagnostics.is_empty());
//! println!("{:?}", merge_node_loads(&node_loads));
//! ```

/// Mesh-to-property element partitions and node set membership
pub mod classify;
/// Tolerances and load distribution settings
pub mod config;
/// The element table of a mesh
pub mod element_table;
/// Import errors and the data-quality issues reported by the mesh tools
pub mod error;
/// Shapes, sub-shapes and references from the geometric model
pub mod geometry;
/// Load distribution onto mesh nodes
pub mod loads;
/// The finite element mesh interface and an in-memory implementation
pub mod mesh;
/// Ordered mesh faces and edges on geometric faces and edges
pub mod reconstruct;
/// Mesh nodes and elements of geometric references
pub mod resolve;

pub use classify::{element_sets, ElementSet, PropertyKind, PropertyObject};
pub use config::{DistributionOptions, QuadAreaRule};
pub use element_table::{element_table, ElementTable};
pub use error::{Diagnostics, ImportError, MeasureDiagnostic, MeshIssue};
pub use geometry::{Point, Reference, Shape, ShapeKey, ShapeKind, SubShape, SubShapeName, Vector};
pub use loads::{
    edge_node_loads, face_node_loads, merge_node_loads, vertex_node_loads, LoadObject,
    NodeLoadTable, RefNodeLoads,
};
pub use mesh::{element::ElementType, FemMesh, Mesh, MeshClass};
pub use reconstruct::{ref_edge_table, ref_face_table, FaceEdgeTable};
pub use resolve::{elements_by_references, nodes_by_references};
