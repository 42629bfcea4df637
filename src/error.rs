use crate::geometry::{Measure, ShapeKey, ShapeKind};
use crate::reconstruct::FaceEdgeTable;

use log::Level;
use std::collections::BTreeSet;
use thiserror::Error;

/// Fatal errors raised while importing a mesh or shape from an interchange file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unable to read interchange file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse interchange file as JSON: {0}")]
    Json(#[from] json::Error),

    #[error("Malformed {context}: {message}")]
    Malformed { context: String, message: String },

    #[error("No nodes found")]
    NoNodes,

    #[error("No elements found")]
    NoElements,
}

impl ImportError {
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// A data-quality problem found while indexing a mesh or distributing a load
///
/// Issues never abort a computation: the offending element or reference is skipped
/// (or left in its partially computed state) and processing continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshIssue {
    // classification
    #[error("Neither solid nor face nor edge mesh")]
    UnclassifiedMesh,

    #[error("Element {element} with {node_count} nodes is not a known {context} element type")]
    UnknownElementType {
        element: usize,
        node_count: usize,
        context: &'static str,
    },

    #[error("Element {element} references node {node} which is not in the node table")]
    MissingNode { element: usize, node: usize },

    // resolution
    #[error("Reference shape {reference} is a {kind}; expected a Vertex, Edge, Face or Solid")]
    UnsupportedShapeKind {
        reference: ShapeKey,
        kind: ShapeKind,
    },

    #[error("Shape {shape} has no sub-element named {name}")]
    UnknownSubShape { shape: String, name: String },

    #[error("No mesh node lies on vertex {reference}")]
    NoNodeOnVertex { reference: ShapeKey },

    // reconstruction
    #[error("Volume element {element} ({node_count} nodes): no face matches local nodes {local_indices:?}")]
    FaceNotFound {
        element: usize,
        node_count: usize,
        local_indices: Vec<u8>,
    },

    #[error("Volume element {element} ({node_count} nodes): no edge matches local nodes {local_indices:?}")]
    EdgeNotFound {
        element: usize,
        node_count: usize,
        local_indices: Vec<u8>,
    },

    // conservation and partition
    #[error("Error on {load} --> {reference}: node {measure}s sum to {computed}, reference {measure} is {expected}")]
    ReferenceMeasureMismatch {
        load: String,
        reference: ShapeKey,
        measure: Measure,
        expected: f64,
        computed: f64,
        diagnostic: Box<MeasureDiagnostic>,
    },

    #[error(
        "{load}: node loads sum to {sum_node_load} for an applied load of {magnitude} (ratio {ratio:.4}); \
         node {measure}s sum to {sum_node_measure}, reference {measure}s to {sum_reference_measure}. \
         A closed edge or face (e.g. a full circle) referenced as one shape is a known cause"
    )]
    LoadSumMismatch {
        load: String,
        measure: Measure,
        ratio: f64,
        sum_node_measure: f64,
        sum_reference_measure: f64,
        sum_node_load: f64,
        magnitude: f64,
        last_bad_reference: Option<Box<MeasureDiagnostic>>,
    },

    #[error("{load}: the referenced shapes have zero total {measure}; load cannot be distributed")]
    ZeroReferenceMeasure { load: String, measure: Measure },

    #[error("Element sets hold {counted} elements; the element table holds {expected}")]
    ElementCountMismatch { expected: usize, counted: usize },

    #[error("Objects {objects:?} have no references; only one of them can take the remaining elements")]
    AmbiguousRemainder { objects: Vec<String> },

    #[error("Empty {context}")]
    EmptyInput { context: &'static str },
}

impl MeshIssue {
    /// Log level used when the issue is reported
    pub fn level(&self) -> Level {
        match self {
            Self::ReferenceMeasureMismatch { .. }
            | Self::LoadSumMismatch { .. }
            | Self::ZeroReferenceMeasure { .. } => Level::Warn,
            _ => Level::Error,
        }
    }

    /// True for the ±tolerance conservation checks of the load distributor
    pub fn is_conservation(&self) -> bool {
        matches!(
            self,
            Self::ReferenceMeasureMismatch { .. } | Self::LoadSumMismatch { .. }
        )
    }
}

/// Everything needed to inspect a reference whose node measures don't add up
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureDiagnostic {
    pub reference: ShapeKey,
    /// Mesh nodes the kernel associates with the reference
    pub reference_nodes: Vec<usize>,
    /// Face/Edge table before duplicate elements were removed
    pub raw_table: FaceEdgeTable,
    /// Face/Edge table used for the distribution
    pub table: FaceEdgeTable,
    /// (node, length or area) contributions; some nodes have more than one entry
    pub node_measures: Vec<(usize, f64)>,
}

impl MeasureDiagnostic {
    /// Sorted, unique nodes of the raw table (should equal the reference nodes)
    pub fn table_nodes(&self) -> Vec<usize> {
        self.raw_table
            .values()
            .flatten()
            .copied()
            .collect::<BTreeSet<usize>>()
            .into_iter()
            .collect()
    }
}

/// Collects the [MeshIssue]s reported by an operation, logging each one as it arrives
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    issues: Vec<MeshIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn report(&mut self, issue: MeshIssue) {
        log::log!(issue.level(), "{}", issue);
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[MeshIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Number of reported issues matching a predicate
    pub fn count(&self, filter: impl Fn(&MeshIssue) -> bool) -> usize {
        self.issues.iter().filter(|issue| filter(issue)).count()
    }
}
