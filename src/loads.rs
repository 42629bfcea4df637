/// Per-node shares of mesh edge lengths and mesh face areas
pub mod weights;

use crate::config::DistributionOptions;
use crate::element_table::ElementTable;
use crate::error::{Diagnostics, MeasureDiagnostic, MeshIssue};
use crate::geometry::{Measure, Reference, ShapeKey, SubShape, Vector};
use crate::mesh::FemMesh;
use crate::reconstruct::{ref_edge_table_parts, ref_face_table_parts, RefTable};
use crate::resolve::resolve_sub_shapes;
use weights::{node_areas, node_lengths, node_sum_measures};

#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use std::collections::BTreeMap;
#[cfg(feature = "json_export")]
use std::fs::File;
#[cfg(feature = "json_export")]
use std::io::BufWriter;

/// `{ node_id : load }`
pub type NodeLoadTable = BTreeMap<usize, f64>;

/// A force applied to a list of references
#[derive(Clone, Debug)]
pub struct LoadObject {
    pub name: String,
    pub magnitude: f64,
    pub references: Vec<Reference>,
}

impl LoadObject {
    pub fn new(name: impl Into<String>, magnitude: f64, references: Vec<Reference>) -> Self {
        Self {
            name: name.into(),
            magnitude,
            references,
        }
    }
}

/// The node loads resulting on one referenced sub-shape
#[derive(Clone, Debug, PartialEq)]
pub struct RefNodeLoads {
    pub reference: ShapeKey,
    pub info: String,
    pub loads: NodeLoadTable,
}

impl RefNodeLoads {
    fn new(reference: ShapeKey, prefix: &str, loads: NodeLoadTable) -> Self {
        Self {
            info: format!("{}: {}", prefix, reference),
            reference,
            loads,
        }
    }

    /// Sum of the node loads
    pub fn total(&self) -> f64 {
        self.loads.values().sum()
    }

    /// Node loads as vectors along `direction` (normalized; a zero direction gives zero vectors)
    pub fn vectors(&self, direction: Vector) -> BTreeMap<usize, Vector> {
        let unit = direction.try_normalize(0.0).unwrap_or_else(Vector::zeros);
        self.loads
            .iter()
            .map(|(node_id, load)| (*node_id, unit * *load))
            .collect()
    }

    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        let mut loads_json = JsonValue::new_object();
        for (node_id, load) in self.loads.iter() {
            loads_json[node_id.to_string()] = (*load).into();
        }

        object! {
            "reference": self.reference.to_string(),
            "info": self.info.clone(),
            "loads": loads_json,
        }
    }
}

// ----------------------------------------------------------------------------------------------------
// Distribution
// ----------------------------------------------------------------------------------------------------

/// Distribute a load over the vertices it references
///
/// The magnitude is split evenly between the references, then evenly between the vertices of each reference.
/// Each share goes to the first mesh node on the vertex.
pub fn vertex_node_loads<M: FemMesh + ?Sized>(
    mesh: &M,
    load: &LoadObject,
    diagnostics: &mut Diagnostics,
) -> Vec<RefNodeLoads> {
    if load.references.is_empty() {
        diagnostics.report(MeshIssue::EmptyInput {
            context: "load references",
        });
        return Vec::new();
    }

    let reference_load = load.magnitude / load.references.len() as f64;
    let mut distribution = Vec::new();

    for reference in load.references.iter() {
        let vertex_count = reference.elements.len() as f64;
        for vertex in resolve_sub_shapes(reference, diagnostics) {
            match mesh.nodes_by_vertex(&vertex).first() {
                Some(node_id) => {
                    let loads = NodeLoadTable::from([(*node_id, reference_load / vertex_count)]);
                    distribution.push(RefNodeLoads::new(vertex.key, "node load on shape", loads));
                }
                None => diagnostics.report(MeshIssue::NoNodeOnVertex {
                    reference: vertex.key,
                }),
            }
        }
    }

    distribution
}

/// Distribute a load over the edges it references, in proportion to the length each node carries
///
/// See [distribute] for the checks applied.
pub fn edge_node_loads<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    load: &LoadObject,
    options: &DistributionOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<RefNodeLoads> {
    distribute(mesh, element_table, load, Measure::Length, options, diagnostics)
}

/// Distribute a load over the faces it references, in proportion to the area each node carries
///
/// See [distribute] for the checks applied.
pub fn face_node_loads<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    load: &LoadObject,
    options: &DistributionOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<RefNodeLoads> {
    distribute(mesh, element_table, load, Measure::Area, options, diagnostics)
}

/// Spread a load over the referenced edges (or faces) at a constant load per length (or area)
///
/// Two checks are made against `options.tolerance`:
/// * per sub-shape: the node measures must sum to the sub-shape's own length or area
/// * per load: the node loads must sum to the load's magnitude
///
/// Failed checks are reported; the (suspect) node loads are still returned.
/// A closed edge or face (a full circle) referenced as one shape is a known cause of failure.
pub fn distribute<M: FemMesh + ?Sized>(
    mesh: &M,
    element_table: &ElementTable,
    load: &LoadObject,
    measure: Measure,
    options: &DistributionOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<RefNodeLoads> {
    let sub_shapes: Vec<SubShape> = load
        .references
        .iter()
        .flat_map(|reference| resolve_sub_shapes(reference, diagnostics))
        .collect();

    let sum_reference_measure: f64 = sub_shapes.iter().map(|sub_shape| measure.of(sub_shape)).sum();
    if sum_reference_measure == 0.0 {
        diagnostics.report(MeshIssue::ZeroReferenceMeasure {
            load: load.name.clone(),
            measure,
        });
        return Vec::new();
    }
    let load_per_measure = load.magnitude / sum_reference_measure;

    let mut distribution = Vec::with_capacity(sub_shapes.len());
    let mut sum_node_measure = 0.0;
    let mut last_bad_reference = None;

    for sub_shape in sub_shapes {
        let ref_table = match measure {
            Measure::Length => ref_edge_table_parts(mesh, element_table, &sub_shape, diagnostics),
            Measure::Area => ref_face_table_parts(mesh, element_table, &sub_shape, diagnostics),
        };
        let node_measures = match measure {
            Measure::Length => node_lengths(mesh.nodes(), &ref_table.table, diagnostics),
            Measure::Area => {
                node_areas(mesh.nodes(), &ref_table.table, options.quad_area, diagnostics)
            }
        };

        let node_sums = node_sum_measures(&node_measures);
        let sub_shape_node_measure: f64 = node_sums.values().sum();
        let loads: NodeLoadTable = node_sums
            .iter()
            .map(|(node_id, node_measure)| (*node_id, node_measure * load_per_measure))
            .collect();

        let expected = measure.of(&sub_shape);
        if !options.accepts(sub_shape_node_measure / expected) {
            let diagnostic = Box::new(measure_diagnostic(&sub_shape, ref_table, node_measures));
            diagnostics.report(MeshIssue::ReferenceMeasureMismatch {
                load: load.name.clone(),
                reference: sub_shape.key.clone(),
                measure,
                expected,
                computed: sub_shape_node_measure,
                diagnostic: diagnostic.clone(),
            });
            last_bad_reference = Some(diagnostic);
        }
        sum_node_measure += sub_shape_node_measure;

        distribution.push(RefNodeLoads::new(sub_shape.key, "node loads on shape", loads));
    }

    let sum_node_load = total_load(&distribution);
    if load.magnitude != 0.0 {
        let ratio = sum_node_load / load.magnitude;
        if !options.accepts(ratio) {
            diagnostics.report(MeshIssue::LoadSumMismatch {
                load: load.name.clone(),
                measure,
                ratio,
                sum_node_measure,
                sum_reference_measure,
                sum_node_load,
                magnitude: load.magnitude,
                last_bad_reference,
            });
        }
    }

    distribution
}

fn measure_diagnostic(
    sub_shape: &SubShape,
    ref_table: RefTable,
    node_measures: Vec<(usize, f64)>,
) -> MeasureDiagnostic {
    let mut reference_nodes = ref_table.reference_nodes;
    reference_nodes.sort_unstable();
    reference_nodes.dedup();

    MeasureDiagnostic {
        reference: sub_shape.key.clone(),
        reference_nodes,
        raw_table: ref_table.raw,
        table: ref_table.table,
        node_measures,
    }
}

// ----------------------------------------------------------------------------------------------------
// Aggregation and Export
// ----------------------------------------------------------------------------------------------------

/// Sum of every node load in a distribution
pub fn total_load(distribution: &[RefNodeLoads]) -> f64 {
    distribution.iter().map(|ref_loads| ref_loads.total()).sum()
}

/// Combine the node loads of all references; nodes shared by references get the sum of their loads
pub fn merge_node_loads(distribution: &[RefNodeLoads]) -> NodeLoadTable {
    let mut merged = NodeLoadTable::new();
    for ref_loads in distribution {
        for (node_id, load) in ref_loads.loads.iter() {
            *merged.entry(*node_id).or_insert(0.0) += load;
        }
    }
    merged
}

/// Write a load's distribution to a JSON file
#[cfg(feature = "json_export")]
pub fn export_to_json(
    load: &LoadObject,
    distribution: &[RefNodeLoads],
    path: impl AsRef<str>,
) -> std::io::Result<()> {
    let f = File::create(path.as_ref())?;
    let mut w = BufWriter::new(&f);

    let mut merged_json = JsonValue::new_object();
    for (node_id, node_load) in merge_node_loads(distribution) {
        merged_json[node_id.to_string()] = node_load.into();
    }

    let load_object = object! {
        "name": load.name.clone(),
        "magnitude": load.magnitude,
        "references": JsonValue::from(distribution.iter().map(|ref_loads| ref_loads.to_json()).collect::<Vec<_>>()),
        "node_loads": merged_json,
    };

    load_object.write_pretty(&mut w, 4)?;

    Ok(())
}
