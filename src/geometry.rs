use crate::error::ImportError;

use json::JsonValue;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A point in real space
pub type Point = Point3<f64>;

/// A direction or difference between two [Point]s
pub type Vector = Vector3<f64>;

/// Topological kind of a shape or sub-shape as reported by the geometric kernel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Vertex,
    Edge,
    Wire,
    Face,
    Shell,
    Solid,
    CompSolid,
    Compound,
}

impl ShapeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vertex => "Vertex",
            Self::Edge => "Edge",
            Self::Wire => "Wire",
            Self::Face => "Face",
            Self::Shell => "Shell",
            Self::Solid => "Solid",
            Self::CompSolid => "CompSolid",
            Self::Compound => "Compound",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vertex" => Ok(Self::Vertex),
            "Edge" => Ok(Self::Edge),
            "Wire" => Ok(Self::Wire),
            "Face" => Ok(Self::Face),
            "Shell" => Ok(Self::Shell),
            "Solid" => Ok(Self::Solid),
            "CompSolid" => Ok(Self::CompSolid),
            "Compound" => Ok(Self::Compound),
            other => Err(ImportError::malformed(
                "shape",
                format!("'{}' is not a shape kind", other),
            )),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which part of a [Shape] a [Reference] points at
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubShapeName {
    /// The entire shape
    Whole,
    /// A named sub-element such as "Face3" or "Edge12"
    Named(String),
}

impl SubShapeName {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Interpret an interchange name; the empty string denotes the whole shape
    pub fn parse(name: &str) -> Self {
        if name.is_empty() {
            Self::Whole
        } else {
            Self::Named(name.to_string())
        }
    }
}

impl fmt::Display for SubShapeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Whole => write!(f, "<whole>"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Globally identifies a sub-shape: the owning shape's name plus the sub-element name
///
/// Written as `"Box:Face1"` (or just `"Box"` for the whole shape) in interchange files and diagnostics
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeKey {
    pub shape: String,
    pub name: SubShapeName,
}

impl ShapeKey {
    pub fn new(shape: impl Into<String>, name: SubShapeName) -> Self {
        Self {
            shape: shape.into(),
            name,
        }
    }

    pub fn parse(key: &str) -> Self {
        match key.split_once(':') {
            Some((shape, name)) => Self::new(shape, SubShapeName::parse(name)),
            None => Self::new(key, SubShapeName::Whole),
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            SubShapeName::Whole => write!(f, "{}", self.shape),
            SubShapeName::Named(name) => write!(f, "{}:{}", self.shape, name),
        }
    }
}

/// The geometric measure used to weight a distributed load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
    Length,
    Area,
}

impl Measure {
    /// The kernel's value of this measure for a sub-shape
    pub fn of(&self, sub_shape: &SubShape) -> f64 {
        match self {
            Self::Length => sub_shape.length,
            Self::Area => sub_shape.area,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Length => write!(f, "length"),
            Self::Area => write!(f, "area"),
        }
    }
}

/// A resolved sub-element of a [Shape] with the measures the kernel reports for it
#[derive(Clone, Debug, PartialEq)]
pub struct SubShape {
    pub key: ShapeKey,
    pub kind: ShapeKind,
    pub length: f64,
    pub area: f64,
}

/// A shape from the geometric model along with its named sub-elements
///
/// This is the slice of the modeling kernel the mesh tools consume: lookup of sub-elements by name,
/// their topological kind, and their Length and Area.
#[derive(Clone, Debug)]
pub struct Shape {
    pub name: String,
    pub label: String,
    pub kind: ShapeKind,
    pub length: f64,
    pub area: f64,
    elements: BTreeMap<String, SubShape>,
}

impl Shape {
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            length: 0.0,
            area: 0.0,
            elements: BTreeMap::new(),
        }
    }

    pub fn with_measures(mut self, length: f64, area: f64) -> Self {
        self.length = length;
        self.area = area;
        self
    }

    /// Add a named sub-element
    pub fn with_element(
        mut self,
        name: impl Into<String>,
        kind: ShapeKind,
        length: f64,
        area: f64,
    ) -> Self {
        let name = name.into();
        self.elements.insert(
            name.clone(),
            SubShape {
                key: ShapeKey::new(self.name.clone(), SubShapeName::Named(name)),
                kind,
                length,
                area,
            },
        );
        self
    }

    /// Look up a sub-element by name (or the whole shape)
    pub fn element(&self, name: &SubShapeName) -> Option<SubShape> {
        match name {
            SubShapeName::Whole => Some(SubShape {
                key: ShapeKey::new(self.name.clone(), SubShapeName::Whole),
                kind: self.kind,
                length: self.length,
                area: self.area,
            }),
            SubShapeName::Named(element_name) => self.elements.get(element_name).cloned(),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &SubShape> + '_ {
        self.elements.values()
    }

    /// Construct a Shape from a JSON description with the following format
    ///
    /// ```JSON
    /// {
    ///     "name": "Box",
    ///     "label": "Box",
    ///     "kind": "Solid",
    ///     "area": 6.0,
    ///     "elements": {
    ///         "Face1": { "kind": "Face", "area": 1.0 },
    ///         "Edge1": { "kind": "Edge", "length": 1.0 },
    ///         "Vertex1": { "kind": "Vertex" }
    ///     }
    /// }
    /// ```
    ///
    /// Missing "length" and "area" values default to zero
    pub fn from_json(shape_json: &JsonValue) -> Result<Self, ImportError> {
        let name = shape_json["name"]
            .as_str()
            .ok_or_else(|| ImportError::malformed("shape", "'name' must be a string"))?;
        let kind: ShapeKind = shape_json["kind"]
            .as_str()
            .ok_or_else(|| ImportError::malformed("shape", "'kind' must be a string"))?
            .parse()?;

        let mut shape = Self::new(name, kind).with_measures(
            optional_measure(&shape_json["length"], name)?,
            optional_measure(&shape_json["area"], name)?,
        );
        if let Some(label) = shape_json["label"].as_str() {
            shape.label = label.to_string();
        }

        if !shape_json["elements"].is_null() && !shape_json["elements"].is_object() {
            return Err(ImportError::malformed(
                "shape",
                format!("'elements' of {} must be an object", name),
            ));
        }

        for (element_name, element_json) in shape_json["elements"].entries() {
            let kind: ShapeKind = element_json["kind"]
                .as_str()
                .ok_or_else(|| {
                    ImportError::malformed(
                        "shape",
                        format!("{}:{} must have a 'kind'", name, element_name),
                    )
                })?
                .parse()?;

            shape = shape.with_element(
                element_name,
                kind,
                optional_measure(&element_json["length"], element_name)?,
                optional_measure(&element_json["area"], element_name)?,
            );
        }

        Ok(shape)
    }
}

fn optional_measure(value: &JsonValue, owner: &str) -> Result<f64, ImportError> {
    if value.is_null() {
        Ok(0.0)
    } else {
        value.as_f64().ok_or_else(|| {
            ImportError::malformed("shape", format!("measures of {} must be numeric", owner))
        })
    }
}

/// A region of the geometric model: a shape plus a list of its sub-elements
#[derive(Clone, Debug)]
pub struct Reference {
    pub shape: Arc<Shape>,
    pub elements: Vec<SubShapeName>,
}

impl Reference {
    pub fn new(shape: Arc<Shape>, elements: Vec<SubShapeName>) -> Self {
        Self { shape, elements }
    }

    /// Reference the entire shape
    pub fn whole(shape: Arc<Shape>) -> Self {
        Self::new(shape, vec![SubShapeName::Whole])
    }

    /// Reference a list of named sub-elements
    pub fn named(shape: Arc<Shape>, names: &[&str]) -> Self {
        Self::new(
            shape,
            names.iter().map(|name| SubShapeName::named(*name)).collect(),
        )
    }
}

/// Distance between two points
pub fn distance(p0: &Point, p1: &Point) -> f64 {
    (p1 - p0).norm()
}

/// Area of the triangle spanned by three points (half the magnitude of the edge vectors' cross product)
pub fn triangle_area(p1: &Point, p2: &Point, p3: &Point) -> f64 {
    let v1: Vector = p2 - p1;
    let v2: Vector = p3 - p1;
    0.5 * v1.cross(&v2).norm()
}

/// Select three nodes which (unless all nodes are colinear) do not lie on a common line
///
/// The first two nodes are the most distant pair among consecutive entries of `nodes`.
/// The third is the node with the largest summed distance to those two.
///
/// Returns `None` if fewer than three nodes are provided
pub fn three_non_colinear_nodes(nodes: &[(usize, Point)]) -> Option<[usize; 3]> {
    if nodes.len() < 3 {
        return None;
    }

    let mut furthest_pair = [0, 1];
    let mut max_distance = 0.0;
    for (j, pair) in nodes.windows(2).enumerate() {
        let d = distance(&pair[0].1, &pair[1].1);
        if d > max_distance {
            max_distance = d;
            furthest_pair = [j, j + 1];
        }
    }

    let [a, b] = furthest_pair.map(|idx| nodes[idx].1);
    let mut third = 0;
    let mut max_total = 0.0;
    for (i, (_, p)) in nodes.iter().enumerate() {
        let total = distance(&a, p) + distance(p, &b);
        if total > max_total {
            max_total = total;
            third = i;
        }
    }

    Some([
        nodes[furthest_pair[0]].0,
        nodes[furthest_pair[1]].0,
        nodes[third].0,
    ])
}
