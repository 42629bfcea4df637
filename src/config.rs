/// Allowed relative deviation between distributed and expected totals (±1%)
pub const CONSERVATION_TOLERANCE: f64 = 0.01;

/// Number of node IDs stored inline (without heap allocation) per element. Covers every supported element type.
pub const MAX_INLINE_ELEMENT_NODES: usize = 20;

/// How the area of a 4-node quadrilateral face is computed from its two triangles (P1 P2 P3) and (P1 P3 P4)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadAreaRule {
    /// area = t1 + t2
    TwoTriangles,
    /// area = t1 + t1; reproduces the historical result, exact only if both triangles have equal area
    FirstTriangleTwice,
}

impl Default for QuadAreaRule {
    #[cfg(not(feature = "legacy_quad_area"))]
    fn default() -> Self {
        Self::TwoTriangles
    }

    #[cfg(feature = "legacy_quad_area")]
    fn default() -> Self {
        Self::FirstTriangleTwice
    }
}

/// Settings for the load distributor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistributionOptions {
    pub tolerance: f64,
    pub quad_area: QuadAreaRule,
}

impl DistributionOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_quad_area(mut self, quad_area: QuadAreaRule) -> Self {
        self.quad_area = quad_area;
        self
    }

    /// Is `ratio` within the tolerance band around 1.0
    pub fn accepts(&self, ratio: f64) -> bool {
        ratio >= 1.0 - self.tolerance && ratio <= 1.0 + self.tolerance
    }
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            tolerance: CONSERVATION_TOLERANCE,
            quad_area: QuadAreaRule::default(),
        }
    }
}
