/// Global and local tolerance management for curve computations.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Tolerance for arc-length integration refinement
    pub arc_length: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_ARC_LENGTH: f64 = 1e-4;

    pub fn new(linear: f64, arc_length: f64) -> Self {
        Self { linear, arc_length }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            arc_length: Self::DEFAULT_ARC_LENGTH,
        }
    }

    pub fn loose() -> Self {
        Self {
            linear: 1e-4,
            arc_length: 1e-3,
        }
    }

    pub fn tight() -> Self {
        Self {
            linear: 1e-10,
            arc_length: 1e-6,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
