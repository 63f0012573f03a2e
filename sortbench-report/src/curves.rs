//! Theoretical Complexity Curves
//!
//! Closed-form growth functions evaluated over the configured sizes. They
//! depend only on `n`, never on measured data. Logarithms are base 2 and
//! `n` is clamped to at least 1, so every value is finite and non-negative.

use serde::{Deserialize, Serialize};

/// Which panel a curve belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Time complexity
    Time,
    /// Space complexity
    Space,
}

/// A labelled growth function
#[derive(Debug, Clone, Copy)]
pub struct TheoreticalCurve {
    /// Legend label, e.g. `O(n log n)`
    pub label: &'static str,
    /// Panel the curve is drawn in
    pub kind: CurveKind,
    /// Growth function of `n`
    pub f: fn(f64) -> f64,
}

impl TheoreticalCurve {
    /// Evaluate at size `n`
    pub fn evaluate(&self, n: usize) -> f64 {
        (self.f)((n as f64).max(1.0))
    }

    /// Evaluate at every size
    pub fn sample(&self, sizes: &[usize]) -> CurveSamples {
        CurveSamples {
            label: self.label.to_string(),
            kind: self.kind,
            values: sizes.iter().map(|&n| self.evaluate(n)).collect(),
        }
    }
}

/// A curve evaluated over concrete sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSamples {
    pub label: String,
    pub kind: CurveKind,
    pub values: Vec<f64>,
}

fn constant(_: f64) -> f64 {
    1.0
}

fn logarithmic(n: f64) -> f64 {
    n.log2()
}

fn linear(n: f64) -> f64 {
    n
}

fn linearithmic(n: f64) -> f64 {
    n * n.log2()
}

fn quadratic(n: f64) -> f64 {
    n * n
}

/// O(n^2)
pub const QUADRATIC: TheoreticalCurve = TheoreticalCurve {
    label: "O(n^2)",
    kind: CurveKind::Time,
    f: quadratic,
};

/// O(n log n)
pub const LINEARITHMIC: TheoreticalCurve = TheoreticalCurve {
    label: "O(n log n)",
    kind: CurveKind::Time,
    f: linearithmic,
};

/// O(1)
pub const CONSTANT: TheoreticalCurve = TheoreticalCurve {
    label: "O(1)",
    kind: CurveKind::Space,
    f: constant,
};

/// O(log n)
pub const LOGARITHMIC: TheoreticalCurve = TheoreticalCurve {
    label: "O(log n)",
    kind: CurveKind::Space,
    f: logarithmic,
};

/// O(n)
pub const LINEAR: TheoreticalCurve = TheoreticalCurve {
    label: "O(n)",
    kind: CurveKind::Space,
    f: linear,
};

/// The time curves followed by the space curves
pub fn default_curves() -> Vec<TheoreticalCurve> {
    vec![QUADRATIC, LINEARITHMIC, CONSTANT, LOGARITHMIC, LINEAR]
}
