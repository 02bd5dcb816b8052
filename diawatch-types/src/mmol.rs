//! Glucose concentration representation.
//!
//! We use mmol/L as the canonical unit for blood glucose, matching the
//! source measurements. mg/dL is derived on demand for formulas published
//! against US units.

/// Lowest glucose value a meter can plausibly report, in mmol/L.
pub const GLUCOSE_FLOOR: f64 = 0.5;

/// Highest glucose value a meter can plausibly report, in mmol/L.
pub const GLUCOSE_CEIL: f64 = 35.0;

/// Conversion factor between mmol/L and mg/dL for glucose.
pub const MG_DL_PER_MMOL_L: f64 = 18.0182;

/// Blood glucose concentration in mmol/L.
///
/// This wrapper keeps glucose values distinct from other floating point
/// quantities (doses, bread units, weights) flowing through the same code.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MmolL(pub f64);

impl MmolL {
    /// Create from a raw mmol/L value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw mmol/L value.
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Convert to mg/dL.
    pub fn as_mg_dl(&self) -> f64 {
        self.0 * MG_DL_PER_MMOL_L
    }

    /// Check that the value lies within the physiologically plausible band
    /// accepted at the input boundary (0.5-35 mmol/L inclusive).
    pub fn is_physiological(&self) -> bool {
        self.0 >= GLUCOSE_FLOOR && self.0 <= GLUCOSE_CEIL
    }
}

impl From<f64> for MmolL {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<MmolL> for f64 {
    fn from(value: MmolL) -> Self {
        value.0
    }
}

impl core::fmt::Display for MmolL {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.1} mmol/L", self.0)
    }
}
