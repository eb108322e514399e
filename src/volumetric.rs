//! Volumetric weight estimate
//!
//! Reference figure only. Nothing here feeds a price: the calculator
//! reports it next to the charges, never inside them.

use crate::normalize::non_negative;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Standard divisor for cm³ to kg
pub const DEFAULT_DIVISOR: f64 = 6000.0;

/// Packed box size and actual weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PackageDimensions {
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PackageDimensions {
    /// Same dimensions with every value clamped to finite, non-negative
    pub fn clamped(&self) -> Self {
        Self {
            weight_kg: non_negative(self.weight_kg),
            length_cm: non_negative(self.length_cm),
            width_cm: non_negative(self.width_cm),
            height_cm: non_negative(self.height_cm),
        }
    }

    /// Volume in cm³
    pub fn volume_cm3(&self) -> f64 {
        let d = self.clamped();
        d.length_cm * d.width_cm * d.height_cm
    }
}

/// Package figures reported next to the charges
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PackageEstimate {
    /// Actual weight as entered
    pub weight_kg: f64,

    /// L×W×H / divisor
    pub volumetric_weight_kg: f64,
}

/// L×W×H / divisor; a non-positive divisor yields 0
pub fn volumetric_weight_kg(dims: &PackageDimensions, divisor: f64) -> f64 {
    if !(divisor.is_finite() && divisor > 0.0) {
        return 0.0;
    }
    non_negative(dims.volume_cm3() / divisor)
}

/// Estimate for a package
pub fn estimate(dims: &PackageDimensions, divisor: f64) -> PackageEstimate {
    PackageEstimate {
        weight_kg: non_negative(dims.weight_kg),
        volumetric_weight_kg: volumetric_weight_kg(dims, divisor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(l: f64, w: f64, h: f64) -> PackageDimensions {
        PackageDimensions {
            weight_kg: 0.0,
            length_cm: l,
            width_cm: w,
            height_cm: h,
        }
    }

    #[test]
    fn test_standard_box() {
        assert_eq!(volumetric_weight_kg(&dims(30.0, 20.0, 15.0), DEFAULT_DIVISOR), 1.5);
    }

    #[test]
    fn test_missing_side_is_zero() {
        assert_eq!(volumetric_weight_kg(&dims(30.0, 20.0, 0.0), DEFAULT_DIVISOR), 0.0);
    }

    #[test]
    fn test_negative_side_clamps() {
        assert_eq!(volumetric_weight_kg(&dims(-30.0, 20.0, 15.0), DEFAULT_DIVISOR), 0.0);
    }

    #[test]
    fn test_bad_divisor() {
        assert_eq!(volumetric_weight_kg(&dims(30.0, 20.0, 15.0), 0.0), 0.0);
        assert_eq!(volumetric_weight_kg(&dims(30.0, 20.0, 15.0), f64::NAN), 0.0);
    }

    #[test]
    fn test_estimate_keeps_actual_weight() {
        let d = PackageDimensions {
            weight_kg: 2.3,
            ..dims(60.0, 40.0, 25.0)
        };
        let e = estimate(&d, DEFAULT_DIVISOR);
        assert_eq!(e.weight_kg, 2.3);
        assert_eq!(e.volumetric_weight_kg, 10.0);
    }
}
