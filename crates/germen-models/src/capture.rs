//! Capture models — affinity + concentration → captured quantity.

use germen_core::models::CaptureModel;
use serde::{Deserialize, Serialize};

/// Capture proportional to both affinity and concentration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearCapture {
    pub efficiency: f64,
}

impl LinearCapture {
    pub fn new(efficiency: f64) -> Self {
        Self { efficiency }
    }
}

impl Default for LinearCapture {
    fn default() -> Self {
        Self { efficiency: 1.0 }
    }
}

impl CaptureModel for LinearCapture {
    fn capture(&self, affinity: f64, concentration: f64) -> f64 {
        (self.efficiency * affinity * concentration).max(0.0)
    }
}

/// Capture saturating in affinity: concentration * a / (a + k).
///
/// Doubling an already-high affinity barely changes the haul, which keeps
/// late-trial competition from being decided by affinity alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaturationCapture {
    /// Affinity at which capture reaches half the concentration.
    pub half_saturation: f64,
}

impl SaturationCapture {
    pub fn new(half_saturation: f64) -> Self {
        Self { half_saturation }
    }
}

impl Default for SaturationCapture {
    fn default() -> Self {
        Self {
            half_saturation: 0.5,
        }
    }
}

impl CaptureModel for SaturationCapture {
    fn capture(&self, affinity: f64, concentration: f64) -> f64 {
        if affinity <= 0.0 || concentration <= 0.0 {
            return 0.0;
        }
        concentration * affinity / (affinity + self.half_saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_is_never_negative() {
        assert_eq!(LinearCapture::default().capture(-2.0, 5.0), 0.0);
        assert_eq!(SaturationCapture::default().capture(-2.0, 5.0), 0.0);
    }

    #[test]
    fn saturation_capture_stays_below_concentration() {
        let model = SaturationCapture::new(0.5);
        for affinity in [0.1, 1.0, 10.0, 1000.0] {
            let captured = model.capture(affinity, 4.0);
            assert!(captured > 0.0 && captured < 4.0);
        }
    }

    #[test]
    fn higher_affinity_captures_more() {
        let model = SaturationCapture::default();
        assert!(model.capture(2.0, 1.0) > model.capture(1.0, 1.0));
    }
}
