//! Spring motion
//!
//! Springs are evaluated in closed form instead of being integrated frame by
//! frame, so a spring stage is a pure function of elapsed time like every other
//! stage. A spring starts at rest on `from` and settles on `to`.

use crate::error::{AnimationError, Result};
use serde::{Deserialize, Serialize};

/// Remaining displacement (as a fraction of the travel) at which a spring counts as settled.
pub const SETTLE_THRESHOLD: f64 = 0.01;

/// Upper bound for the settle search on critically damped springs.
const MAX_SETTLE_SECS: f64 = 60.0;

/// Configuration for a spring stage
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_mass() -> f32 {
    1.0
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring with the given damping and stiffness
    pub fn with_damping(damping: f32, stiffness: f32) -> Self {
        Self::new(stiffness, damping, 1.0)
    }

    /// Bouncy entrance used for the bird logo (damping 12, stiffness 150)
    pub fn entrance() -> Self {
        Self::with_damping(12.0, 150.0)
    }

    /// Soft pop used for the net and title (damping 8, stiffness 100)
    pub fn pop() -> Self {
        Self::with_damping(8.0, 100.0)
    }

    /// Default spring for small decorations (damping 10, stiffness 100)
    pub fn gentle() -> Self {
        Self::with_damping(10.0, 100.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio (zeta); below 1 the spring overshoots
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Reject springs that would never settle or are physically meaningless.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("spring.stiffness", self.stiffness),
            ("spring.damping", self.damping),
            ("spring.mass", self.mass),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnimationError::invalid(name, value));
            }
        }
        Ok(())
    }

    /// Remaining fraction of the travel after `elapsed_ms`.
    ///
    /// `1.0` at rest on `from`, tends to `0.0`; negative values are overshoot.
    pub fn displacement(&self, elapsed_ms: f32) -> f32 {
        let t = (elapsed_ms.max(0.0) as f64) / 1000.0;
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio() as f64;

        let x = if (zeta - 1.0).abs() < 1e-4 {
            (-omega * t).exp() * (1.0 + omega * t)
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * omega;
            (-decay * t).exp() * ((omega_d * t).cos() + decay / omega_d * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        };
        x as f32
    }

    /// Time after which the displacement envelope stays below [`SETTLE_THRESHOLD`].
    pub fn settle_ms(&self) -> f32 {
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio() as f64;

        let secs = if (zeta - 1.0).abs() < 1e-4 {
            // e^(-wt)(1 + wt) is monotonic; walk it in 1ms steps
            let mut t = 0.0;
            while t < MAX_SETTLE_SECS && (-omega * t).exp() * (1.0 + omega * t) > SETTLE_THRESHOLD
            {
                t += 0.001;
            }
            t
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * omega;
            let amplitude = (1.0 + (decay / omega_d).powi(2)).sqrt();
            (amplitude / SETTLE_THRESHOLD).ln() / decay
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let slow = omega * (zeta - root);
            let fast = omega * (zeta + root);
            let weight = fast / (fast - slow);
            (weight / SETTLE_THRESHOLD).ln().max(0.0) / slow
        };

        ((secs * 1000.0).ceil() as f32).max(0.0)
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness as f64 / self.mass as f64).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::gentle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_defaults_when_omitted() {
        let config: SpringConfig =
            serde_json::from_str(r#"{ "stiffness": 150.0, "damping": 12.0 }"#).unwrap();
        assert_eq!(config, SpringConfig::entrance());
    }

    #[test]
    fn test_spring_starts_at_rest_on_from() {
        for config in [
            SpringConfig::entrance(),
            SpringConfig::pop(),
            SpringConfig::new(100.0, 20.0, 1.0),
            SpringConfig::new(100.0, 40.0, 1.0),
        ] {
            assert!((config.displacement(0.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_spring_settles_within_threshold() {
        for config in [
            SpringConfig::entrance(),
            SpringConfig::pop(),
            SpringConfig::gentle(),
            SpringConfig::new(100.0, 20.0, 1.0),
            SpringConfig::new(100.0, 40.0, 1.0),
        ] {
            let settle = config.settle_ms();
            assert!(settle > 0.0);
            for extra in [0.0, 10.0, 250.0, 1000.0] {
                let x = config.displacement(settle + extra);
                assert!(x.abs() <= SETTLE_THRESHOLD as f32 + 1e-4, "{config:?} at +{extra}: {x}");
            }
        }
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let config = SpringConfig::pop();
        assert!(config.is_underdamped());
        let min = (0..2000)
            .map(|ms| config.displacement(ms as f32))
            .fold(f32::MAX, f32::min);
        assert!(min < 0.0, "expected overshoot past the target");
    }

    #[test]
    fn test_gentle_spring_settle_time() {
        // zeta = 0.5, omega = 10: ln(1.1547 / 0.01) / 5 = 0.9497s
        let settle = SpringConfig::gentle().settle_ms();
        assert!((settle - 950.0).abs() <= 1.0, "{settle}");
    }

    #[test]
    fn test_validate_rejects_non_positive_constants() {
        assert!(SpringConfig::new(0.0, 10.0, 1.0).validate().is_err());
        assert!(SpringConfig::new(100.0, 0.0, 1.0).validate().is_err());
        assert!(SpringConfig::new(100.0, 10.0, -1.0).validate().is_err());
        assert!(SpringConfig::gentle().validate().is_ok());
    }
}
