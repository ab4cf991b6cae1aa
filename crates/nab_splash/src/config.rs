//! Splash timing configuration
//!
//! Every value defaults to the shipped presentation; a `[splash]` table in the
//! app config may override any of them.

use crate::error::{Result, SplashError};
use nab_animation::{Easing, SpringConfig};
use serde::{Deserialize, Serialize};

/// Logical screen size the splash is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Splash schedule, in milliseconds after mount unless noted
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SplashConfig {
    #[serde(default)]
    pub viewport: Viewport,
    /// Container fade-in duration
    #[serde(default = "default_fade_in")]
    pub fade_in_ms: u64,
    /// Bird flight, rotation, scale and wing flap all start here
    #[serde(default = "default_bird_enter")]
    pub bird_enter_ms: u64,
    /// Number of full wing beats
    #[serde(default = "default_wing_flaps")]
    pub wing_flap_count: u32,
    /// Duration of half a wing beat (down or up)
    #[serde(default = "default_wing_half")]
    pub wing_flap_half_ms: u64,
    /// Title and loading bar start here
    #[serde(default = "default_title_reveal")]
    pub title_reveal_ms: u64,
    /// Loading bar fill duration
    #[serde(default = "default_loading")]
    pub loading_ms: u64,
    /// Net opacity, scale and deployment start here
    #[serde(default = "default_net_deploy")]
    pub net_deploy_ms: u64,
    /// Fade-out timer offset
    #[serde(default = "default_fade_out_start")]
    pub fade_out_start_ms: u64,
    /// Fade-out duration; its end triggers completion
    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u64,
    /// Curve of the container fade-in and the background fade-out
    #[serde(default = "default_fade_easing")]
    pub fade_easing: Easing,
    #[serde(default)]
    pub particles: ParticleConfig,
}

fn default_fade_in() -> u64 {
    500
}

fn default_bird_enter() -> u64 {
    500
}

fn default_wing_flaps() -> u32 {
    4
}

fn default_wing_half() -> u64 {
    150
}

fn default_title_reveal() -> u64 {
    1600
}

fn default_loading() -> u64 {
    1200
}

fn default_net_deploy() -> u64 {
    1800
}

fn default_fade_out_start() -> u64 {
    4000
}

fn default_fade_out() -> u64 {
    800
}

fn default_fade_easing() -> Easing {
    Easing::STANDARD
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            fade_in_ms: default_fade_in(),
            bird_enter_ms: default_bird_enter(),
            wing_flap_count: default_wing_flaps(),
            wing_flap_half_ms: default_wing_half(),
            title_reveal_ms: default_title_reveal(),
            loading_ms: default_loading(),
            net_deploy_ms: default_net_deploy(),
            fade_out_start_ms: default_fade_out_start(),
            fade_out_ms: default_fade_out(),
            fade_easing: default_fade_easing(),
            particles: ParticleConfig::default(),
        }
    }
}

impl SplashConfig {
    /// Reject configurations the schedule cannot honour
    pub fn validate(&self) -> Result<()> {
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SplashError::Config(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }
        if self.fade_out_start_ms.checked_add(self.fade_out_ms).is_none() {
            return Err(SplashError::Config(format!(
                "fade-out ({}ms + {}ms) overflows the schedule",
                self.fade_out_start_ms, self.fade_out_ms
            )));
        }
        self.particles.validate()
    }

    /// Completion instant: fade-out start plus its duration
    pub fn complete_ms(&self) -> u64 {
        self.fade_out_start_ms.saturating_add(self.fade_out_ms)
    }
}

/// Decorative particle parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParticleConfig {
    #[serde(default = "default_particle_count")]
    pub count: usize,
    /// Loop period of one particle
    #[serde(default = "default_particle_period")]
    pub period_ms: u64,
    /// Spawn offset between consecutive particles
    #[serde(default = "default_particle_stagger")]
    pub stagger_ms: u64,
    /// Time to travel from the bottom of the viewport to the top
    #[serde(default = "default_particle_rise")]
    pub rise_ms: u64,
    /// Fade-in and fade-out duration inside one rise
    #[serde(default = "default_particle_fade")]
    pub fade_ms: u64,
    #[serde(default = "default_particle_opacity")]
    pub peak_opacity: f32,
}

fn default_particle_count() -> usize {
    12
}

fn default_particle_period() -> u64 {
    4000
}

fn default_particle_stagger() -> u64 {
    150
}

fn default_particle_rise() -> u64 {
    3000
}

fn default_particle_fade() -> u64 {
    500
}

fn default_particle_opacity() -> f32 {
    0.8
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: default_particle_count(),
            period_ms: default_particle_period(),
            stagger_ms: default_particle_stagger(),
            rise_ms: default_particle_rise(),
            fade_ms: default_particle_fade(),
            peak_opacity: default_particle_opacity(),
        }
    }
}

impl ParticleConfig {
    /// A cycle must fit inside its period, and both fades inside the rise
    pub fn validate(&self) -> Result<()> {
        if self.period_ms == 0 {
            return Err(SplashError::Config("particle period must be > 0".into()));
        }
        if self.rise_ms > self.period_ms {
            return Err(SplashError::Config(format!(
                "particle rise ({}ms) does not fit its period ({}ms)",
                self.rise_ms, self.period_ms
            )));
        }
        if self.fade_ms.checked_mul(2).map_or(true, |fades| fades > self.rise_ms) {
            return Err(SplashError::Config(format!(
                "particle fades (2 x {}ms) do not fit the rise ({}ms)",
                self.fade_ms, self.rise_ms
            )));
        }
        let settle_ms = SpringConfig::gentle().settle_ms();
        if ((self.rise_ms - self.fade_ms) as f32) < settle_ms {
            return Err(SplashError::Config(format!(
                "particle fade-out at {}ms starts before the scale spring settles ({settle_ms:.0}ms)",
                self.rise_ms - self.fade_ms
            )));
        }
        let last_spawn = (self.count.saturating_sub(1) as u64).checked_mul(self.stagger_ms);
        if last_spawn
            .and_then(|spawn| spawn.checked_add(self.period_ms))
            .is_none()
        {
            return Err(SplashError::Config(format!(
                "particle stagger {}ms overflows the schedule for {} particles",
                self.stagger_ms, self.count
            )));
        }
        if !(0.0..=1.0).contains(&self.peak_opacity) {
            return Err(SplashError::Config(format!(
                "particle opacity {} outside 0..=1",
                self.peak_opacity
            )));
        }
        Ok(())
    }

    /// Spawn delay of particle `index`
    pub fn spawn_delay_ms(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.stagger_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_presentation() {
        let config = SplashConfig::default();
        assert_eq!(config.fade_out_start_ms, 4000);
        assert_eq!(config.complete_ms(), 4800);
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.spawn_delay_ms(11), 1650);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rise_longer_than_period_is_rejected() {
        let mut config = SplashConfig::default();
        config.particles.rise_ms = 4500;
        assert!(matches!(config.validate(), Err(SplashError::Config(_))));
    }

    #[test]
    fn test_overflowing_timings_are_rejected() {
        let mut config = SplashConfig::default();
        config.particles.stagger_ms = i64::MAX as u64;
        assert!(matches!(config.validate(), Err(SplashError::Config(_))));

        let mut config = SplashConfig::default();
        config.fade_out_ms = u64::MAX;
        assert!(matches!(config.validate(), Err(SplashError::Config(_))));
        assert_eq!(config.complete_ms(), u64::MAX);

        let mut config = SplashConfig::default();
        config.particles.fade_ms = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fade_out_must_follow_the_scale_spring() {
        let mut config = SplashConfig::default();
        config.particles.rise_ms = 1000;
        config.particles.fade_ms = 500;
        assert!(matches!(config.validate(), Err(SplashError::Config(_))));

        config.particles.rise_ms = 1200;
        config.particles.fade_ms = 200;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_viewport_is_rejected() {
        let mut config = SplashConfig::default();
        config.viewport.width = 0.0;
        assert!(config.validate().is_err());
    }
}
