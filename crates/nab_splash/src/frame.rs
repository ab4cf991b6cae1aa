//! Visual parameters of one splash instant

use crate::schedule::SplashPhase;
use serde::Serialize;
use smallvec::SmallVec;

/// Bird logo transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BirdPose {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub rotate_deg: f32,
    /// Raw wing flap progress, 0 = open, 1 = folded
    pub wing_flap: f32,
    /// Vertical wing scale derived from the flap, `1.0..=0.7`
    pub wing_scale_y: f32,
}

/// Net transform and unfold progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetPose {
    pub opacity: f32,
    pub scale: f32,
    /// Unfold progress `0..=1`
    pub deployment: f32,
    /// Visible height of the net grid, in percent
    pub visible_percent: f32,
}

/// Title block transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TitlePose {
    pub opacity: f32,
    pub scale: f32,
}

/// One decorative particle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ParticleFrame {
    pub index: usize,
    pub translate_x: f32,
    pub translate_y: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// Everything a renderer needs to draw the splash at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplashFrame {
    pub elapsed_ms: u64,
    pub phase: SplashPhase,
    /// Fade-in of the content layer
    pub container_opacity: f32,
    /// Fade-out of the whole splash
    pub background_opacity: f32,
    pub bird: BirdPose,
    pub net: NetPose,
    pub title: TitlePose,
    /// Loading bar fill `0..=1`
    pub loading_progress: f32,
    pub particles: SmallVec<[ParticleFrame; 12]>,
}

impl SplashFrame {
    /// Product of the two splash-wide opacities
    pub fn effective_opacity(&self) -> f32 {
        self.container_opacity * self.background_opacity
    }
}

/// Map the wing flap `0..=1` onto a vertical scale `1.0..=0.7`, clamped
pub(crate) fn wing_scale_y(flap: f32) -> f32 {
    1.0 - 0.3 * flap.clamp(0.0, 1.0)
}
