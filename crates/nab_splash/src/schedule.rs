//! The splash presentation as declarative stages
//!
//! Every animated value of the intro is an [`AnimatedScalar`] on one
//! [`Timeline`] whose origin is the mount instant. Phases are derived from the
//! same stages, so changing a timing in [`SplashConfig`] moves the phase
//! boundaries with it.

use crate::config::SplashConfig;
use crate::error::Result;
use crate::frame::{wing_scale_y, BirdPose, NetPose, ParticleFrame, SplashFrame, TitlePose};
use nab_animation::{AnimatedScalar, ScalarId, SpringConfig, Step, Timeline};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Scalar names on the splash timeline
pub mod names {
    pub const CONTAINER_OPACITY: &str = "container.opacity";
    pub const BACKGROUND_OPACITY: &str = "background.opacity";
    pub const BIRD_X: &str = "bird.translate_x";
    pub const BIRD_Y: &str = "bird.translate_y";
    pub const BIRD_ROTATE: &str = "bird.rotate";
    pub const BIRD_SCALE: &str = "bird.scale";
    pub const WING_FLAP: &str = "bird.wing_flap";
    pub const NET_OPACITY: &str = "net.opacity";
    pub const NET_SCALE: &str = "net.scale";
    pub const NET_DEPLOYMENT: &str = "net.deployment";
    pub const TITLE_OPACITY: &str = "title.opacity";
    pub const TITLE_SCALE: &str = "title.scale";
    pub const LOADING_PROGRESS: &str = "loading.progress";
}

/// Coarse presentation state, purely a function of time since mount.
///
/// `Revealing` covers the concurrent title reveal and net deployment. During
/// `HoldingFinal` the timed stages are done; springs may still be settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashPhase {
    Mounted,
    BirdEntering,
    BirdSettled,
    Revealing,
    HoldingFinal,
    FadingOut,
    Complete,
}

impl SplashPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplashPhase::Mounted => "mounted",
            SplashPhase::BirdEntering => "bird_entering",
            SplashPhase::BirdSettled => "bird_settled",
            SplashPhase::Revealing => "revealing",
            SplashPhase::HoldingFinal => "holding_final",
            SplashPhase::FadingOut => "fading_out",
            SplashPhase::Complete => "complete",
        }
    }
}

/// Phase boundaries in ms after mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestones {
    pub bird_entering: u64,
    pub bird_settled: u64,
    pub revealing: u64,
    pub holding_final: u64,
    pub fading_out: u64,
    pub complete: u64,
}

#[derive(Debug, Clone, Copy)]
struct ScalarIds {
    container_opacity: ScalarId,
    background_opacity: ScalarId,
    bird_x: ScalarId,
    bird_y: ScalarId,
    bird_rotate: ScalarId,
    bird_scale: ScalarId,
    wing_flap: ScalarId,
    net_opacity: ScalarId,
    net_scale: ScalarId,
    net_deployment: ScalarId,
    title_opacity: ScalarId,
    title_scale: ScalarId,
    loading_progress: ScalarId,
}

/// All splash scalars plus the phase boundaries derived from them
#[derive(Debug, Clone)]
pub struct SplashSchedule {
    config: SplashConfig,
    timeline: Timeline,
    ids: ScalarIds,
    milestones: Milestones,
}

impl SplashSchedule {
    pub fn new(config: &SplashConfig) -> Result<Self> {
        config.validate()?;

        let width = config.viewport.width;
        let bird = config.bird_enter_ms as f32;
        let title = config.title_reveal_ms as f32;
        let net = config.net_deploy_ms as f32;
        let half_beat = config.wing_flap_half_ms as f32;

        let mut timeline = Timeline::new();

        let container_opacity = timeline.add(AnimatedScalar::with_steps(
            names::CONTAINER_OPACITY,
            0.0,
            [Step::timing(1.0, config.fade_in_ms as f32).easing(config.fade_easing)],
        )?);
        let background_opacity = timeline.add(AnimatedScalar::with_steps(
            names::BACKGROUND_OPACITY,
            1.0,
            [Step::timing(0.0, config.fade_out_ms as f32)
                .at(config.fade_out_start_ms as f32)
                .easing(config.fade_easing)],
        )?);

        let bird_x = timeline.add(AnimatedScalar::with_steps(
            names::BIRD_X,
            -width,
            [
                Step::timing(width * 0.3, 1500.0).delay(bird),
                Step::timing(width * 0.5, 500.0),
            ],
        )?);
        let bird_y = timeline.add(AnimatedScalar::with_steps(
            names::BIRD_Y,
            -50.0,
            [
                Step::timing(-20.0, 800.0).delay(bird),
                Step::timing(10.0, 400.0),
                Step::timing(0.0, 300.0),
            ],
        )?);
        let bird_rotate = timeline.add(AnimatedScalar::with_steps(
            names::BIRD_ROTATE,
            0.0,
            [
                Step::timing(-10.0, 750.0).delay(bird),
                Step::timing(5.0, 500.0),
                Step::timing(0.0, 250.0),
            ],
        )?);
        let bird_scale = timeline.add(AnimatedScalar::with_steps(
            names::BIRD_SCALE,
            0.0,
            [Step::spring(1.0, SpringConfig::entrance()).delay(bird)],
        )?);

        let mut wing = AnimatedScalar::new(names::WING_FLAP, 0.0);
        wing.wait(bird)?.repeat(
            &[Step::timing(1.0, half_beat), Step::timing(0.0, half_beat)],
            config.wing_flap_count,
        )?;
        let wing_end = wing.end_ms();
        let wing_flap = timeline.add(wing);

        let net_opacity = timeline.add(AnimatedScalar::with_steps(
            names::NET_OPACITY,
            0.0,
            [Step::timing(1.0, 300.0).delay(net)],
        )?);
        let net_scale = timeline.add(AnimatedScalar::with_steps(
            names::NET_SCALE,
            0.0,
            [Step::spring(1.0, SpringConfig::pop()).delay(net)],
        )?);
        let net_deployment = timeline.add(AnimatedScalar::with_steps(
            names::NET_DEPLOYMENT,
            0.0,
            [
                Step::timing(0.3, 200.0).delay(net),
                Step::timing(0.7, 300.0),
                Step::timing(1.0, 400.0),
            ],
        )?);

        let title_opacity = timeline.add(AnimatedScalar::with_steps(
            names::TITLE_OPACITY,
            0.0,
            [Step::timing(1.0, 600.0).delay(title)],
        )?);
        let title_scale = timeline.add(AnimatedScalar::with_steps(
            names::TITLE_SCALE,
            0.5,
            [Step::spring(1.0, SpringConfig::pop()).delay(title)],
        )?);
        let loading_progress = timeline.add(AnimatedScalar::with_steps(
            names::LOADING_PROGRESS,
            0.0,
            [Step::timing(1.0, config.loading_ms as f32).delay(title)],
        )?);

        let ids = ScalarIds {
            container_opacity,
            background_opacity,
            bird_x,
            bird_y,
            bird_rotate,
            bird_scale,
            wing_flap,
            net_opacity,
            net_scale,
            net_deployment,
            title_opacity,
            title_scale,
            loading_progress,
        };

        let end_of = |id: ScalarId| timeline.get(id).map_or(0.0, AnimatedScalar::end_ms) as u64;
        let bird_settled = config.bird_enter_ms.max(wing_end as u64);
        let revealing = bird_settled.max(config.title_reveal_ms.max(config.net_deploy_ms));
        let holding_final = revealing
            .max(end_of(title_opacity))
            .max(end_of(net_opacity))
            .max(end_of(net_deployment));
        let milestones = Milestones {
            bird_entering: config.bird_enter_ms,
            bird_settled,
            revealing,
            holding_final,
            fading_out: config.fade_out_start_ms,
            complete: end_of(background_opacity),
        };
        tracing::debug!(?milestones, scalars = timeline.len(), "splash schedule built");

        Ok(Self {
            config: config.clone(),
            timeline,
            ids,
            milestones,
        })
    }

    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn milestones(&self) -> Milestones {
        self.milestones
    }

    /// When the fade-out stage finishes, in ms after mount
    pub fn fade_out_end_ms(&self) -> u64 {
        self.milestones.complete
    }

    /// Phase at `elapsed_ms` after mount
    pub fn phase_at(&self, elapsed_ms: u64) -> SplashPhase {
        let m = &self.milestones;
        if elapsed_ms >= m.complete {
            SplashPhase::Complete
        } else if elapsed_ms >= m.fading_out {
            SplashPhase::FadingOut
        } else if elapsed_ms >= m.holding_final {
            SplashPhase::HoldingFinal
        } else if elapsed_ms >= m.revealing {
            SplashPhase::Revealing
        } else if elapsed_ms >= m.bird_settled {
            SplashPhase::BirdSettled
        } else if elapsed_ms >= m.bird_entering {
            SplashPhase::BirdEntering
        } else {
            SplashPhase::Mounted
        }
    }

    /// Move every scalar's current value to `elapsed_ms`
    pub fn seek(&mut self, elapsed_ms: u64) {
        self.timeline.seek(elapsed_ms as f32);
    }

    /// Named scalar at `elapsed_ms`
    pub fn sample(&self, name: &str, elapsed_ms: u64) -> Result<f32> {
        Ok(self.timeline.sample(name, elapsed_ms as f32)?)
    }

    /// Frame evaluated straight from the stages at `elapsed_ms`
    pub fn frame_at(
        &self,
        elapsed_ms: u64,
        particles: SmallVec<[ParticleFrame; 12]>,
    ) -> SplashFrame {
        let t = elapsed_ms as f32;
        self.build_frame(elapsed_ms, self.phase_at(elapsed_ms), particles, |id| {
            self.timeline.value_at(id, t)
        })
    }

    /// Frame from the values of the last [`seek`](Self::seek)
    pub fn current_frame(
        &self,
        elapsed_ms: u64,
        phase: SplashPhase,
        particles: SmallVec<[ParticleFrame; 12]>,
    ) -> SplashFrame {
        self.build_frame(elapsed_ms, phase, particles, |id| self.timeline.value(id))
    }

    fn build_frame<F>(
        &self,
        elapsed_ms: u64,
        phase: SplashPhase,
        particles: SmallVec<[ParticleFrame; 12]>,
        read: F,
    ) -> SplashFrame
    where
        F: Fn(ScalarId) -> Option<f32>,
    {
        let ids = &self.ids;
        let value = |id: ScalarId| read(id).unwrap_or_default();
        let wing_flap = value(ids.wing_flap);
        let deployment = value(ids.net_deployment);

        SplashFrame {
            elapsed_ms,
            phase,
            container_opacity: value(ids.container_opacity),
            background_opacity: value(ids.background_opacity),
            bird: BirdPose {
                translate_x: value(ids.bird_x),
                translate_y: value(ids.bird_y),
                scale: value(ids.bird_scale),
                rotate_deg: value(ids.bird_rotate),
                wing_flap,
                wing_scale_y: wing_scale_y(wing_flap),
            },
            net: NetPose {
                opacity: value(ids.net_opacity),
                scale: value(ids.net_scale),
                deployment,
                visible_percent: deployment.clamp(0.0, 1.0) * 100.0,
            },
            title: TitlePose {
                opacity: value(ids.title_opacity),
                scale: value(ids.title_scale),
            },
            loading_progress: value(ids.loading_progress),
            particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nab_animation::Easing;

    fn schedule() -> SplashSchedule {
        SplashSchedule::new(&SplashConfig::default()).unwrap()
    }

    #[test]
    fn test_fade_easing_is_configurable() {
        let config: SplashConfig = toml::from_str("fade_easing = \"linear\"\n").unwrap();
        assert_eq!(config.fade_easing, Easing::Linear);
        let linear = SplashSchedule::new(&config).unwrap();
        assert!((linear.sample(names::BACKGROUND_OPACITY, 4400).unwrap() - 0.5).abs() < 1e-6);
        assert!((linear.sample(names::CONTAINER_OPACITY, 250).unwrap() - 0.5).abs() < 1e-6);

        let standard = schedule();
        assert_eq!(standard.config().fade_easing, Easing::EaseInOutQuad);
        assert!(standard.sample(names::CONTAINER_OPACITY, 100).unwrap() < 0.2);
    }

    #[test]
    fn test_milestones_follow_default_timings() {
        let m = schedule().milestones();
        assert_eq!(m.bird_entering, 500);
        assert_eq!(m.bird_settled, 1700);
        assert_eq!(m.revealing, 1800);
        assert_eq!(m.holding_final, 2700);
        assert_eq!(m.fading_out, 4000);
        assert_eq!(m.complete, 4800);
    }

    #[test]
    fn test_phase_sequence() {
        let schedule = schedule();
        let cases = [
            (0, SplashPhase::Mounted),
            (499, SplashPhase::Mounted),
            (500, SplashPhase::BirdEntering),
            (1699, SplashPhase::BirdEntering),
            (1700, SplashPhase::BirdSettled),
            (1800, SplashPhase::Revealing),
            (2700, SplashPhase::HoldingFinal),
            (4000, SplashPhase::FadingOut),
            (4799, SplashPhase::FadingOut),
            (4800, SplashPhase::Complete),
        ];
        for (t, phase) in cases {
            assert_eq!(schedule.phase_at(t), phase, "at {t}ms");
        }
    }

    #[test]
    fn test_initial_frame() {
        let frame = schedule().frame_at(0, SmallVec::new());
        assert_eq!(frame.container_opacity, 0.0);
        assert_eq!(frame.background_opacity, 1.0);
        assert_eq!(frame.bird.translate_x, -390.0);
        assert_eq!(frame.bird.scale, 0.0);
        assert_eq!(frame.bird.wing_scale_y, 1.0);
        assert_eq!(frame.net.opacity, 0.0);
        assert_eq!(frame.title.opacity, 0.0);
        assert_eq!(frame.title.scale, 0.5);
    }

    #[test]
    fn test_settled_frame_before_fade_out() {
        let frame = schedule().frame_at(3999, SmallVec::new());
        assert_eq!(frame.phase, SplashPhase::HoldingFinal);
        assert_eq!(frame.container_opacity, 1.0);
        assert_eq!(frame.background_opacity, 1.0);
        assert_eq!(frame.bird.translate_x, 195.0);
        assert_eq!(frame.bird.translate_y, 0.0);
        assert_eq!(frame.bird.rotate_deg, 0.0);
        assert_eq!(frame.net.deployment, 1.0);
        assert_eq!(frame.net.visible_percent, 100.0);
        assert_eq!(frame.title.opacity, 1.0);
        assert_eq!(frame.title.scale, 1.0);
        assert_eq!(frame.loading_progress, 1.0);
    }

    #[test]
    fn test_wing_beats_fold_and_open() {
        let schedule = schedule();
        let folded = schedule.frame_at(650, SmallVec::new());
        assert_eq!(folded.bird.wing_flap, 1.0);
        assert!((folded.bird.wing_scale_y - 0.7).abs() < 1e-6);
        assert_eq!(schedule.frame_at(1700, SmallVec::new()).bird.wing_flap, 0.0);
    }

    #[test]
    fn test_seek_matches_pure_frame() {
        let mut schedule = schedule();
        for t in [0, 750, 1800, 2500, 4400, 6000] {
            schedule.seek(t);
            let current = schedule.current_frame(t, schedule.phase_at(t), SmallVec::new());
            assert_eq!(current, schedule.frame_at(t, SmallVec::new()));
        }
    }

    #[test]
    fn test_custom_timings_move_milestones() {
        let config = SplashConfig {
            wing_flap_count: 8,
            fade_out_start_ms: 5000,
            ..SplashConfig::default()
        };
        let m = SplashSchedule::new(&config).unwrap().milestones();
        assert_eq!(m.bird_settled, 2900);
        assert_eq!(m.revealing, 2900);
        assert_eq!(m.complete, 5800);
    }
}
