//! Nets & Birds Splash Sequencer
//!
//! The intro presentation as a deterministic schedule:
//!
//! - [`SplashSchedule`]: every scalar of the intro as declarative stages
//! - [`ParticleEmitter`]: decorative particles, each re-armed by its own timer
//! - [`CompletionNotifier`]: the host's completion callback, fired at most once
//! - [`SplashOrchestrator`]: mounts the above against a [`Clock`](nab_animation::Clock)
//!
//! Visual parameters for any instant are available through
//! [`SplashOrchestrator::frame_at`], independent of any rendering loop.

pub mod config;
pub mod error;
pub mod frame;
pub mod notifier;
pub mod orchestrator;
pub mod particles;
pub mod schedule;

pub use config::{ParticleConfig, SplashConfig, Viewport};
pub use error::{Result, SplashError};
pub use frame::{BirdPose, NetPose, ParticleFrame, SplashFrame, TitlePose};
pub use notifier::CompletionNotifier;
pub use orchestrator::{SplashEvent, SplashOrchestrator};
pub use particles::{ParticleEmitter, ParticleInstance};
pub use schedule::{Milestones, SplashPhase, SplashSchedule};
