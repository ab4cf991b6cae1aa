//! Nets & Birds Animation Core
//!
//! Staged scalar animations evaluated against an injectable clock.
//!
//! # Features
//!
//! - **Stages**: ordered, non-overlapping transitions per scalar with relative or absolute starts
//! - **Springs**: closed-form damped oscillators with an analytic settle time
//! - **Timelines**: named scalars sampled together at one point in time
//! - **Timers**: one-shot and repeating timers with cancellation
//! - **Clocks**: a monotonic system clock and a fast-forwardable virtual clock

pub mod clock;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod spring;
pub mod stage;
pub mod timeline;

pub use clock::{Clock, SystemClock, VirtualClock, FRAME_MS};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use scheduler::{DueTimer, TimerId, TimerQueue};
pub use spring::SpringConfig;
pub use stage::{AnimatedScalar, Motion, StageDefinition, Step, StepStart};
pub use timeline::{ScalarId, Timeline};
