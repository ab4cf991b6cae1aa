//! Staged scalar animations
//!
//! An [`AnimatedScalar`] owns an ordered list of [`StageDefinition`]s. Each stage
//! moves the scalar from the previous target to its own target. Stages on one
//! scalar never overlap: a relative step starts `delay_ms` after its predecessor
//! ends, an absolute step starts at a fixed offset from the scalar's origin and
//! must not begin before its predecessor has finished.
//!
//! Evaluation is a pure function of elapsed time ([`AnimatedScalar::value_at`]),
//! so schedules can be fast-forwarded against a virtual clock.

use crate::easing::Easing;
use crate::error::{check_ms, AnimationError, Result};
use crate::spring::SpringConfig;
use smallvec::SmallVec;

/// How a stage travels between its endpoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Eased interpolation over a fixed duration
    Timing { duration_ms: f32, easing: Easing },
    /// Closed-form spring; its duration is the settle time
    Spring(SpringConfig),
}

impl Motion {
    fn validate(&self) -> Result<()> {
        match self {
            Motion::Timing { duration_ms, .. } => check_ms("duration_ms", *duration_ms).map(|_| ()),
            Motion::Spring(config) => config.validate(),
        }
    }

    /// Duration of the stage in milliseconds
    pub fn duration_ms(&self) -> f32 {
        match self {
            Motion::Timing { duration_ms, .. } => *duration_ms,
            Motion::Spring(config) => config.settle_ms(),
        }
    }

    /// Whether values may leave the `[from, to]` range while the stage runs
    pub fn is_elastic(&self) -> bool {
        matches!(self, Motion::Spring(config) if config.is_underdamped())
    }
}

/// Where a step starts relative to the scalar
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepStart {
    /// Starts `delay_ms` after the previous stage ends (or after the origin)
    AfterPrevious { delay_ms: f32 },
    /// Starts at a fixed offset from the scalar's origin
    At { offset_ms: f32 },
}

/// Unresolved builder input for one stage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub start: StepStart,
    pub motion: Motion,
    pub to: f32,
}

impl Step {
    /// Eased transition to `to` over `duration_ms`, using [`Easing::STANDARD`]
    pub fn timing(to: f32, duration_ms: f32) -> Self {
        Self {
            start: StepStart::AfterPrevious { delay_ms: 0.0 },
            motion: Motion::Timing {
                duration_ms,
                easing: Easing::STANDARD,
            },
            to,
        }
    }

    /// Spring transition to `to`
    pub fn spring(to: f32, config: SpringConfig) -> Self {
        Self {
            start: StepStart::AfterPrevious { delay_ms: 0.0 },
            motion: Motion::Spring(config),
            to,
        }
    }

    /// Instant jump to `to`
    pub fn snap(to: f32) -> Self {
        Self::timing(to, 0.0)
    }

    /// Builder: wait `delay_ms` after the previous stage before starting
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.start = StepStart::AfterPrevious { delay_ms };
        self
    }

    /// Builder: start at an absolute offset from the scalar's origin
    pub fn at(mut self, offset_ms: f32) -> Self {
        self.start = StepStart::At { offset_ms };
        self
    }

    /// Builder: set the easing curve (ignored by springs)
    pub fn easing(mut self, easing: Easing) -> Self {
        if let Motion::Timing { duration_ms, .. } = self.motion {
            self.motion = Motion::Timing {
                duration_ms,
                easing,
            };
        }
        self
    }
}

/// A resolved stage on a scalar's timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageDefinition {
    /// Start of the stage, relative to the scalar's origin
    pub start_ms: f32,
    /// Gap between the previous stage's end and this stage's start
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub from: f32,
    pub to: f32,
    pub motion: Motion,
}

impl StageDefinition {
    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    /// Value `local_ms` after this stage started
    pub fn sample(&self, local_ms: f32) -> f32 {
        if local_ms >= self.duration_ms {
            return self.to;
        }
        if local_ms <= 0.0 {
            return self.from;
        }
        match self.motion {
            Motion::Timing { easing, .. } => {
                let progress = easing.apply(local_ms / self.duration_ms);
                self.from + (self.to - self.from) * progress
            }
            Motion::Spring(config) => self.to + (self.from - self.to) * config.displacement(local_ms),
        }
    }
}

/// A scalar driven through an ordered list of stages
#[derive(Clone, Debug)]
pub struct AnimatedScalar {
    name: &'static str,
    initial: f32,
    stages: SmallVec<[StageDefinition; 4]>,
    /// Delay carried into the next relative step (see [`AnimatedScalar::wait`])
    pending_delay_ms: f32,
    current: f32,
}

impl AnimatedScalar {
    /// A scalar resting on `initial` with no stages
    pub fn new(name: &'static str, initial: f32) -> Self {
        Self {
            name,
            initial,
            stages: SmallVec::new(),
            pending_delay_ms: 0.0,
            current: initial,
        }
    }

    /// Build a scalar and push every step in order
    pub fn with_steps<I>(name: &'static str, initial: f32, steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = Step>,
    {
        let mut scalar = Self::new(name, initial);
        for step in steps {
            scalar.push(step)?;
        }
        Ok(scalar)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Final target once every stage has run
    pub fn target(&self) -> f32 {
        self.stages.last().map_or(self.initial, |s| s.to)
    }

    /// End of the last stage relative to the origin (0 with no stages)
    pub fn end_ms(&self) -> f32 {
        self.stages.last().map_or(0.0, StageDefinition::end_ms)
    }

    /// Add a delay in front of the next relative step.
    ///
    /// Lets a whole [`repeat`](Self::repeat) block be delayed once without
    /// delaying every iteration.
    pub fn wait(&mut self, delay_ms: f32) -> Result<&mut Self> {
        self.pending_delay_ms += check_ms("delay_ms", delay_ms)?;
        Ok(self)
    }

    /// Resolve a step and append it as the next stage.
    pub fn push(&mut self, step: Step) -> Result<&mut Self> {
        step.motion.validate()?;
        let previous_end = self.end_ms();

        let (start_ms, delay_ms) = match step.start {
            StepStart::AfterPrevious { delay_ms } => {
                let delay = check_ms("delay_ms", delay_ms)? + self.pending_delay_ms;
                (previous_end + delay, delay)
            }
            StepStart::At { offset_ms } => {
                let offset = check_ms("offset_ms", offset_ms)?;
                if offset < previous_end {
                    return Err(AnimationError::StepOverlap {
                        scalar: self.name,
                        index: self.stages.len(),
                        offset_ms: offset,
                        previous_end_ms: previous_end,
                    });
                }
                (offset, offset - previous_end)
            }
        };

        let stage = StageDefinition {
            start_ms,
            delay_ms,
            duration_ms: step.motion.duration_ms(),
            from: self.target(),
            to: step.to,
            motion: step.motion,
        };
        tracing::trace!(
            scalar = self.name,
            index = self.stages.len(),
            start_ms = stage.start_ms,
            duration_ms = stage.duration_ms,
            to = stage.to,
            "stage resolved"
        );
        self.pending_delay_ms = 0.0;
        self.stages.push(stage);
        Ok(self)
    }

    /// Append `steps` back to back, `count` times.
    pub fn repeat(&mut self, steps: &[Step], count: u32) -> Result<&mut Self> {
        for _ in 0..count {
            for step in steps {
                self.push(*step)?;
            }
        }
        Ok(self)
    }

    /// Index of the stage that owns time `t_ms`: the last stage that has started.
    pub fn stage_index_at(&self, t_ms: f32) -> Option<usize> {
        self.stages.iter().rposition(|s| s.start_ms <= t_ms)
    }

    /// Value at `t_ms` after the origin.
    pub fn value_at(&self, t_ms: f32) -> f32 {
        match self.stage_index_at(t_ms) {
            Some(index) => {
                let stage = &self.stages[index];
                stage.sample(t_ms - stage.start_ms)
            }
            None => self.initial,
        }
    }

    /// Whether every stage has finished by `t_ms`
    pub fn is_settled_at(&self, t_ms: f32) -> bool {
        t_ms >= self.end_ms()
    }

    /// Move the current value to `t_ms` and return it
    pub fn advance_to(&mut self, t_ms: f32) -> f32 {
        self.current = self.value_at(t_ms);
        self.current
    }

    /// Value as of the last [`advance_to`](Self::advance_to)
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Drop the current value back to the initial value
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
