//! Decorative floating particles
//!
//! Each particle rises from the bottom of the viewport while fading and scaling
//! in and out, then rests invisible until its next cycle. Spawns are staggered
//! by `index * stagger_ms`; after that every particle loops on its own
//! repeating timer. With the default 3000ms rise in a 4000ms period a particle
//! is invisible for the last 1000ms of every cycle.

use crate::config::{ParticleConfig, Viewport};
use crate::error::Result;
use crate::frame::ParticleFrame;
use nab_animation::{AnimatedScalar, SpringConfig, Step, TimerId, TimerQueue};
use smallvec::SmallVec;

/// Vertical position a particle rises to (just above the top edge)
const RISE_TARGET_Y: f32 = -100.0;

/// Spread factor for horizontal placement (golden ratio conjugate)
const SPREAD: f32 = 0.618_034;

/// One particle's cycle and timer state
#[derive(Debug, Clone)]
pub struct ParticleInstance {
    index: usize,
    spawn_delay_ms: u64,
    translate_x: f32,
    translate_y: AnimatedScalar,
    opacity: AnimatedScalar,
    scale: AnimatedScalar,
    /// Start of the running cycle, in ms after mount
    cycle_started_at: u64,
    /// Cycles started so far, including the first
    cycles: u32,
    timer: Option<TimerId>,
}

impl ParticleInstance {
    fn new(index: usize, config: &ParticleConfig, viewport: Viewport) -> Result<Self> {
        let rise = config.rise_ms as f32;
        let fade = config.fade_ms as f32;
        let bottom = viewport.height;

        let translate_y = AnimatedScalar::with_steps(
            "particle.translate_y",
            bottom,
            [Step::timing(RISE_TARGET_Y, rise), Step::snap(bottom)],
        )?;
        let opacity = AnimatedScalar::with_steps(
            "particle.opacity",
            0.0,
            [
                Step::timing(config.peak_opacity, fade),
                Step::timing(0.0, fade).delay(rise - 2.0 * fade),
                Step::snap(0.0),
            ],
        )?;
        let scale = AnimatedScalar::with_steps(
            "particle.scale",
            0.0,
            [
                Step::spring(1.0, SpringConfig::gentle()),
                Step::timing(0.0, fade).at(rise - fade),
                Step::snap(0.0),
            ],
        )?;

        let spawn_delay_ms = config.spawn_delay_ms(index);
        Ok(Self {
            index,
            spawn_delay_ms,
            translate_x: (0.5 + index as f32 * SPREAD).fract() * viewport.width,
            translate_y,
            opacity,
            scale,
            cycle_started_at: spawn_delay_ms,
            cycles: 1,
            timer: None,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn spawn_delay_ms(&self) -> u64 {
        self.spawn_delay_ms
    }

    pub fn translate_x(&self) -> f32 {
        self.translate_x
    }

    pub fn cycle_started_at(&self) -> u64 {
        self.cycle_started_at
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Frame `local_ms` into a cycle; `None` is the resting pose before spawn
    pub fn sample(&self, local_ms: Option<f32>) -> ParticleFrame {
        match local_ms {
            Some(local) => ParticleFrame {
                index: self.index,
                translate_x: self.translate_x,
                translate_y: self.translate_y.value_at(local),
                opacity: self.opacity.value_at(local),
                scale: self.scale.value_at(local),
            },
            None => ParticleFrame {
                index: self.index,
                translate_x: self.translate_x,
                translate_y: self.translate_y.initial(),
                opacity: self.opacity.initial(),
                scale: self.scale.initial(),
            },
        }
    }

    /// Length of the visible part of a cycle
    pub fn active_ms(&self) -> f32 {
        self.translate_y
            .end_ms()
            .max(self.opacity.end_ms())
            .max(self.scale.end_ms())
    }
}

/// Fixed set of independently looping particles
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    particles: SmallVec<[ParticleInstance; 12]>,
    period_ms: u64,
}

impl ParticleEmitter {
    pub fn new(config: &ParticleConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let particles = (0..config.count)
            .map(|index| ParticleInstance::new(index, config, viewport))
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self {
            particles,
            period_ms: config.period_ms,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn particles(&self) -> &[ParticleInstance] {
        &self.particles
    }

    /// When particle `index` first starts animating, in ms after mount
    pub fn first_start_ms(&self, index: usize) -> Option<u64> {
        self.particles.get(index).map(|p| p.spawn_delay_ms)
    }

    /// Give every particle a repeating timer for its next cycles.
    ///
    /// The first cycle starts at the spawn delay without a timer; the timer
    /// re-arms the cycle one period later and every period after that.
    pub fn arm<E, F>(&mut self, timers: &mut TimerQueue<E>, mut event: F) -> Result<()>
    where
        F: FnMut(usize) -> E,
    {
        for particle in &mut self.particles {
            if let Some(old) = particle.timer.take() {
                timers.cancel(old);
            }
            let first_at = particle.spawn_delay_ms.saturating_add(self.period_ms);
            let id = timers.schedule_repeating(first_at, self.period_ms, event(particle.index))?;
            particle.timer = Some(id);
        }
        tracing::debug!(
            particles = self.particles.len(),
            period_ms = self.period_ms,
            "particle timers armed"
        );
        Ok(())
    }

    /// Start a new cycle for particle `index` at `at_ms`
    pub fn rearm(&mut self, index: usize, at_ms: u64) {
        if let Some(particle) = self.particles.get_mut(index) {
            particle.cycle_started_at = at_ms;
            particle.cycles += 1;
            tracing::trace!(index, at_ms, cycle = particle.cycles, "particle re-armed");
        }
    }

    /// Cancel every particle timer; returns how many were still pending
    pub fn cancel<E>(&mut self, timers: &mut TimerQueue<E>) -> usize {
        self.particles
            .iter_mut()
            .filter_map(|p| p.timer.take())
            .filter(|id| timers.cancel(*id))
            .count()
    }

    /// Whether any particle still holds a timer
    pub fn is_armed(&self) -> bool {
        self.particles.iter().any(|p| p.timer.is_some())
    }

    /// Frames from the cycle starts recorded by timer fires
    pub fn frames(&self, elapsed_ms: u64) -> SmallVec<[ParticleFrame; 12]> {
        self.particles
            .iter()
            .map(|p| {
                let local = elapsed_ms
                    .checked_sub(p.cycle_started_at)
                    .map(|local| local as f32);
                p.sample(local)
            })
            .collect()
    }

    /// Frames computed from the schedule alone
    pub fn frames_at(&self, elapsed_ms: u64) -> SmallVec<[ParticleFrame; 12]> {
        self.particles
            .iter()
            .map(|p| {
                let local = elapsed_ms
                    .checked_sub(p.spawn_delay_ms)
                    .map(|since_spawn| (since_spawn % self.period_ms) as f32);
                p.sample(local)
            })
            .collect()
    }
}
