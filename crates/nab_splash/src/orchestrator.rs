//! Splash orchestrator
//!
//! Owns the splash timeline, the particle timers and the completion callback
//! for one mounted presentation. The host drives it by calling
//! [`SplashOrchestrator::tick`] once per frame; everything time based is read
//! from the injected [`Clock`], so a [`VirtualClock`](nab_animation::VirtualClock)
//! replays the whole presentation deterministically.

use crate::config::SplashConfig;
use crate::error::Result;
use crate::frame::SplashFrame;
use crate::notifier::CompletionNotifier;
use crate::particles::ParticleEmitter;
use crate::schedule::{SplashPhase, SplashSchedule};
use nab_animation::{Clock, DueTimer, TimerQueue};

/// Timer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashEvent {
    /// Fade-out start; arms the completion timer
    BeginFadeOut,
    /// Background fade finished; fires the completion callback
    FadeOutFinished,
    /// Start the next cycle of one particle
    RearmParticle(usize),
}

/// One mounted splash presentation
#[derive(Debug)]
pub struct SplashOrchestrator<C: Clock> {
    clock: C,
    mounted_at: u64,
    schedule: SplashSchedule,
    particles: ParticleEmitter,
    timers: TimerQueue<SplashEvent>,
    notifier: CompletionNotifier,
    phase: SplashPhase,
    elapsed_ms: u64,
    fading: bool,
    complete: bool,
    mounted: bool,
}

impl<C: Clock> SplashOrchestrator<C> {
    /// Build the schedule, arm every timer and take ownership of `on_complete`.
    ///
    /// Time zero is the clock's reading at mount.
    pub fn mount<F>(clock: C, config: SplashConfig, on_complete: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let schedule = SplashSchedule::new(&config)?;
        let mut particles = ParticleEmitter::new(&config.particles, config.viewport)?;

        let mut timers = TimerQueue::new();
        timers.schedule_once(config.fade_out_start_ms, SplashEvent::BeginFadeOut);
        particles.arm(&mut timers, SplashEvent::RearmParticle)?;

        let mounted_at = clock.now_ms();
        tracing::info!(
            mounted_at,
            complete_at = schedule.fade_out_end_ms(),
            particles = particles.len(),
            "splash mounted"
        );

        Ok(Self {
            clock,
            mounted_at,
            schedule,
            particles,
            timers,
            notifier: CompletionNotifier::new(on_complete),
            phase: SplashPhase::Mounted,
            elapsed_ms: 0,
            fading: false,
            complete: false,
            mounted: true,
        })
    }

    /// Catch up with the clock: dispatch due timers and return the frame.
    ///
    /// After [`unmount`](Self::unmount) the presentation is frozen at its last
    /// frame and no timer runs.
    pub fn tick(&mut self) -> SplashFrame {
        if self.mounted {
            let elapsed = self.clock.now_ms().saturating_sub(self.mounted_at);
            self.elapsed_ms = self.elapsed_ms.max(elapsed);

            while let Some(due) = self.timers.pop_due(self.elapsed_ms) {
                self.dispatch(due);
            }
            self.schedule.seek(self.elapsed_ms);
            self.update_phase();
        }

        self.schedule.current_frame(
            self.elapsed_ms,
            self.phase,
            self.particles.frames(self.elapsed_ms),
        )
    }

    /// Visual parameters at `elapsed_ms`, computed from the schedule alone
    pub fn frame_at(&self, elapsed_ms: u64) -> SplashFrame {
        self.schedule
            .frame_at(elapsed_ms, self.particles.frames_at(elapsed_ms))
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// Whether the completion callback has fired
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Time since mount as of the last tick
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn schedule(&self) -> &SplashSchedule {
        &self.schedule
    }

    pub fn particles(&self) -> &ParticleEmitter {
        &self.particles
    }

    /// Cancel every timer and disarm the callback. Safe to call twice.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        let particle_timers = self.particles.cancel(&mut self.timers);
        let other_timers = self.timers.cancel_all();
        self.notifier.disarm();
        tracing::info!(
            elapsed_ms = self.elapsed_ms,
            complete = self.complete,
            cancelled = particle_timers + other_timers,
            "splash unmounted"
        );
    }

    fn dispatch(&mut self, due: DueTimer<SplashEvent>) {
        match due.event {
            SplashEvent::BeginFadeOut => {
                self.fading = true;
                let finish_at = self.schedule.fade_out_end_ms();
                self.timers
                    .schedule_once(finish_at, SplashEvent::FadeOutFinished);
                tracing::debug!(at = due.fire_at, finish_at, "fade-out started");
            }
            SplashEvent::FadeOutFinished => {
                self.complete = true;
                tracing::info!(at = due.fire_at, "splash complete");
                self.notifier.fire();
            }
            SplashEvent::RearmParticle(index) => {
                self.particles.rearm(index, due.fire_at);
            }
        }
    }

    fn update_phase(&mut self) {
        let phase = match self.schedule.phase_at(self.elapsed_ms) {
            SplashPhase::Complete if !self.complete => SplashPhase::FadingOut,
            SplashPhase::FadingOut if !self.fading => SplashPhase::HoldingFinal,
            phase => phase,
        };
        if phase != self.phase {
            tracing::debug!(from = ?self.phase, to = ?phase, at = self.elapsed_ms, "splash phase");
            self.phase = phase;
        }
    }
}

impl<C: Clock> Drop for SplashOrchestrator<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
