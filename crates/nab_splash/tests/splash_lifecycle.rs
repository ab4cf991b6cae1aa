//! Mount-to-completion tests for the splash orchestrator
//!
//! These tests verify that:
//! - The completion callback fires exactly once, when the fade-out ends
//! - Unmounting before completion means it never fires
//! - Particles spawn on their staggered schedule
//! - Reveals are in flight at the documented instants
//! - A re-mount replays an identical presentation

use nab_animation::{Clock, VirtualClock, FRAME_MS};
use nab_splash::{SplashConfig, SplashError, SplashFrame, SplashOrchestrator, SplashPhase};
use parking_lot::Mutex;
use std::sync::Arc;

/// Mount on `clock`, recording the clock reading of every completion
fn mount_recording(
    clock: &VirtualClock,
    config: SplashConfig,
) -> (SplashOrchestrator<VirtualClock>, Arc<Mutex<Vec<u64>>>) {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let log = fired.clone();
    let at = clock.clone();
    let splash = SplashOrchestrator::mount(clock.clone(), config, move || {
        log.lock().push(at.now_ms());
    })
    .expect("default config mounts");
    (splash, fired)
}

fn run_frames(
    splash: &mut SplashOrchestrator<VirtualClock>,
    clock: &VirtualClock,
    until_ms: u64,
) -> Vec<SplashFrame> {
    let mut frames = vec![splash.tick()];
    while splash.elapsed_ms() < until_ms {
        clock.step_frame();
        frames.push(splash.tick());
    }
    frames
}

#[test]
fn test_completion_fires_once_within_window() {
    let clock = VirtualClock::new();
    let (mut splash, fired) = mount_recording(&clock, SplashConfig::default());

    run_frames(&mut splash, &clock, 8000);

    let fired = fired.lock();
    assert_eq!(fired.len(), 1);
    assert!((4000..=4900).contains(&fired[0]), "fired at {}ms", fired[0]);
    assert!(splash.is_complete());
}

#[test]
fn test_completion_lands_on_fade_out_end() {
    let clock = VirtualClock::new();
    let (mut splash, fired) = mount_recording(&clock, SplashConfig::default());

    clock.seek(4800);
    splash.tick();
    assert_eq!(*fired.lock(), vec![4800]);
}

#[test]
fn test_unmount_before_fade_out_never_completes() {
    for unmount_at in [0, 1000, 3999] {
        let clock = VirtualClock::new();
        let (mut splash, fired) = mount_recording(&clock, SplashConfig::default());

        clock.seek(unmount_at);
        splash.tick();
        splash.unmount();
        splash.unmount();
        assert_eq!(splash.pending_timers(), 0);

        clock.seek(20_000);
        splash.tick();
        assert!(fired.lock().is_empty(), "fired after unmount at {unmount_at}ms");
        assert!(!splash.is_complete());
    }
}

#[test]
fn test_unmount_during_fade_out_never_completes() {
    let clock = VirtualClock::new();
    let (mut splash, fired) = mount_recording(&clock, SplashConfig::default());

    clock.seek(4400);
    splash.tick();
    assert_eq!(splash.phase(), SplashPhase::FadingOut);
    drop(splash);

    clock.seek(20_000);
    assert!(fired.lock().is_empty());
}

#[test]
fn test_twelfth_particle_starts_at_1650() {
    let clock = VirtualClock::new();
    let (mut splash, _fired) = mount_recording(&clock, SplashConfig::default());

    assert_eq!(splash.particles().len(), 12);
    assert_eq!(splash.particles().first_start_ms(11), Some(1650));

    clock.seek(1649);
    let before = splash.tick();
    assert_eq!(before.particles[11].opacity, 0.0);

    clock.seek(1750);
    let after = splash.tick();
    assert!(after.particles[11].opacity > 0.0);
}

#[test]
fn test_particles_keep_looping_with_invisible_gap() {
    let clock = VirtualClock::new();
    let (mut splash, _fired) = mount_recording(&clock, SplashConfig::default());

    // Particle 0 cycles at 0, 4000, 8000; invisible for the last second of each
    for (t, visible) in [(3500, false), (4250, true), (7500, false), (9000, true)] {
        clock.seek(t);
        let frame = splash.tick();
        assert_eq!(frame.particles[0].opacity > 0.0, visible, "at {t}ms");
    }
    assert_eq!(splash.particles().particles()[0].cycles(), 3);
}

#[test]
fn test_reveals_in_flight_at_1800() {
    let clock = VirtualClock::new();
    let (mut splash, _fired) = mount_recording(&clock, SplashConfig::default());

    clock.seek(1800);
    let frame = splash.tick();
    assert_eq!(frame.phase, SplashPhase::Revealing);
    assert!(frame.title.opacity > 0.0 && frame.title.opacity <= 1.0);

    clock.seek(1850);
    assert!(splash.tick().net.opacity > 0.0);

    clock.seek(2200);
    assert_eq!(splash.tick().title.opacity, 1.0);
}

#[test]
fn test_tick_matches_pure_frame() {
    let clock = VirtualClock::new();
    let (mut splash, _fired) = mount_recording(&clock, SplashConfig::default());

    for _ in 0..400 {
        let frame = splash.tick();
        assert_eq!(frame, splash.frame_at(frame.elapsed_ms));
        clock.advance(FRAME_MS + 1);
    }
}

#[test]
fn test_remount_replays_identical_schedule() {
    let clock = VirtualClock::new();
    let (mut first, _fired) = mount_recording(&clock, SplashConfig::default());
    let first_frames = run_frames(&mut first, &clock, 6000);
    first.unmount();

    let (mut second, fired) = mount_recording(&clock, SplashConfig::default());
    let second_frames = run_frames(&mut second, &clock, 6000);

    assert_eq!(first_frames, second_frames);
    assert_eq!(fired.lock().len(), 1);
}

#[test]
fn test_config_from_toml_overrides_timings() {
    let config: SplashConfig = toml::from_str(
        r#"
        fade_out_start_ms = 3000
        fade_out_ms = 500

        [particles]
        count = 6
        "#,
    )
    .unwrap();
    assert_eq!(config.bird_enter_ms, 500);
    assert_eq!(config.particles.stagger_ms, 150);

    let clock = VirtualClock::new();
    let (mut splash, fired) = mount_recording(&clock, config);
    assert_eq!(splash.pending_timers(), 7);

    clock.seek(3499);
    splash.tick();
    assert!(fired.lock().is_empty());
    clock.seek(3500);
    splash.tick();
    assert_eq!(*fired.lock(), vec![3500]);
}

#[test]
fn test_mount_rejects_overflowing_stagger() {
    let config: SplashConfig =
        toml::from_str("[particles]\nstagger_ms = 9223372036854775807\n").unwrap();
    let result = SplashOrchestrator::mount(VirtualClock::new(), config, || {});
    assert!(matches!(result, Err(SplashError::Config(_))));
}

#[test]
fn test_frame_serializes_for_dumps() {
    let clock = VirtualClock::new();
    let (splash, _fired) = mount_recording(&clock, SplashConfig::default());
    let json = serde_json::to_value(splash.frame_at(2000)).unwrap();
    assert_eq!(json["phase"], "revealing");
    assert_eq!(json["particles"].as_array().map(Vec::len), Some(12));
}
