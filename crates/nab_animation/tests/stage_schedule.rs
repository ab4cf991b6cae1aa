//! Integration tests for staged scalars driven by a virtual clock
//!
//! These tests verify that:
//! - Every stage lands exactly on its target at delay + duration
//! - Non-elastic stages approach their targets without overshoot
//! - Timers and timelines agree when driven by the same clock

use nab_animation::{
    AnimatedScalar, AnimationError, Clock, Easing, SpringConfig, Step, Timeline, TimerQueue,
    VirtualClock,
};

const EASINGS: [Easing; 5] = [
    Easing::Linear,
    Easing::EaseInOutQuad,
    Easing::EaseOutCubic,
    Easing::EaseInQuart,
    Easing::CubicBezier(0.42, 0.0, 0.58, 1.0),
];

#[test]
fn test_each_stage_hits_target_at_delay_plus_duration() {
    for easing in EASINGS {
        let scalar = AnimatedScalar::with_steps(
            "bird.x",
            -390.0,
            [
                Step::timing(117.0, 1500.0).delay(500.0).easing(easing),
                Step::timing(195.0, 500.0).easing(easing),
            ],
        )
        .unwrap();

        for stage in scalar.stages() {
            assert_eq!(scalar.value_at(stage.end_ms()), stage.to, "{easing:?}");
        }
        assert_eq!(scalar.stages()[1].end_ms(), 2500.0);
    }
}

#[test]
fn test_no_overshoot_for_timed_stages() {
    for easing in EASINGS {
        let scalar = AnimatedScalar::with_steps(
            "bird.rotate",
            0.0,
            [
                Step::timing(-10.0, 750.0).easing(easing),
                Step::timing(5.0, 500.0).easing(easing),
                Step::timing(0.0, 250.0).easing(easing),
            ],
        )
        .unwrap();

        for stage in scalar.stages() {
            let (lo, hi) = if stage.from < stage.to {
                (stage.from, stage.to)
            } else {
                (stage.to, stage.from)
            };
            let mut prev = stage.from;
            for step in 0..=50 {
                let t = stage.start_ms + stage.duration_ms * step as f32 / 50.0;
                let v = scalar.value_at(t);
                assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "{easing:?} left range at {t}");
                assert!(
                    (stage.to - v).abs() <= (stage.to - prev).abs() + 1e-4,
                    "{easing:?} moved away from target at {t}"
                );
                prev = v;
            }
        }
    }
}

#[test]
fn test_spring_lands_on_target_at_settle_time() {
    let scalar =
        AnimatedScalar::with_steps("title.scale", 0.5, [Step::spring(1.0, SpringConfig::pop()).delay(1600.0)])
            .unwrap();
    let stage = scalar.stages()[0];
    assert_eq!(stage.start_ms, 1600.0);
    assert_eq!(scalar.value_at(stage.end_ms()), 1.0);
    assert_eq!(scalar.value_at(1600.0), 0.5);
}

#[test]
fn test_malformed_steps_fail_instead_of_clamping() {
    let err = AnimatedScalar::with_steps("net.opacity", 0.0, [Step::timing(1.0, -300.0)]).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidParameter { name: "duration_ms", value } if value == -300.0));
}

#[test]
fn test_timeline_and_timers_share_one_clock() {
    let clock = VirtualClock::new();
    let mut timeline = Timeline::new();
    let background = timeline.add(
        AnimatedScalar::with_steps("background.opacity", 1.0, [Step::timing(0.0, 800.0).at(4000.0)])
            .unwrap(),
    );
    let end = timeline.get(background).unwrap().end_ms() as u64;

    let mut timers = TimerQueue::new();
    timers.schedule_once(end, "complete");

    let mut fired_at = None;
    while fired_at.is_none() {
        clock.step_frame();
        let now = clock.now_ms();
        timeline.seek(now as f32);
        if let Some(due) = timers.pop_due(now) {
            fired_at = Some(now);
            assert_eq!(due.event, "complete");
            assert_eq!(timeline.value(background), Some(0.0));
        }
    }

    let fired_at = fired_at.unwrap();
    assert!((4800..4800 + 16).contains(&fired_at));
}
