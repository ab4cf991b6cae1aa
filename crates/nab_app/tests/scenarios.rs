//! Headless scenario runs of the splash
//!
//! These tests verify that:
//! - A scenario file walks the splash from mount to completion
//! - Failed assertions are reported with the failing step
//! - Unmounting mid-run keeps the completion callback from firing

use nab_app::scenario::run_loaded_scenario;
use nab_app::{run_scenario, ReportStatus, SplashScenario};
use nab_splash::{SplashConfig, SplashPhase};
use std::path::Path;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture(name: &str) -> SplashScenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    SplashScenario::from_path(&path).expect("fixture loads")
}

#[test]
fn test_default_scenario_passes() {
    init_tracing();
    let report = run_loaded_scenario(
        &fixture("splash_default.json"),
        SplashConfig::default(),
        nab_animation::FRAME_MS,
    )
    .unwrap();

    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.elapsed_ms, 4800);
    assert_eq!(report.phase, SplashPhase::Complete);
    assert_eq!(report.completions, 1);
}

#[test]
fn test_failed_assertion_names_step() {
    let report = run_scenario(
        r#"{ "steps": [
            { "type": "wait", "ms": 1000 },
            { "type": "assert_phase", "phase": "holding_final" }
        ] }"#,
    )
    .unwrap();

    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.assertion.as_deref(), Some("assert_phase"));
    assert_eq!(report.code.as_deref(), Some("phase_mismatch"));
    assert!(report
        .message
        .as_deref()
        .is_some_and(|m| m.contains("bird_entering")));
}

#[test]
fn test_unknown_scalar_fails_the_step() {
    let report = run_scenario(
        r#"{ "steps": [ { "type": "assert_value", "scalar": "bird.tail", "min": 0.0 } ] }"#,
    )
    .unwrap();
    assert_eq!(report.assertion.as_deref(), Some("assert_value"));
    assert_eq!(report.code.as_deref(), Some("unknown_scalar"));
    assert!(report.message.as_deref().is_some_and(|m| m.contains("bird.tail")));
}

#[test]
fn test_unmount_before_fade_out() {
    let report = run_scenario(
        r#"{ "steps": [
            { "type": "wait", "ms": 3000 },
            { "type": "unmount" },
            { "type": "wait", "ms": 5000 },
            { "type": "assert_complete", "expected": false }
        ] }"#,
    )
    .unwrap();

    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.completions, 0);
    assert_eq!(report.elapsed_ms, 3000);
}

#[test]
fn test_custom_timings() {
    let config = SplashConfig {
        fade_out_start_ms: 3000,
        fade_out_ms: 400,
        ..SplashConfig::default()
    };
    let scenario = SplashScenario::from_json(
        r#"{ "steps": [ { "type": "wait", "ms": 3400 }, { "type": "assert_complete" } ] }"#,
    )
    .unwrap();

    let report = run_loaded_scenario(&scenario, config, 10).unwrap();
    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.elapsed_frames, 340);
}
