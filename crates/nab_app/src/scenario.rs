//! Headless splash scenarios
//!
//! A scenario is a JSON list of steps run against a splash mounted on a
//! [`VirtualClock`]. Waiting advances the clock frame by frame and ticks the
//! orchestrator, so timers fire exactly as they would on a real display.
//!
//! ```json
//! { "steps": [
//!     { "type": "wait", "ms": 1800 },
//!     { "type": "assert_phase", "phase": "revealing" },
//!     { "type": "assert_value", "scalar": "title.opacity", "min": 0.0, "max": 1.0 },
//!     { "type": "wait", "ms": 3000 },
//!     { "type": "assert_complete" }
//! ] }
//! ```

use crate::report::{RunSummary, ScenarioReport};
use anyhow::{Context, Result};
use nab_animation::{VirtualClock, FRAME_MS};
use nab_splash::{SplashConfig, SplashOrchestrator, SplashPhase};
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Tolerance for `equals` comparisons
const VALUE_EPSILON: f32 = 1e-4;

/// Sequence of scenario steps.
#[derive(Debug, Clone, Deserialize)]
pub struct SplashScenario {
    pub steps: Vec<ScenarioStep>,
}

impl SplashScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Advance the clock, ticking once per frame
    Wait { ms: u64 },
    AssertPhase { phase: SplashPhase },
    /// Check a named scalar at the current time
    AssertValue {
        scalar: String,
        #[serde(default)]
        min: Option<f32>,
        #[serde(default)]
        max: Option<f32>,
        #[serde(default)]
        equals: Option<f32>,
    },
    AssertComplete {
        #[serde(default = "default_true")]
        expected: bool,
    },
    Unmount,
}

fn default_true() -> bool {
    true
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_phase(expected: SplashPhase, actual: SplashPhase) -> AssertionResult {
    if expected == actual {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "phase_mismatch",
            format!("expected phase {}, got {}", expected.as_str(), actual.as_str()),
        )
    }
}

pub fn evaluate_assert_value(
    scalar: &str,
    value: f32,
    min: Option<f32>,
    max: Option<f32>,
    equals: Option<f32>,
) -> AssertionResult {
    if let Some(expected) = equals {
        if (value - expected).abs() > VALUE_EPSILON {
            return AssertionResult::failed(
                "value_mismatch",
                format!("{scalar}: expected {expected}, got {value}"),
            );
        }
    }
    if let Some(min) = min {
        if value < min {
            return AssertionResult::failed(
                "value_below_min",
                format!("{scalar}: {value} < {min}"),
            );
        }
    }
    if let Some(max) = max {
        if value > max {
            return AssertionResult::failed(
                "value_above_max",
                format!("{scalar}: {value} > {max}"),
            );
        }
    }
    AssertionResult::Passed
}

/// Execute scenario JSON against a default splash.
pub fn run_scenario(input: &str) -> Result<ScenarioReport> {
    let scenario = SplashScenario::from_json(input)?;
    run_loaded_scenario(&scenario, SplashConfig::default(), FRAME_MS)
}

/// Execute a pre-loaded scenario, advancing `tick_ms` per frame.
pub fn run_loaded_scenario(
    scenario: &SplashScenario,
    config: SplashConfig,
    tick_ms: u64,
) -> Result<ScenarioReport> {
    let tick_ms = tick_ms.max(1);
    let clock = VirtualClock::new();
    let completions = Arc::new(AtomicUsize::new(0));
    let seen = completions.clone();
    let mut splash = SplashOrchestrator::mount(clock.clone(), config, move || {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .context("failed to mount splash")?;
    splash.tick();

    let mut elapsed_frames: u64 = 0;
    let summary = |splash: &SplashOrchestrator<VirtualClock>, frames: u64| RunSummary {
        elapsed_frames: frames,
        elapsed_ms: splash.elapsed_ms(),
        phase: splash.phase(),
        completions: completions.load(Ordering::SeqCst),
    };

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let (assertion, result) = match step {
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                while remaining > 0 {
                    let step_ms = remaining.min(tick_ms);
                    remaining -= step_ms;
                    clock.advance(step_ms);
                    splash.tick();
                    elapsed_frames += 1;
                }
                continue;
            }
            ScenarioStep::Unmount => {
                splash.unmount();
                continue;
            }
            ScenarioStep::AssertPhase { phase } => (
                "assert_phase",
                evaluate_assert_phase(*phase, splash.phase()),
            ),
            ScenarioStep::AssertValue {
                scalar,
                min,
                max,
                equals,
            } => {
                let result = match splash.schedule().sample(scalar, splash.elapsed_ms()) {
                    Ok(value) => evaluate_assert_value(scalar, value, *min, *max, *equals),
                    Err(err) => AssertionResult::failed("unknown_scalar", err.to_string()),
                };
                ("assert_value", result)
            }
            ScenarioStep::AssertComplete { expected } => {
                let complete = splash.is_complete();
                let result = if complete == *expected {
                    AssertionResult::Passed
                } else {
                    AssertionResult::failed(
                        "completion_mismatch",
                        format!("expected complete={expected}, got {complete}"),
                    )
                };
                ("assert_complete", result)
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!(step_index, assertion, %code, %message, "scenario step failed");
            return Ok(ScenarioReport::failed(
                assertion,
                code,
                step_index,
                message,
                summary(&splash, elapsed_frames),
            ));
        }
    }

    Ok(ScenarioReport::passed(summary(&splash, elapsed_frames)))
}
