//! Report output model for splash scenario runs.

use anyhow::{bail, Context, Result};
use nab_splash::SplashPhase;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path};

/// Report status for a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    /// Machine-readable failure code, e.g. `phase_mismatch`
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Phase after the last executed step
    pub phase: SplashPhase,
    /// How many times the completion callback ran
    pub completions: usize,
}

/// Where a run stopped
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub phase: SplashPhase,
    pub completions: usize,
}

impl ScenarioReport {
    pub fn passed(summary: RunSummary) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            elapsed_frames: summary.elapsed_frames,
            elapsed_ms: summary.elapsed_ms,
            phase: summary.phase,
            completions: summary.completions,
        }
    }

    pub fn failed(
        assertion: &str,
        code: String,
        failed_step_index: usize,
        message: String,
        summary: RunSummary,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            ..Self::passed(summary)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    /// Write the report as pretty JSON under the working directory.
    ///
    /// Only relative paths that stay inside the working directory are
    /// accepted; missing parent directories are created.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let escapes = path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::RootDir | Component::ParentDir | Component::Prefix(_)));
        if escapes {
            bail!("report path {} leaves the working directory", path.display());
        }
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to_writer(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Pretty JSON followed by a newline
    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}
