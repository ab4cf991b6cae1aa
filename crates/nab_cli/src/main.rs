//! Nets & Birds CLI
//!
//! Inspect the splash schedule, run headless scenarios and price bookings.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nab_animation::{SystemClock, VirtualClock, FRAME_MS};
use nab_app::scenario::run_loaded_scenario;
use nab_app::{AppConfig, BookingForm, Estimate, ServiceId, SplashScenario, CONFIG_FILE};
use nab_splash::{SplashFrame, SplashOrchestrator, SplashPhase};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "netsbirds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Nets & Birds tools", long_about = None)]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print splash frames sampled at a fixed interval
    Timeline {
        /// Sampling interval in ms
        #[arg(long, default_value = "100")]
        step: u64,

        /// Last instant to sample (defaults to the completion instant)
        #[arg(long)]
        until: Option<u64>,

        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Print the phase boundaries
    Phases,

    /// Run a JSON scenario against the splash
    Scenario {
        /// Scenario file
        path: PathBuf,

        /// Also write the report to this relative path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Logical ms per frame
        #[arg(long, default_value_t = FRAME_MS)]
        tick_ms: u64,
    },

    /// Price a booking
    Estimate {
        /// Service id (bird-netting, industrial-netting, bird-spikes, invisible-grills, fabrication)
        service: String,

        /// Area in square feet
        area: String,

        /// Grill size or spike type
        #[arg(long)]
        size: Option<String>,
    },

    /// Print the effective configuration
    Config,

    /// Play the splash in real time, logging phase changes
    Play,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Aligned columns
    Table,
    /// One JSON frame per line
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Timeline {
            step,
            until,
            format,
        } => cmd_timeline(&config, step, until, format),
        Commands::Phases => cmd_phases(&config),
        Commands::Scenario {
            path,
            report,
            tick_ms,
        } => cmd_scenario(&config, path, report, tick_ms),
        Commands::Estimate {
            service,
            area,
            size,
        } => cmd_estimate(&service, area, size),
        Commands::Config => cmd_config(&config),
        Commands::Play => cmd_play(&config),
    }
}

/// Log to stderr so stdout stays machine readable
fn init_logging(config: &AppConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn mount_detached(config: &AppConfig) -> Result<SplashOrchestrator<VirtualClock>> {
    SplashOrchestrator::mount(VirtualClock::new(), config.splash.clone(), || {})
        .context("invalid splash configuration")
}

fn cmd_timeline(config: &AppConfig, step: u64, until: Option<u64>, format: Format) -> Result<()> {
    if step == 0 {
        bail!("--step must be > 0");
    }
    let splash = mount_detached(config)?;
    let until = until.unwrap_or_else(|| splash.schedule().fade_out_end_ms());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Format::Table = format {
        writeln!(
            out,
            "{:>6} {:<14} {:>5} {:>5} {:>8} {:>7} {:>6} {:>6} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            "t_ms", "phase", "cont", "bg", "bird_x", "bird_y", "scale", "rot", "wing", "net", "deploy", "title", "t_scl", "load"
        )?;
    }
    for t in (0..=until).step_by(step as usize) {
        let frame = splash.frame_at(t);
        match format {
            Format::Table => write_row(&mut out, &frame)?,
            Format::Json => writeln!(out, "{}", serde_json::to_string(&frame)?)?,
        }
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, frame: &SplashFrame) -> Result<()> {
    writeln!(
        out,
        "{:>6} {:<14} {:>5.2} {:>5.2} {:>8.1} {:>7.1} {:>6.2} {:>6.1} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
        frame.elapsed_ms,
        frame.phase.as_str(),
        frame.container_opacity,
        frame.background_opacity,
        frame.bird.translate_x,
        frame.bird.translate_y,
        frame.bird.scale,
        frame.bird.rotate_deg,
        frame.bird.wing_flap,
        frame.net.opacity,
        frame.net.deployment,
        frame.title.opacity,
        frame.title.scale,
        frame.loading_progress,
    )?;
    Ok(())
}

fn cmd_phases(config: &AppConfig) -> Result<()> {
    let splash = mount_detached(config)?;
    let m = splash.schedule().milestones();
    let rows = [
        (SplashPhase::Mounted, 0),
        (SplashPhase::BirdEntering, m.bird_entering),
        (SplashPhase::BirdSettled, m.bird_settled),
        (SplashPhase::Revealing, m.revealing),
        (SplashPhase::HoldingFinal, m.holding_final),
        (SplashPhase::FadingOut, m.fading_out),
        (SplashPhase::Complete, m.complete),
    ];
    for (phase, at) in rows {
        println!("{:>6}ms  {}", at, phase.as_str());
    }
    for (index, particle) in splash.particles().particles().iter().enumerate() {
        info!(
            index,
            first_start_ms = particle.spawn_delay_ms(),
            x = particle.translate_x(),
            "particle"
        );
    }
    Ok(())
}

fn cmd_scenario(
    config: &AppConfig,
    path: PathBuf,
    report_path: Option<PathBuf>,
    tick_ms: u64,
) -> Result<()> {
    let scenario = SplashScenario::from_path(&path)?;
    info!(path = %path.display(), steps = scenario.steps.len(), "running scenario");

    let report = run_loaded_scenario(&scenario, config.splash.clone(), tick_ms)?;
    report.write_to_writer(&mut io::stdout().lock())?;
    if let Some(report_path) = report_path {
        report
            .write_to_path(&report_path)
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
    }

    if report.is_failed() {
        bail!(
            "scenario failed at step {} ({}): {}",
            report.failed_step_index.unwrap_or_default(),
            report.code.as_deref().unwrap_or("failed"),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }
    Ok(())
}

fn cmd_estimate(service: &str, area: String, size: Option<String>) -> Result<()> {
    let service: ServiceId = service.parse()?;
    let mut form = BookingForm::preselected(Some(service));
    form.area = area;
    form.size = size.unwrap_or_default();

    let estimate = form.estimate();
    if let Estimate::None = estimate {
        bail!("cannot estimate {service} for area '{}'", form.area);
    }
    println!("{}: {}", service.service().title, estimate);
    Ok(())
}

fn cmd_config(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn cmd_play(config: &AppConfig) -> Result<()> {
    let mut splash = SplashOrchestrator::mount(SystemClock::new(), config.splash.clone(), || {
        info!("completion callback received");
    })
    .context("invalid splash configuration")?;

    let mut phase = splash.phase();
    info!(phase = phase.as_str(), "playing splash");
    while !splash.is_complete() {
        let frame = splash.tick();
        if frame.phase != phase {
            phase = frame.phase;
            info!(at = frame.elapsed_ms, phase = phase.as_str(), "phase");
        }
        std::thread::sleep(Duration::from_millis(FRAME_MS));
    }
    splash.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_timeline_defaults() {
        let cli = Cli::try_parse_from(["netsbirds", "timeline"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
        match cli.command {
            Commands::Timeline {
                step,
                until,
                format,
            } => {
                assert_eq!(step, 100);
                assert_eq!(until, None);
                assert!(matches!(format, Format::Table));
            }
            _ => panic!("expected timeline"),
        }
    }

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "netsbirds",
            "estimate",
            "bird-spikes",
            "30",
            "--size",
            "PVC (₹120)",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Estimate { size: Some(_), .. }));
    }

    #[test]
    fn test_estimate_rejects_unknown_service() {
        assert!(cmd_estimate("gutters", "10".into(), None).is_err());
        assert!(cmd_estimate("bird-netting", "".into(), None).is_err());
    }
}
