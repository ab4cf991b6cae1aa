//! Nets & Birds app surfaces
//!
//! Screens are plain state plus operations so any front end can render them:
//!
//! - [`catalog`]: services, gallery, testimonials and company details
//! - [`booking`] and [`contact`]: forms with local validation
//! - [`navigation`]: routes, the slide-down menu and the [`Router`] seam
//! - [`bootstrap`]: one-time setup guards and device emulation
//! - [`shell`]: the root view that overlays the splash until it completes
//! - [`scenario`]: JSON-driven headless runs of the splash

pub mod booking;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod navigation;
pub mod report;
pub mod scenario;
pub mod shell;
pub mod submission;

pub use booking::{BookingForm, Confirmation, Estimate};
pub use bootstrap::{Bootstrap, LoggedTransport, SafeAreaInsets, Transport};
pub use catalog::{Service, ServiceId};
pub use config::{AppConfig, DeviceKind, Platform, CONFIG_FILE};
pub use contact::{ContactForm, QuickContact};
pub use error::{AppError, FormError, Result, TransportFailure};
pub use navigation::{HistoryRouter, MenuItemId, NavigationMenu, Route, Router};
pub use report::{ReportStatus, ScenarioReport};
pub use scenario::{run_loaded_scenario, run_scenario, ScenarioStep, SplashScenario};
pub use shell::{AppShell, ShellView};
pub use submission::{MemorySink, SubmissionKind, SubmissionSink, TracingSink};
