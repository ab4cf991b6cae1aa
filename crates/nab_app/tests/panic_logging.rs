//! Process-wide panic logging
//!
//! These tests verify that:
//! - Launching the app several times installs a single panic hook
//! - One panic produces exactly one `[GlobalError]` line

use nab_animation::VirtualClock;
use nab_app::{AppConfig, AppShell, SafeAreaInsets};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_repeated_launches_log_a_panic_once() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let config = AppConfig::default();
        let shells: Vec<_> = (0..3)
            .map(|_| {
                AppShell::launch(VirtualClock::new(), &config, None, SafeAreaInsets::default())
                    .unwrap()
            })
            .collect();
        assert!(shells.iter().all(|shell| shell.bootstrap().error_logging_installed()));

        let result = std::panic::catch_unwind(|| panic!("boom"));
        assert!(result.is_err());
    });

    let output = log.contents();
    assert_eq!(output.matches("[GlobalError]").count(), 1, "{output}");
    assert!(output.contains("boom"));
}
