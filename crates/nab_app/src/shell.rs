//! Root app shell
//!
//! Runs bootstrap, overlays the splash until it reports completion, then
//! drops it and leaves the routed screens visible.

use crate::bootstrap::{Bootstrap, SafeAreaInsets};
use crate::config::AppConfig;
use crate::error::Result;
use crate::navigation::{HistoryRouter, MenuItemId, NavigationMenu, Route, Router};
use nab_animation::Clock;
use nab_splash::{SplashFrame, SplashOrchestrator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the shell shows this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ShellView {
    /// Splash overlay on top of the route
    Splash { route: Route, frame: SplashFrame },
    /// Just the route
    Screen { route: Route },
}

/// Top-level app state
#[derive(Debug)]
pub struct AppShell<C: Clock> {
    bootstrap: Bootstrap,
    splash: Option<SplashOrchestrator<C>>,
    splash_done: Arc<AtomicBool>,
    router: HistoryRouter,
    menu: NavigationMenu,
    insets: SafeAreaInsets,
}

impl<C: Clock> AppShell<C> {
    /// Bootstrap the app and mount the splash on `clock`.
    ///
    /// `emulate` is the `emulate` query parameter, if the web build got one;
    /// it takes precedence over the configured device.
    pub fn launch(
        clock: C,
        config: &AppConfig,
        emulate: Option<&str>,
        actual_insets: SafeAreaInsets,
    ) -> Result<Self> {
        let mut bootstrap = Bootstrap::new(config.platform.target);
        bootstrap.install_error_logging();
        bootstrap.resolve_emulation(emulate.or(config.platform.emulate.as_deref()));
        let insets = bootstrap.insets(actual_insets);

        let splash_done = Arc::new(AtomicBool::new(false));
        let done = splash_done.clone();
        let splash = SplashOrchestrator::mount(clock, config.splash.clone(), move || {
            done.store(true, Ordering::SeqCst);
        })?;

        tracing::info!(platform = ?config.platform.target, ?insets, "app launched");
        Ok(Self {
            bootstrap,
            splash: Some(splash),
            splash_done,
            router: HistoryRouter::default(),
            menu: NavigationMenu::default(),
            insets,
        })
    }

    /// Advance the splash if it is still showing and describe the view
    pub fn tick(&mut self) -> ShellView {
        let route = self.router.current();
        let frame = self.splash.as_mut().map(SplashOrchestrator::tick);

        if self.splash_done.load(Ordering::SeqCst) && self.splash.take().is_some() {
            tracing::info!("splash dismissed");
        }
        match frame {
            Some(frame) if self.splash.is_some() => ShellView::Splash { route, frame },
            _ => ShellView::Screen { route },
        }
    }

    pub fn is_splash_visible(&self) -> bool {
        self.splash.is_some()
    }

    pub fn splash(&self) -> Option<&SplashOrchestrator<C>> {
        self.splash.as_ref()
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    pub fn bootstrap_mut(&mut self) -> &mut Bootstrap {
        &mut self.bootstrap
    }

    pub fn insets(&self) -> SafeAreaInsets {
        self.insets
    }

    pub fn current_route(&self) -> Route {
        self.router.current()
    }

    pub fn router(&self) -> &HistoryRouter {
        &self.router
    }

    pub fn menu(&self) -> &NavigationMenu {
        &self.menu
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    /// Pick a menu entry
    pub fn navigate(&mut self, id: MenuItemId) -> Route {
        self.menu.select(id, &self.router)
    }

    /// Open a route directly (service cards, call-to-action buttons)
    pub fn open(&mut self, route: Route) {
        tracing::info!(%route, "opening");
        self.router.push(route);
        self.menu = NavigationMenu::new(MenuItemId::for_route(&route));
    }

    /// Go back one screen; returns the screen now showing
    pub fn back(&mut self) -> Route {
        self.router.back();
        let route = self.router.current();
        self.menu = NavigationMenu::new(MenuItemId::for_route(&route));
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceId;
    use crate::config::Platform;
    use nab_animation::VirtualClock;

    fn launch(clock: &VirtualClock) -> AppShell<VirtualClock> {
        AppShell::launch(
            clock.clone(),
            &AppConfig::default(),
            None,
            SafeAreaInsets::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_splash_overlays_until_complete() {
        let clock = VirtualClock::new();
        let mut shell = launch(&clock);

        clock.seek(2000);
        assert!(matches!(shell.tick(), ShellView::Splash { .. }));

        clock.seek(4800);
        assert_eq!(shell.tick(), ShellView::Screen { route: Route::Home });
        assert!(!shell.is_splash_visible());
    }

    #[test]
    fn test_navigation_behind_splash() {
        let clock = VirtualClock::new();
        let mut shell = launch(&clock);

        shell.toggle_menu();
        assert_eq!(shell.navigate(MenuItemId::Services), Route::Services);
        shell.open(Route::booking(ServiceId::InvisibleGrills));
        assert_eq!(shell.current_route().to_string(), "/booking?service=invisible-grills");
        assert!(shell.menu().is_active(MenuItemId::Booking));

        assert_eq!(shell.back(), Route::Services);
        assert!(shell.menu().is_active(MenuItemId::Services));
    }

    #[test]
    fn test_emulation_from_config() {
        let clock = VirtualClock::new();
        let mut config = AppConfig::default();
        config.platform.target = Platform::Web;
        config.platform.emulate = Some("android".into());

        let shell =
            AppShell::launch(clock, &config, None, SafeAreaInsets::default()).unwrap();
        assert_eq!(shell.insets().top, 40);
        assert!(shell.bootstrap().error_logging_installed());
    }
}
