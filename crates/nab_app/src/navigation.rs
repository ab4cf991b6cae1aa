//! Routes, the slide-down menu and the router seam

use crate::catalog::ServiceId;
use parking_lot::Mutex;
use std::fmt;
use std::str::FromStr;

/// A screen the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Services,
    /// Booking form, optionally with a service pre-selected
    Booking { service: Option<ServiceId> },
    Gallery,
    About,
    Contact,
}

impl Route {
    pub fn booking(service: ServiceId) -> Self {
        Route::Booking {
            service: Some(service),
        }
    }

    /// Path without the query string
    pub fn base_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Services => "/services",
            Route::Booking { .. } => "/booking",
            Route::Gallery => "/gallery",
            Route::About => "/about",
            Route::Contact => "/contact",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Booking {
                service: Some(service),
            } => write!(f, "/booking?service={service}"),
            route => f.write_str(route.base_path()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route for '{0}'")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        let route = match path {
            "/" | "" => Route::Home,
            "/services" => Route::Services,
            "/booking" => Route::Booking {
                // Unknown service ids open the form with nothing selected
                service: query
                    .into_iter()
                    .flat_map(|q| q.split('&'))
                    .filter_map(|pair| pair.strip_prefix("service="))
                    .find_map(|id| id.parse().ok()),
            },
            "/gallery" => Route::Gallery,
            "/about" => Route::About,
            "/contact" => Route::Contact,
            _ => return Err(UnknownRoute(s.to_string())),
        };
        Ok(route)
    }
}

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    Home,
    Services,
    Booking,
    Gallery,
    About,
    Contact,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

pub static MENU_ITEMS: [MenuItem; 6] = [
    MenuItem {
        id: MenuItemId::Home,
        title: "Home",
        icon: "home-outline",
        route: Route::Home,
    },
    MenuItem {
        id: MenuItemId::Services,
        title: "Services",
        icon: "construct-outline",
        route: Route::Services,
    },
    MenuItem {
        id: MenuItemId::Booking,
        title: "Book Service",
        icon: "calendar-outline",
        route: Route::Booking { service: None },
    },
    MenuItem {
        id: MenuItemId::Gallery,
        title: "Gallery",
        icon: "images-outline",
        route: Route::Gallery,
    },
    MenuItem {
        id: MenuItemId::About,
        title: "About Us",
        icon: "information-circle-outline",
        route: Route::About,
    },
    MenuItem {
        id: MenuItemId::Contact,
        title: "Contact",
        icon: "call-outline",
        route: Route::Contact,
    },
];

impl MenuItemId {
    /// Menu entry highlighted while `route` is showing
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => MenuItemId::Home,
            Route::Services => MenuItemId::Services,
            Route::Booking { .. } => MenuItemId::Booking,
            Route::Gallery => MenuItemId::Gallery,
            Route::About => MenuItemId::About,
            Route::Contact => MenuItemId::Contact,
        }
    }

    pub fn item(&self) -> &'static MenuItem {
        &MENU_ITEMS[*self as usize]
    }
}

/// Navigation backend
pub trait Router {
    /// Open `route` on top of the current screen
    fn push(&self, route: Route);
    /// Swap the current screen for `route`
    fn replace(&self, route: Route);
}

/// Stack-backed router
#[derive(Debug)]
pub struct HistoryRouter {
    stack: Mutex<Vec<Route>>,
}

impl HistoryRouter {
    /// Start with `root` as the only screen
    pub fn new(root: Route) -> Self {
        Self {
            stack: Mutex::new(vec![root]),
        }
    }

    pub fn current(&self) -> Route {
        self.stack.lock().last().copied().unwrap_or(Route::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().len()
    }

    /// Pop the current screen; the root is never popped
    pub fn back(&self) -> Option<Route> {
        let mut stack = self.stack.lock();
        if stack.len() > 1 {
            stack.pop()
        } else {
            None
        }
    }

    pub fn history(&self) -> Vec<Route> {
        self.stack.lock().clone()
    }
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router for HistoryRouter {
    fn push(&self, route: Route) {
        self.stack.lock().push(route);
    }

    fn replace(&self, route: Route) {
        let mut stack = self.stack.lock();
        stack.pop();
        stack.push(route);
    }
}

/// Top bar menu state for one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationMenu {
    open: bool,
    active: MenuItemId,
}

impl NavigationMenu {
    pub fn new(active: MenuItemId) -> Self {
        Self {
            open: false,
            active,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn items(&self) -> &'static [MenuItem] {
        &MENU_ITEMS
    }

    pub fn active(&self) -> MenuItemId {
        self.active
    }

    pub fn is_active(&self, id: MenuItemId) -> bool {
        self.active == id
    }

    /// Close the menu and navigate; Home replaces, everything else pushes
    pub fn select<R: Router + ?Sized>(&mut self, id: MenuItemId, router: &R) -> Route {
        let route = id.item().route;
        tracing::info!(%route, "navigating");
        self.open = false;
        self.active = id;
        if route == Route::Home {
            router.replace(route);
        } else {
            router.push(route);
        }
        route
    }
}

impl Default for NavigationMenu {
    fn default() -> Self {
        Self::new(MenuItemId::Home)
    }
}
