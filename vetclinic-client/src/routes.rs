//! Navigation table: which view each path shows.

use strum::{Display, EnumIter};

/// Maximum number of redirects followed by [`resolve`].
const MAX_REDIRECTS: usize = 8;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum View {
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// Landing page after sign-in.
    Dashboard,
    /// Owner list.
    Owners,
    /// Pet list.
    Pets,
    /// Appointment list.
    Appointments,
    /// Treatments recorded on appointments.
    Treatments,
}

/// What a path leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a view.
    View(View),
    /// Navigate to another path instead.
    Redirect(&'static str),
}

/// One entry of the navigation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Exact path, without parameters.
    pub path: &'static str,
    /// Route name used for named navigation; `None` for unnamed paths.
    pub name: Option<&'static str>,
    /// Destination.
    pub target: RouteTarget,
}

/// Every navigable path.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: None,
        target: RouteTarget::Redirect("/login"),
    },
    Route {
        path: "/login",
        name: Some("login"),
        target: RouteTarget::View(View::Login),
    },
    Route {
        path: "/register",
        name: Some("register"),
        target: RouteTarget::View(View::Register),
    },
    Route {
        path: "/dashboard",
        name: Some("dashboard"),
        target: RouteTarget::View(View::Dashboard),
    },
    Route {
        path: "/owners",
        name: Some("owners"),
        target: RouteTarget::View(View::Owners),
    },
    Route {
        path: "/pets",
        name: Some("pets"),
        target: RouteTarget::View(View::Pets),
    },
    Route {
        path: "/appointments",
        name: Some("appointments"),
        target: RouteTarget::View(View::Appointments),
    },
    Route {
        path: "/treatments",
        name: Some("treatments"),
        target: RouteTarget::View(View::Treatments),
    },
];

/// Table entry for `path`. A single trailing slash is ignored.
#[must_use]
pub fn lookup(path: &str) -> Option<&'static Route> {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    ROUTES.iter().find(|route| route.path == trimmed)
}

/// The view shown for `path`, following redirects.
///
/// Returns `None` for paths outside the table and for redirect chains longer
/// than the table allows.
#[must_use]
pub fn resolve(path: &str) -> Option<View> {
    let mut current = path;
    for _ in 0..=MAX_REDIRECTS {
        match lookup(current)?.target {
            RouteTarget::View(view) => return Some(view),
            RouteTarget::Redirect(next) => current = next,
        }
    }
    None
}

/// The route that renders `view` directly.
#[must_use]
pub fn route_for(view: View) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|route| route.target == RouteTarget::View(view))
}

/// Route by name, case-sensitive. Unnamed routes never match.
#[must_use]
pub fn route_named(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == Some(name))
}
