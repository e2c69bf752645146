//! Tests for the navigation table
//!
//! Validates path lookup, redirect handling and named lookups.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use crate::routes::{ROUTES, RouteTarget, View, lookup, resolve, route_for, route_named};

    /// Root redirects to the login view
    #[test]
    fn test_root_resolves_like_login() {
        assert_eq!(resolve("/"), Some(View::Login));
        assert_eq!(resolve("/"), resolve("/login"));
        assert_eq!(lookup("/").unwrap().target, RouteTarget::Redirect("/login"));
    }

    /// Every view has exactly one direct route
    #[test]
    fn test_every_view_is_routable() {
        for view in View::iter() {
            let route = route_for(view).unwrap_or_else(|| panic!("no route for {view}"));
            assert_eq!(resolve(route.path), Some(view));
            let direct = ROUTES
                .iter()
                .filter(|route| route.target == RouteTarget::View(view))
                .count();
            assert_eq!(direct, 1, "{view} is routed more than once");
        }
    }

    /// Paths and names are unique, and only the root is unnamed
    #[test]
    fn test_table_has_no_duplicates() {
        let paths: HashSet<_> = ROUTES.iter().map(|route| route.path).collect();
        let names: HashSet<_> = ROUTES.iter().filter_map(|route| route.name).collect();
        assert_eq!(paths.len(), ROUTES.len());
        assert_eq!(names.len(), ROUTES.len() - 1);
        assert_eq!(lookup("/").unwrap().name, None);
    }

    /// Route names are the lowercase path segments
    #[test]
    fn test_route_names_match_paths() {
        for route in ROUTES.iter().filter(|route| route.path != "/") {
            assert_eq!(route.name, route.path.strip_prefix('/'));
        }
    }

    /// Known paths map to their views
    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(resolve("/register"), Some(View::Register));
        assert_eq!(resolve("/dashboard"), Some(View::Dashboard));
        assert_eq!(resolve("/owners"), Some(View::Owners));
        assert_eq!(resolve("/pets"), Some(View::Pets));
        assert_eq!(resolve("/appointments"), Some(View::Appointments));
        assert_eq!(resolve("/treatments"), Some(View::Treatments));
    }

    /// Trailing slash is tolerated once
    #[test]
    fn test_trailing_slash() {
        assert_eq!(resolve("/owners/"), Some(View::Owners));
        assert_eq!(resolve("/owners//"), None);
    }

    /// Unknown paths resolve to nothing
    #[test]
    fn test_unknown_paths() {
        assert_eq!(resolve("/owners/1"), None);
        assert_eq!(resolve("owners"), None);
        assert_eq!(resolve(""), None);
        assert!(lookup("/nowhere").is_none());
    }

    /// Named lookups
    #[test]
    fn test_route_named() {
        assert_eq!(route_named("pets").map(|route| route.path), Some("/pets"));
        assert_eq!(route_named("login").map(|route| route.path), Some("/login"));
        assert!(route_named("Pets").is_none());
        assert!(route_named("Home").is_none());
        assert!(route_named("").is_none());
    }

    /// View display names
    #[test]
    fn test_view_display() {
        assert_eq!(View::Dashboard.to_string(), "Dashboard");
        assert_eq!(View::iter().count(), 7);
    }
}
