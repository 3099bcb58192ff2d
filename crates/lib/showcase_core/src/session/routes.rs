//! Route table and access requirements.

use std::fmt;

use crate::models::Role;

const REVIEWERS: &[Role] = &[Role::Supervisor, Role::Admin];
const STUDENTS: &[Role] = &[Role::Student];
const ADMINS: &[Role] = &[Role::Admin];

/// Views of the showcase front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Gallery,
    Login,
    Register,
    Submit,
    Pending,
    Dashboard,
    /// Target of the signed-in "Profile" nav link. Guarded for any identity;
    /// the view itself has no content yet and `showcase whoami` stands in for it.
    Profile,
    ProjectDetails(String),
}

/// Who may render a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in identity.
    Authenticated,
    /// Signed in with one of these roles.
    Roles(&'static [Role]),
}

/// Result of running the guard for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Admit,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardOutcome {
    /// Route the user is sent to, if any.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            GuardOutcome::Admit => None,
            GuardOutcome::RedirectToLogin => Some(Route::Login),
            GuardOutcome::RedirectToHome => Some(Route::Gallery),
        }
    }
}

impl Route {
    /// Resolve a path; unknown paths fall back to the gallery.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Route::Gallery,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/submit" => Route::Submit,
            "/pending" => Route::Pending,
            "/dashboard" => Route::Dashboard,
            "/profile" => Route::Profile,
            other => match other.strip_prefix("/projects/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::ProjectDetails(id.to_string())
                }
                _ => Route::Gallery,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Gallery => "/".into(),
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Submit => "/submit".into(),
            Route::Pending => "/pending".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Profile => "/profile".into(),
            Route::ProjectDetails(id) => format!("/projects/{id}"),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Submit => Access::Roles(STUDENTS),
            Route::Pending => Access::Roles(REVIEWERS),
            Route::Dashboard => Access::Roles(ADMINS),
            Route::Profile => Access::Authenticated,
            Route::Gallery | Route::Login | Route::Register | Route::ProjectDetails(_) => {
                Access::Public
            }
        }
    }

    /// Roles the guard checks; `None` for public routes, empty for any
    /// signed-in identity.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self.access() {
            Access::Public => None,
            Access::Authenticated => Some(&[]),
            Access::Roles(required) => Some(required),
        }
    }

    /// Where a freshly signed-in user lands.
    pub fn landing_for(role: Role) -> Route {
        match role {
            Role::Student => Route::Submit,
            Role::Supervisor => Route::Pending,
            Role::Admin => Route::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Gallery);
        assert_eq!(Route::parse("/pending/"), Route::Pending);
        assert_eq!(Route::parse("/projects/12"), Route::ProjectDetails("12".into()));
    }

    #[test]
    fn unknown_paths_fall_back_to_gallery() {
        assert_eq!(Route::parse("/nowhere"), Route::Gallery);
        assert_eq!(Route::parse("/projects/"), Route::Gallery);
        assert_eq!(Route::parse("/projects/1/edit"), Route::Gallery);
    }

    #[test]
    fn path_roundtrips_through_parse() {
        for route in [
            Route::Gallery,
            Route::Login,
            Route::Register,
            Route::Submit,
            Route::Pending,
            Route::Dashboard,
            Route::Profile,
            Route::ProjectDetails("abc".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn protected_routes_name_concrete_roles() {
        assert_eq!(Route::Submit.access(), Access::Roles(&[Role::Student]));
        assert_eq!(
            Route::Pending.access(),
            Access::Roles(&[Role::Supervisor, Role::Admin])
        );
        assert_eq!(Route::Dashboard.access(), Access::Roles(&[Role::Admin]));
        assert_eq!(Route::ProjectDetails("1".into()).access(), Access::Public);
        assert_eq!(Route::Gallery.required_roles(), None);
        assert_eq!(Route::Profile.required_roles(), Some(&[][..]));
    }

    #[test]
    fn landing_route_depends_on_role() {
        assert_eq!(Route::landing_for(Role::Student), Route::Submit);
        assert_eq!(Route::landing_for(Role::Supervisor), Route::Pending);
        assert_eq!(Route::landing_for(Role::Admin), Route::Dashboard);
    }
}
