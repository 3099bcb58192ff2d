//! Navigation link visibility.

use serde::Serialize;

use super::Route;
use crate::models::{Identity, Role};

/// Entries of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavLink {
    Gallery,
    SubmitProject,
    ReviewProjects,
    Dashboard,
    Login,
    Register,
    Profile,
    Logout,
}

impl NavLink {
    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Gallery => "Gallery",
            NavLink::SubmitProject => "Submit Project",
            NavLink::ReviewProjects => "Review Projects",
            NavLink::Dashboard => "Dashboard",
            NavLink::Login => "Login",
            NavLink::Register => "Register",
            NavLink::Profile => "Profile",
            NavLink::Logout => "Logout",
        }
    }

    /// Target route; `Logout` is an action, not a view.
    pub fn route(&self) -> Option<Route> {
        match self {
            NavLink::Gallery => Some(Route::Gallery),
            NavLink::SubmitProject => Some(Route::Submit),
            NavLink::ReviewProjects => Some(Route::Pending),
            NavLink::Dashboard => Some(Route::Dashboard),
            NavLink::Login => Some(Route::Login),
            NavLink::Register => Some(Route::Register),
            NavLink::Profile => Some(Route::Profile),
            NavLink::Logout => None,
        }
    }
}

/// Links visible to `identity` (`None` = anonymous), in display order.
pub fn current_nav_links(identity: Option<&Identity>) -> Vec<NavLink> {
    let role = identity.map(|i| i.role);
    let mut links = vec![NavLink::Gallery];
    if role == Some(Role::Student) {
        links.push(NavLink::SubmitProject);
    }
    if role.is_some_and(|r| r.can_review()) {
        links.push(NavLink::ReviewProjects);
    }
    if role == Some(Role::Admin) {
        links.push(NavLink::Dashboard);
    }
    if identity.is_some() {
        links.extend([NavLink::Profile, NavLink::Logout]);
    } else {
        links.extend([NavLink::Login, NavLink::Register]);
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: "u-1".into(),
            username: "amina".into(),
            role,
        }
    }

    #[test]
    fn anonymous_sees_gallery_login_register() {
        assert_eq!(
            current_nav_links(None),
            vec![NavLink::Gallery, NavLink::Login, NavLink::Register]
        );
    }

    #[test]
    fn student_links() {
        assert_eq!(
            current_nav_links(Some(&identity(Role::Student))),
            vec![
                NavLink::Gallery,
                NavLink::SubmitProject,
                NavLink::Profile,
                NavLink::Logout
            ]
        );
    }

    #[test]
    fn supervisor_links() {
        assert_eq!(
            current_nav_links(Some(&identity(Role::Supervisor))),
            vec![
                NavLink::Gallery,
                NavLink::ReviewProjects,
                NavLink::Profile,
                NavLink::Logout
            ]
        );
    }

    #[test]
    fn admin_links() {
        assert_eq!(
            current_nav_links(Some(&identity(Role::Admin))),
            vec![
                NavLink::Gallery,
                NavLink::ReviewProjects,
                NavLink::Dashboard,
                NavLink::Profile,
                NavLink::Logout
            ]
        );
    }

    #[test]
    fn links_are_a_pure_function_of_identity() {
        let admin = identity(Role::Admin);
        assert_eq!(
            current_nav_links(Some(&admin)),
            current_nav_links(Some(&admin))
        );
        assert_eq!(current_nav_links(None), current_nav_links(None));
    }

    #[test]
    fn every_link_but_logout_targets_a_route() {
        assert!(NavLink::Logout.route().is_none());
        assert_eq!(NavLink::ReviewProjects.route(), Some(Route::Pending));
    }
}
