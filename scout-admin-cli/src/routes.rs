use std::fmt;

use crate::session::SessionState;

/// Screens of the admin dashboard, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Users,
    Gyms,
    GymDetail(String),
    Transactions(String),
    Approvals,
    DietPlans,
    Events,
}

impl View {
    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<View> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["login"] => Some(View::Login),
            ["dashboard"] => Some(View::Dashboard),
            ["users"] => Some(View::Users),
            ["gyms"] => Some(View::Gyms),
            ["gym-detail", id] if !id.is_empty() => Some(View::GymDetail(id.to_string())),
            ["transactions", id] if !id.is_empty() => Some(View::Transactions(id.to_string())),
            ["approvals"] => Some(View::Approvals),
            ["diet-plans"] => Some(View::DietPlans),
            ["events"] => Some(View::Events),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            View::Login => "/login".to_string(),
            View::Dashboard => "/dashboard".to_string(),
            View::Users => "/users".to_string(),
            View::Gyms => "/gyms".to_string(),
            View::GymDetail(id) => format!("/gym-detail/{}", id),
            View::Transactions(id) => format!("/transactions/{}", id),
            View::Approvals => "/approvals".to_string(),
            View::DietPlans => "/diet-plans".to_string(),
            View::Events => "/events".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, View::Login)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(View),
}

/// Decide what a navigation to `path` shows for the current session.
pub fn resolve(path: &str, session: &SessionState) -> Navigation {
    resolve_for(path, session.is_authenticated())
}

fn resolve_for(path: &str, authenticated: bool) -> Navigation {
    match View::parse(path) {
        None => Navigation::Redirect(View::Login),
        Some(View::Login) if authenticated => Navigation::Redirect(View::Dashboard),
        Some(view) if view.is_protected() && !authenticated => Navigation::Redirect(View::Login),
        Some(view) => Navigation::Render(view),
    }
}

/// Follow redirects until a view renders.
pub fn settle(path: &str, session: &SessionState) -> View {
    let mut current = path.to_string();
    // login <-> dashboard is the longest possible chain
    for _ in 0..3 {
        match resolve(&current, session) {
            Navigation::Render(view) => return view,
            Navigation::Redirect(view) => current = view.path(),
        }
    }
    View::Login
}
