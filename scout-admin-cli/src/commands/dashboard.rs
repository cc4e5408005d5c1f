use anyhow::Result;
use colored::Colorize;
use scout_admin::models::{AppUser, DashboardCounts};

use super::notify;
use super::Context;
use crate::routes::View;

pub fn render_counts(counts: &DashboardCounts) -> String {
    [
        ("Users", counts.users),
        ("Gyms", counts.gyms),
        ("Diet Plans", counts.diet_plans),
        ("Events", counts.events),
    ]
    .iter()
    .map(|(label, count)| format!("{:<12}{:>6}", label, count))
    .collect::<Vec<_>>()
    .join("\n")
}

fn user_line(user: &AppUser) -> String {
    let package = user.current_package.as_deref().unwrap_or("-");
    format!(
        "{:<24} {:<28} {:<14} {}",
        user.full_name(),
        user.email,
        user.phone_number,
        package
    )
}

pub async fn show_dashboard(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Dashboard)?;

    match notify::with_spinner("Loading dashboard...", client.dashboard()).await {
        Ok(counts) => {
            println!("{}", "Dashboard".bold());
            println!("{}", render_counts(&counts));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to load dashboard", &e);
            Err(e.into())
        }
    }
}

pub async fn list_users(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Users)?;

    let users = match notify::with_spinner("Loading users...", client.users()).await {
        Ok(users) => users,
        Err(e) => {
            notify::api_failure("Failed to load users", &e);
            return Err(e.into());
        }
    };

    println!("{} ({})", "Users".bold(), users.len());
    for user in &users {
        println!("{}", user_line(user));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts() {
        let counts = DashboardCounts {
            users: 12,
            gyms: 3,
            diet_plans: 0,
            events: 7,
        };
        let rendered = render_counts(&counts);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Users           12");
        assert_eq!(lines[2], "Diet Plans       0");
    }
}
