use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use scout_admin::models::FormErrors;
use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Report a failed call. Expired sessions get a hint to sign in again.
pub fn api_failure(action: &str, error: &ApiError) {
    failure(&format!("{}: {}", action, error));
    if error.is_unauthorized() {
        eprintln!("  Your session may have expired. Run `scout-admin login` again.");
    }
}

pub fn field_errors(errors: &FormErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} {}", format!("{}:", field).yellow(), message);
    }
}

pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Show a spinner while a request is in flight.
pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}
