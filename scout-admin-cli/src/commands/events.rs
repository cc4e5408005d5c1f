use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use scout_admin::models::{Event, EventCategories, EventForm, FormErrors};
use scout_admin::services::categorize_events;

use super::notify;
use super::Context;
use crate::api::{ApiClient, ApiError};
use crate::routes::View;

fn event_line(event: &Event) -> String {
    format!(
        "{:<22} {:<16} {:<28} {:<10} {}",
        event.id,
        event.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        event.title,
        event.price_label(),
        event.location
    )
}

pub fn render_categories(categories: &EventCategories) -> String {
    let mut lines = Vec::new();
    for (label, events) in [
        ("Today", &categories.today),
        ("Upcoming", &categories.upcoming),
        ("Past", &categories.past),
    ] {
        lines.push(format!("{} ({})", label, events.len()));
        for event in events.iter() {
            lines.push(format!("  {}", event_line(event)));
        }
    }
    lines.join("\n")
}

fn prompt(label: &str, current: &str) -> Result<String> {
    Ok(dialoguer::Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

fn fill_form(form: &mut EventForm) -> Result<()> {
    form.title = prompt("Title", &form.title)?;
    form.event_id = prompt("Event ID", &form.event_id)?;
    form.email = prompt("Email", &form.email)?;
    form.description = prompt("Description", &form.description)?;
    form.contact_number = prompt("Contact Number", &form.contact_number)?;
    form.event_link = prompt("Event Link", &form.event_link)?;
    form.location = prompt("Location", &form.location)?;
    let price = prompt("Price", &form.price.map(|p| p.to_string()).unwrap_or_default())?;
    form.price = price.trim().parse::<f64>().ok();
    form.start_time = prompt("Start Time (YYYY-MM-DDTHH:MM)", &form.start_time)?;
    Ok(())
}

/// Check the form in the admin's zone and return the copy to send, with the
/// start time as an RFC 3339 instant.
pub fn prepare_form(form: &EventForm, now: DateTime<Utc>) -> Result<EventForm, FormErrors> {
    let event = form.validate(now)?;
    Ok(EventForm {
        start_time: event.start_time.to_rfc3339(),
        ..form.clone()
    })
}

/// Group events by the admin's local date rather than the server's.
pub fn regroup(categories: EventCategories, now: &DateTime<Local>) -> EventCategories {
    categorize_events(categories.into_events(), now)
}

fn local_input(start_time: DateTime<Utc>) -> String {
    start_time.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string()
}

/// Prompt, check locally, submit, and re-prompt with the field errors until
/// the server accepts the form or the user gives up.
async fn submit_form<F, Fut>(ctx: &Context, mut form: EventForm, send: F) -> Result<Event>
where
    F: Fn(EventForm) -> Fut,
    Fut: std::future::Future<Output = Result<Event, ApiError>>,
{
    loop {
        fill_form(&mut form)?;

        let errors = match prepare_form(&form, Utc::now()) {
            Ok(wire) => match send(wire).await {
                Ok(event) => return Ok(event),
                Err(ApiError::Validation(errors)) => errors,
                Err(e) => return Err(e.into()),
            },
            Err(errors) => errors,
        };

        notify::failure("Please fix the following fields");
        notify::field_errors(&errors);
        if ctx.assume_yes || !ctx.confirm("Edit the form again?")? {
            return Err(ApiError::Validation(errors).into());
        }
    }
}

pub async fn list_events(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Events)?;

    match notify::with_spinner("Loading events...", client.events()).await {
        Ok(categories) => {
            let categories = regroup(categories, &Local::now());
            println!("{}", "Events".bold());
            println!("{}", render_categories(&categories));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to load events", &e);
            Err(e.into())
        }
    }
}

pub async fn create_event(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Events)?;
    let client: &ApiClient = &client;

    match submit_form(ctx, EventForm::default(), |form| async move {
        client.create_event(&form).await
    })
    .await
    {
        Ok(event) => {
            notify::success(&format!("Event created successfully ({})", event.id));
            Ok(())
        }
        Err(e) => {
            notify::failure(&format!("Failed to create event: {}", e));
            Err(e)
        }
    }
}

pub async fn update_event(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::Events)?;

    let event = match client.event(id).await {
        Ok(event) => event,
        Err(e) => {
            notify::api_failure("Failed to load event", &e);
            return Err(e.into());
        }
    };

    let mut form = EventForm::from(&event);
    form.start_time = local_input(event.start_time);

    let client: &ApiClient = &client;
    match submit_form(ctx, form, |form| async move {
        client.update_event(id, &form).await
    })
    .await
    {
        Ok(_) => {
            notify::success("Event updated successfully");
            Ok(())
        }
        Err(e) => {
            notify::failure(&format!("Failed to update event: {}", e));
            Err(e)
        }
    }
}

pub async fn delete_event(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::Events)?;

    if !ctx.confirm("Are you sure you want to delete this event?")? {
        println!("Cancelled.");
        return Ok(());
    }

    match client.delete_event(id).await {
        Ok(()) => {
            notify::success("Event deleted successfully");
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to delete event", &e);
            Err(e.into())
        }
    }
}
