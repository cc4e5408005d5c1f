use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use scout_admin::models::{DietPlan, DietPlanDraft, FormErrors, MealEntryForm, MealSlot};

use super::notify;
use super::Context;
use crate::api::{ApiClient, ApiError};
use crate::routes::View;

const ACTIONS: [&str; 6] = [
    "Edit preference and calories",
    "Edit an entry",
    "Add an entry",
    "Remove an entry",
    "Submit",
    "Cancel",
];

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn field_note(errors: &FormErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!("  <- {}", message),
        None => String::new(),
    }
}

/// Text view of a draft with each validation message next to its field.
pub fn render_draft(draft: &DietPlanDraft, errors: &FormErrors) -> String {
    let mut lines = vec![
        format!(
            "Dietary preference: {}{}",
            draft.dietary_preference,
            field_note(errors, "dietaryPreference")
        ),
        format!(
            "Calories: {}{}",
            format_number(draft.calories),
            field_note(errors, "calories")
        ),
    ];

    for slot in MealSlot::ALL {
        lines.push(format!("{}:{}", slot.field_name(), field_note(errors, slot.field_name())));
        for (index, entry) in draft.slot(slot).iter().enumerate() {
            let prefix = format!("{}.{}", slot.field_name(), index);
            let name = if entry.name.is_empty() { "(unnamed)" } else { entry.name.as_str() };
            lines.push(format!(
                "  [{}] {} {} kcal, carbs {}, fat {}, protein {}",
                index,
                name,
                format_number(entry.calories),
                entry.carbs,
                entry.fat,
                entry.protein
            ));
            for field in ["name", "imageUrl", "calories", "carbs", "fat", "protein"] {
                if let Some(message) = errors.get(&format!("{}.{}", prefix, field)) {
                    lines.push(format!("      {}: {}", field, message));
                }
            }
        }
    }

    lines.join("\n")
}

fn render_plan(plan: &DietPlan) -> String {
    let mut lines = vec![
        format!("{} ({})", plan.dietary_preference, plan.id),
        format!("Calories: {}", plan.calories),
    ];
    for slot in MealSlot::ALL {
        lines.push(format!("{}:", slot.field_name()));
        for meal in plan.meals(slot) {
            lines.push(format!(
                "  {} - {} kcal, carbs {}, fat {}, protein {}",
                meal.name, meal.calories, meal.carbs, meal.fat, meal.protein
            ));
        }
    }
    lines.join("\n")
}

fn prompt_text(label: &str, current: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

/// Unparseable numbers are kept as blank so validation reports them.
fn prompt_number(label: &str, current: Option<f64>) -> Result<Option<f64>> {
    let raw = prompt_text(label, &format_number(current))?;
    Ok(raw.trim().parse::<f64>().ok())
}

fn pick_slot() -> Result<MealSlot> {
    let labels: Vec<&str> = MealSlot::ALL.iter().map(|slot| slot.field_name()).collect();
    let choice = Select::new().with_prompt("Meal").items(&labels).default(0).interact()?;
    Ok(MealSlot::ALL[choice])
}

fn pick_index(draft: &DietPlanDraft, slot: MealSlot) -> Result<usize> {
    let labels: Vec<String> = draft
        .slot(slot)
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("[{}] {}", index, entry.name))
        .collect();
    Ok(Select::new().with_prompt("Entry").items(&labels).default(0).interact()?)
}

fn edit_entry(entry: &mut MealEntryForm) -> Result<()> {
    entry.name = prompt_text("Name", &entry.name)?;
    entry.image_url = prompt_text("Image URL", &entry.image_url)?;
    entry.calories = prompt_number("Calories", entry.calories)?;
    entry.carbs = prompt_text("Carbs", &entry.carbs)?;
    entry.fat = prompt_text("Fat", &entry.fat)?;
    entry.protein = prompt_text("Protein", &entry.protein)?;
    Ok(())
}

pub async fn list_plans(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::DietPlans)?;

    let plans = match notify::with_spinner("Loading diet plans...", client.diet_plans()).await {
        Ok(plans) => plans,
        Err(e) => {
            notify::api_failure("Failed to load diet plans", &e);
            return Err(e.into());
        }
    };

    println!("{} ({})", "Diet Plans".bold(), plans.len());
    for plan in &plans {
        println!("{:<22} {:<20} {} kcal", plan.id, plan.dietary_preference, plan.calories);
    }
    Ok(())
}

pub async fn show_plan(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::DietPlans)?;

    match notify::with_spinner("Loading diet plan...", client.diet_plan(id)).await {
        Ok(plan) => {
            println!("{}", render_plan(&plan));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to load diet plan", &e);
            Err(e.into())
        }
    }
}

pub async fn create_plan(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::DietPlans)?;
    let mut draft = DietPlanDraft::new();
    let mut errors = FormErrors::new();

    loop {
        println!();
        println!("{}", render_draft(&draft, &errors));
        println!();

        let choice = Select::new()
            .with_prompt("Diet plan")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                draft.dietary_preference = prompt_text("Dietary preference", &draft.dietary_preference)?;
                draft.calories = prompt_number("Calories", draft.calories)?;
            }
            1 => {
                let slot = pick_slot()?;
                let index = pick_index(&draft, slot)?;
                if let Some(entry) = draft.entry_mut(slot, index) {
                    edit_entry(entry)?;
                }
            }
            2 => {
                let slot = pick_slot()?;
                let index = draft.append(slot);
                if let Some(entry) = draft.entry_mut(slot, index) {
                    edit_entry(entry)?;
                }
            }
            3 => {
                let slot = pick_slot()?;
                let index = pick_index(&draft, slot)?;
                if let Err(e) = draft.remove(slot, index) {
                    notify::failure(&e.to_string());
                }
            }
            4 => {
                if submit(&client, &draft, &mut errors).await? {
                    return Ok(());
                }
            }
            _ => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }
}

/// Returns whether the plan was stored. Field errors stay in `errors` for the next round.
async fn submit(client: &ApiClient, draft: &DietPlanDraft, errors: &mut FormErrors) -> Result<bool> {
    if let Err(form_errors) = draft.validate() {
        notify::failure("Please fix the highlighted fields");
        *errors = form_errors;
        return Ok(false);
    }

    match client.create_diet_plan(draft).await {
        Ok(plan) => {
            notify::success(&format!("Plan created successfully ({})", plan.id));
            Ok(true)
        }
        Err(ApiError::Validation(form_errors)) => {
            notify::failure("Please fix the highlighted fields");
            *errors = form_errors;
            Ok(false)
        }
        Err(e) => {
            notify::api_failure("Failed to create plan", &e);
            Err(e.into())
        }
    }
}

pub async fn delete_plan(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::DietPlans)?;

    if !ctx.confirm("Are you sure you want to delete this Plan?")? {
        println!("Cancelled.");
        return Ok(());
    }

    match client.delete_diet_plan(id).await {
        Ok(()) => {
            notify::success("Plan deleted successfully");
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to delete plan", &e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_blank_draft_with_errors() {
        let draft = DietPlanDraft::new();
        let errors = draft.validate().unwrap_err();

        let rendered = render_draft(&draft, &errors);
        assert!(rendered.contains("Dietary preference:   <- Dietary Preference is required"));
        assert!(rendered.contains("  [0] (unnamed)"));
        assert!(rendered.contains("      imageUrl: Image URL is required"));
        assert_eq!(rendered.matches("name: Name is required").count(), 4);
    }

    #[test]
    fn test_render_reports_empty_slot() {
        let mut draft = DietPlanDraft::new();
        draft.lunch.clear();
        let errors = draft.validate().unwrap_err();

        let rendered = render_draft(&draft, &errors);
        assert!(rendered.contains("lunch:  <- At least one lunch item is required"));
    }

    #[test]
    fn test_render_clean_draft_has_no_notes() {
        let draft = DietPlanDraft::new();
        let rendered = render_draft(&draft, &FormErrors::new());
        assert!(!rendered.contains("<-"));
        assert!(rendered.contains("Calories: 0"));
    }
}
