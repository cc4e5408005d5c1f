use anyhow::Result;
use colored::Colorize;
use scout_admin::models::{Gym, GymTier, Transaction};

use super::notify;
use super::Context;
use crate::routes::View;

fn tier_label(tier: Option<GymTier>) -> &'static str {
    tier.map(|t| t.as_str()).unwrap_or("Not decided")
}

fn gym_line(gym: &Gym) -> String {
    format!(
        "{:<22} {:<26} {:<14} {:<12} {}",
        gym.id,
        gym.name,
        gym.approval_status.to_string(),
        tier_label(gym.tier),
        gym.address
    )
}

pub fn render_gym(gym: &Gym) -> String {
    let mut lines = vec![
        format!("{} ({})", gym.name.bold(), gym.id),
        format!("Status:        {}", gym.approval_status),
        format!("Tier:          {}", tier_label(gym.tier)),
        format!("Requested:     {}", tier_label(gym.requested_tier)),
        format!("Address:       {}", gym.address),
        format!("Contact:       {}", gym.contact_number),
        format!("Email:         {}", gym.email),
    ];

    if let Some(ratings) = gym.ratings {
        lines.push(format!("Ratings:       {:.1}", ratings));
    }
    if !gym.description.is_empty() {
        lines.push(format!("Description:   {}", gym.description));
    }

    let amenities: Vec<&str> = gym.selected_amenities().map(|a| a.name.as_str()).collect();
    if !amenities.is_empty() {
        lines.push(format!("Amenities:     {}", amenities.join(", ")));
    }
    for hours in &gym.opening_hours {
        lines.push(format!("Open:          {}", hours));
    }
    if let Some(image) = gym.cover_image() {
        lines.push(format!("Image:         {}", image));
    }
    if let Some(license) = &gym.license_image {
        lines.push(format!("License:       {}", license));
    }
    lines.push(format!("Visitors:      {}", gym.visitor_count()));

    lines.join("\n")
}

fn transaction_line(index: usize, transaction: &Transaction) -> String {
    let amount = transaction
        .withdrawal_amount
        .map(|a| format!("{:.2}", a))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] {:<12} {:<14} {:>10}  {:<8} {}",
        index,
        transaction.requested_date,
        transaction.method,
        amount,
        transaction.status.to_string(),
        transaction.message
    )
}

pub async fn list_gyms(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Gyms)?;

    let listing = match notify::with_spinner("Loading gyms...", client.gyms()).await {
        Ok(listing) => listing,
        Err(e) => {
            notify::api_failure("Failed to load gyms", &e);
            return Err(e.into());
        }
    };

    println!("{} ({})", "Gyms".bold(), listing.gyms.len());
    for gym in &listing.gyms {
        println!("{}", gym_line(gym));
    }
    if listing.pending_count > 0 {
        println!();
        println!("{} awaiting approval, see `scout-admin approvals`", listing.pending_count);
    }
    Ok(())
}

pub async fn show_gym(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::GymDetail(id.to_string()))?;

    match notify::with_spinner("Loading gym...", client.gym(id)).await {
        Ok(gym) => {
            println!("{}", render_gym(&gym));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to load gym", &e);
            Err(e.into())
        }
    }
}

pub async fn list_approvals(ctx: &Context) -> Result<()> {
    let client = ctx.client_for(&View::Approvals)?;

    let pending = match notify::with_spinner("Loading approvals...", client.pending_gyms()).await {
        Ok(pending) => pending,
        Err(e) => {
            notify::api_failure("Failed to load approvals", &e);
            return Err(e.into());
        }
    };

    println!("{} ({})", "Pending approvals".bold(), pending.len());
    for gym in &pending {
        println!(
            "{:<22} {:<26} requested {:<12} {}",
            gym.id,
            gym.name,
            tier_label(gym.requested_tier),
            gym.email
        );
    }
    Ok(())
}

pub async fn approve(ctx: &Context, id: &str, tier: Option<GymTier>) -> Result<()> {
    let client = ctx.client_for(&View::Approvals)?;

    if !ctx.confirm(&format!("Are you sure you want to approve gym {}?", id))? {
        println!("Cancelled.");
        return Ok(());
    }

    match client.approve_gym(id, tier).await {
        Ok(gym) => {
            notify::success(&format!(
                "Gym Approved successfully ({}, tier {})",
                gym.name,
                tier_label(gym.tier)
            ));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to update Approval Status", &e);
            Err(e.into())
        }
    }
}

pub async fn reject(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client_for(&View::Approvals)?;

    if !ctx.confirm(&format!("Are you sure you want to reject gym {}?", id))? {
        println!("Cancelled.");
        return Ok(());
    }

    match client.reject_gym(id).await {
        Ok(gym) => {
            notify::success(&format!("Gym Rejected ({})", gym.name));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to update Approval Status", &e);
            Err(e.into())
        }
    }
}

pub async fn show_transactions(ctx: &Context, gym_id: &str) -> Result<()> {
    let client = ctx.client_for(&View::Transactions(gym_id.to_string()))?;

    let history = match notify::with_spinner("Loading transactions...", client.transactions(gym_id)).await {
        Ok(history) => history,
        Err(e) => {
            notify::api_failure("Failed to load transactions", &e);
            return Err(e.into());
        }
    };

    println!("{} for {}", "Transactions".bold(), history.gym_name);
    if history.transactions.is_empty() {
        println!("No transactions yet.");
    }
    for (index, transaction) in history.transactions.iter().enumerate() {
        println!("{}", transaction_line(index, transaction));
    }
    Ok(())
}

pub async fn pay(ctx: &Context, gym_id: &str, index: usize) -> Result<()> {
    let client = ctx.client_for(&View::Transactions(gym_id.to_string()))?;

    if !ctx.confirm("Are you sure you want to update the status to 'Paid'?")? {
        println!("Cancelled.");
        return Ok(());
    }

    match client.pay_transaction(gym_id, index).await {
        Ok(transaction) => {
            notify::success("Transaction status updated successfully");
            println!("{}", transaction_line(index, &transaction));
            Ok(())
        }
        Err(e) => {
            notify::api_failure("Failed to update transaction status", &e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_gym_lists_selected_amenities_only() {
        colored::control::set_override(false);
        let gym: Gym = serde_json::from_value(json!({
            "id": "g1",
            "gym_name": "Iron Temple",
            "isApproved": "Pending",
            "gymType": "Silver",
            "amenities": [
                {"name": "Sauna", "isSelected": true},
                {"name": "Pool", "isSelected": false}
            ],
            "visitors": [{}, {}]
        }))
        .unwrap();

        let rendered = render_gym(&gym);
        assert!(rendered.starts_with("Iron Temple (g1)"));
        assert!(rendered.contains("Tier:          Not decided"));
        assert!(rendered.contains("Requested:     Silver"));
        assert!(rendered.contains("Amenities:     Sauna\n"));
        assert!(rendered.contains("Visitors:      2"));
    }

    #[test]
    fn test_transaction_line() {
        let transaction: Transaction = serde_json::from_value(json!({
            "requested_date": "2024-05-01",
            "transactionMethod": "UPI",
            "transactionStatus": "Pending",
            "widthDrawAmount": "1200"
        }))
        .unwrap();

        let line = transaction_line(0, &transaction);
        assert!(line.starts_with("[0] 2024-05-01"));
        assert!(line.contains("1200.00"));
        assert!(line.contains("Pending"));
    }
}
