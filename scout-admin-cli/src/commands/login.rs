use anyhow::Result;
use dialoguer::{Input, Password};

use super::notify;
use super::Context;
use crate::api::ApiClient;
use crate::routes::{resolve, Navigation, View};

pub async fn login(ctx: &mut Context, email: Option<String>) -> Result<()> {
    if let Navigation::Redirect(target) = resolve(&View::Login.path(), &ctx.session) {
        println!("Already signed in. Continue at {}.", target);
        return Ok(());
    }

    println!("Fitness Scout - Admin Login");
    println!();

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let client = ApiClient::new(ctx.session.config(), None)?;
    match notify::with_spinner("Signing in...", client.login(&email, &password)).await {
        Ok(response) => {
            ctx.session.login(response.access_token)?;
            notify::success(&format!("Signed in as {}", response.admin.email));
            Ok(())
        }
        Err(e) => {
            notify::failure(&format!("Login failed: {}", e));
            if let crate::api::ApiError::Validation(errors) = &e {
                notify::field_errors(errors);
            }
            Err(e.into())
        }
    }
}

pub async fn logout(ctx: &mut Context) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("You are not logged in.");
        return Ok(());
    }

    // Server-side revocation is best effort; the local token goes either way.
    let client = ApiClient::new(ctx.session.config(), ctx.session.token())?;
    if let Err(e) = client.logout().await {
        tracing::warn!("Server logout failed: {}", e);
    }

    ctx.session.logout()?;
    notify::success("Logged out successfully!");
    Ok(())
}
