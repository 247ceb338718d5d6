//! Login, sign-up, recovery and the local profile.

use super::{Reported, user_error};
use crate::app::App;
use crate::console::Output;
use crate::render;
use anyhow::Result;
use cinema_core::user::{ProfileUpdate, Registration};
use colored::Colorize;

pub async fn login(app: &App, out: Output, login_id: &str, password: &str) -> Result<()> {
    let session = app
        .auth
        .login(login_id, password)
        .await
        .map_err(user_error)?;
    app.notifier
        .success(&format!("Welcome, {}", render::clean(&session.display_name)));
    out.emit(&session, render::user(&session))
}

pub fn logout(app: &App, out: Output) -> Result<()> {
    let was_logged_in = app.auth.current_user().is_some();
    app.auth.logout().map_err(user_error)?;
    if was_logged_in {
        out.status("Logged out");
    } else {
        out.status("Not logged in");
    }
    Ok(())
}

pub fn whoami(app: &App, out: Output) -> Result<()> {
    match app.auth.current_user() {
        Some(session) => out.emit(&session, render::user(&session)),
        None => {
            app.notifier.info("Not logged in");
            Err(Reported.into())
        }
    }
}

pub fn profile(
    app: &App,
    out: Output,
    name: String,
    email: String,
    phone: Option<String>,
) -> Result<()> {
    let session = app
        .auth
        .update_profile(ProfileUpdate {
            display_name: name,
            email,
            phone,
        })
        .map_err(user_error)?;
    app.notifier.success("Profile saved");
    out.emit(&session, render::user(&session))
}

pub async fn register(app: &App, out: Output, form: &Registration) -> Result<()> {
    app.auth.register(form).await.map_err(user_error)?;
    out.status(format!(
        "Account {} created. Log in with `cinema login {}`.",
        form.login_id.trim().bold(),
        form.login_id.trim()
    ));
    Ok(())
}

pub async fn find_id(app: &App, out: Output, email: &str, phone: &str) -> Result<()> {
    let login_id = app.auth.find_id(email, phone).await.map_err(user_error)?;
    out.emit(
        &serde_json::json!({ "user_id": login_id }),
        vec![format!("Your login id: {}", render::clean(&login_id).bold())],
    )
}

/// Runs both reset steps: identity check, then the new password.
pub async fn reset_password(
    app: &App,
    out: Output,
    login_id: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<()> {
    let message = app
        .auth
        .verify_identity(login_id, email)
        .await
        .map_err(user_error)?;
    if !message.is_empty() {
        app.notifier.info(&render::clean(&message));
    }
    app.auth
        .reset_password(login_id, email, password, confirm)
        .await
        .map_err(user_error)?;
    out.status("Password changed");
    Ok(())
}

pub fn history(app: &App, out: Output) -> Result<()> {
    if app.data.current_user().is_none() {
        app.notifier.info("Log in to keep a search history");
    }
    let entries = app.data.search_history();
    out.emit(&entries, render::history(&entries))
}

pub fn show_config(app: &App, out: Output) -> Result<()> {
    let config = &app.config;
    out.emit(
        config,
        vec![
            format!("api_base_url  = {}", config.api_base_url),
            format!("chat_base_url = {}", config.chat_base_url),
            format!("timeout_secs  = {}", config.timeout_secs),
            format!("chat_opacity  = {}", app.store.chat_opacity()),
        ],
    )
}
