use anyhow::Result;
use owo_colors::OwoColorize;
use taskdesk_core::model::{Credentials, RegisterForm};
use taskdesk_core::{AuthOutcome, Settings};

use super::{open_session, require_session};
use crate::render::Render;
use crate::utils::tui;

pub async fn login(settings: &Settings, email: Option<String>) -> Result<()> {
    let mut session = open_session(settings).await?;

    let email = match email {
        Some(email) => email,
        None => tui::prompt_text("Email")?,
    };
    let password = tui::prompt_password("Password")?;

    let outcome = tui::with_spinner(
        "Signing in",
        session.login(&Credentials { email, password }),
    )
    .await;

    match outcome {
        AuthOutcome::Success => {
            match session.user() {
                Some(user) => println!("Signed in as {}", user.render()),
                None => println!("Signed in"),
            }
            Ok(())
        }
        AuthOutcome::Failure(message) => anyhow::bail!(message),
    }
}

pub async fn logout(settings: &Settings) -> Result<()> {
    let mut session = open_session(settings).await?;
    let was_signed_in = session.is_authenticated();
    session.logout();

    if was_signed_in {
        println!("Signed out");
    } else {
        println!("{}", "Not signed in".dimmed());
    }
    Ok(())
}

pub async fn register(settings: &Settings) -> Result<()> {
    let mut session = open_session(settings).await?;

    let form = RegisterForm {
        first_name: tui::prompt_text("First name")?,
        last_name: tui::prompt_text("Last name")?,
        user_name: tui::prompt_text("Username")?,
        email: tui::prompt_text("Email")?,
        password: tui::prompt_password("Password")?,
        confirm_password: tui::prompt_password("Confirm password")?,
        agree_to_terms: tui::confirm("Do you agree to the terms and conditions?".to_string())?,
    };

    match session.register(&form).await {
        AuthOutcome::Success => {
            println!("Account created. Sign in with:\n  taskdesk login --email {}", form.email);
            Ok(())
        }
        AuthOutcome::Failure(message) => anyhow::bail!(message),
    }
}

pub async fn whoami(settings: &Settings) -> Result<()> {
    let session = require_session(settings).await?;

    match session.user() {
        Some(user) => println!("{}", user.render()),
        None => println!("{}", "Signed in, profile unavailable".dimmed()),
    }
    Ok(())
}
