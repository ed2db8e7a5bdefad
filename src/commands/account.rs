use std::path::PathBuf;

use anyhow::{Context, Result};
use taskdesk_core::Settings;
use taskdesk_core::model::{ImageFile, PasswordChange, ProfileUpdate};

use super::{api_error, require_session};
use crate::render::Render;
use crate::utils::tui;

/// Profile fields given on the command line. `None` keeps the current value.
pub struct ProfileEdits {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub image: Option<PathBuf>,
}

pub async fn edit(settings: &Settings, edits: ProfileEdits) -> Result<()> {
    let mut session = require_session(settings).await?;
    let current = session.refresh_profile().await?.clone();

    let mut update = ProfileUpdate::from_user(&current);
    if let Some(v) = edits.first_name {
        update.first_name = v;
    }
    if let Some(v) = edits.last_name {
        update.last_name = v;
    }
    if let Some(v) = edits.user_name {
        update.user_name = v;
    }
    if let Some(v) = edits.phone {
        update.phone = v;
    }
    if let Some(v) = edits.position {
        update.position = v;
    }
    if let Some(path) = edits.image {
        update.image = Some(
            ImageFile::from_path(&path)
                .with_context(|| format!("Failed to read image {}", path.display()))?,
        );
    }

    let updated = tui::with_spinner("Saving profile", session.client().account().update_profile(&update))
        .await
        .map_err(api_error("Failed to update profile"))?;

    println!("Updated {}", updated.render());
    Ok(())
}

pub async fn change_password(settings: &Settings) -> Result<()> {
    let session = require_session(settings).await?;

    let change = PasswordChange {
        old_password: tui::prompt_password("Current password")?,
        new_password: tui::prompt_password("New password")?,
        confirm_password: tui::prompt_password("Confirm new password")?,
    };

    session
        .client()
        .account()
        .change_password(&change)
        .await
        .map_err(api_error("Failed to change password"))?;

    println!("Password changed");
    Ok(())
}

pub async fn deactivate(settings: &Settings, force: bool) -> Result<()> {
    let mut session = require_session(settings).await?;

    if !force && !tui::confirm("Deactivate your account? You will be signed out.".to_string())? {
        return Ok(());
    }

    let password = tui::prompt_password("Password")?;
    session
        .client()
        .account()
        .deactivate(&password)
        .await
        .map_err(api_error("Failed to deactivate account"))?;

    session.logout();
    println!("Account deactivated");
    Ok(())
}
