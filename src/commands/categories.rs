use anyhow::Result;
use owo_colors::OwoColorize;
use taskdesk_core::Settings;
use taskdesk_core::model::CategoryKind;

use super::{api_error, require_session};
use crate::CategoryCommand;
use crate::render::Render;

pub async fn run(settings: &Settings, kind: CategoryKind, command: CategoryCommand) -> Result<()> {
    let session = require_session(settings).await?;
    let api = match kind {
        CategoryKind::Status => session.client().statuses(),
        CategoryKind::Priority => session.client().priorities(),
    };
    let label = kind.label();

    match command {
        CategoryCommand::List => {
            let items = api.list().await.map_err(api_error("Failed to load categories"))?;
            if items.is_empty() {
                println!("{}", format!("No {} values yet", label).dimmed());
            }
            for item in items {
                println!("{}", item.render());
            }
        }
        CategoryCommand::Add { name } => {
            let created = api
                .create(name.trim())
                .await
                .map_err(api_error("Failed to create category"))?;
            println!("Created {} {}", label, created.render());
        }
        CategoryCommand::Rename { id, name } => {
            let updated = api
                .update(id, name.trim())
                .await
                .map_err(api_error("Failed to rename category"))?;
            println!("Renamed {} {}", label, updated.render());
        }
        CategoryCommand::Delete { id } => {
            api.delete(id).await.map_err(api_error("Failed to delete category"))?;
            println!("Deleted {} #{}", label, id);
        }
    }

    Ok(())
}
