use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `fut` behind a spinner, clearing it either way.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = create_spinner(message);
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

pub fn prompt_text(label: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(label).interact_text()?)
}

pub fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

pub fn confirm(prompt: String) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
