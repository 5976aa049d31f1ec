//! Interactive `darksky configure`.

use anyhow::Context;
use darksky_core::{Config, Language, Units};
use inquire::{Password, PasswordDisplayMode, Select};

const PROVIDER_DEFAULT: &str = "(provider default)";

pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Dark Sky API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.set_api_key(api_key.to_string());
    } else if !config.is_configured() {
        anyhow::bail!("An API key is required.");
    }

    let units = choose("Units:", Units::all(), config.units().ok().flatten())?;
    config.set_units(units);

    let language = choose("Language:", Language::all(), config.language().ok().flatten())?;
    config.set_language(language);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

/// Pick one code from `values`, or none for the provider default.
fn choose<T: Copy + PartialEq + std::fmt::Display>(
    prompt: &str,
    values: &[T],
    current: Option<T>,
) -> anyhow::Result<Option<T>> {
    let options = choices(values);
    let cursor = current
        .and_then(|c| values.iter().position(|v| *v == c))
        .map_or(0, |i| i + 1);

    let picked = Select::new(prompt, options)
        .with_starting_cursor(cursor)
        .prompt()
        .with_context(|| format!("Failed to read {}", prompt.trim_end_matches(':')))?;

    Ok(values.iter().copied().find(|v| v.to_string() == picked))
}

fn choices<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    std::iter::once(PROVIDER_DEFAULT.to_string())
        .chain(values.iter().map(ToString::to_string))
        .collect()
}
