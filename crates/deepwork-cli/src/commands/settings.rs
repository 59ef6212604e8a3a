use std::str::FromStr;

use clap::Subcommand;
use deepwork_core::{Database, Settings, SettingsStore, Theme};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Change one or more settings
    Set {
        /// Hours part of the max session length (negative counts as 0)
        #[arg(long, allow_negative_numbers = true)]
        max_hours: Option<i64>,
        /// Minutes part of the max session length (negative counts as 0)
        #[arg(long, allow_negative_numbers = true)]
        max_minutes: Option<i64>,
        /// blue, green, purple or orange
        #[arg(long, value_parser = Theme::from_str)]
        theme: Option<Theme>,
        /// Cue volume between 0 and 1
        #[arg(long, allow_negative_numbers = true)]
        volume: Option<f64>,
        /// Title used when a session is saved without one
        #[arg(long)]
        title: Option<String>,
    },
    /// Reset settings to defaults
    Reset,
}

/// Apply editor-style changes to `settings`. Hour and minute fields that are
/// not given keep their current value.
fn apply(
    mut settings: Settings,
    max_hours: Option<i64>,
    max_minutes: Option<i64>,
    theme: Option<Theme>,
    volume: Option<f64>,
    title: Option<String>,
) -> Result<Settings, String> {
    if max_hours.is_some() || max_minutes.is_some() {
        let (hours, minutes) = settings.max_duration_parts();
        settings.max_duration = Settings::max_duration_from_parts(
            max_hours.unwrap_or(hours as i64),
            max_minutes.unwrap_or(minutes as i64),
        );
    }
    if let Some(theme) = theme {
        settings.background_theme = theme;
    }
    if let Some(volume) = volume {
        settings.set_volume(volume);
    }
    if let Some(title) = title {
        let title = title.trim();
        if title.is_empty() {
            return Err("default title must not be empty".into());
        }
        settings.default_title = title.to_string();
    }
    Ok(settings)
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut store = SettingsStore::load(&db);

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(store.current())?);
        }
        SettingsAction::Set {
            max_hours,
            max_minutes,
            theme,
            volume,
            title,
        } => {
            let updated = apply(
                store.current().clone(),
                max_hours,
                max_minutes,
                theme,
                volume,
                title,
            )?;
            store.update(updated);
            println!("{}", serde_json::to_string_pretty(store.current())?);
        }
        SettingsAction::Reset => {
            store.update(Settings::default());
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
