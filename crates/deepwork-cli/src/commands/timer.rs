//! Interactive timer session.
//!
//! Reads one command per line from stdin and prints every event the core
//! publishes as a JSON line on stdout. Ticks come from a one-second Tokio
//! interval on the same thread as input handling.

use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use deepwork_core::{
    AudioCue, AudioCueService, Database, DeepWork, Event, Settings, SettingsStore, Theme,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Start,
    Pause,
    Resume,
    Restart,
    Save,
    Title(String),
    /// Max session length as hours and minutes.
    Max(i64, i64),
    Volume(f64),
    Theme(Theme),
    Delete(Uuid),
    Status,
    Quit,
}

fn arg<T: FromStr>(word: &str, value: Option<&str>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{word}: missing argument"))?;
    value
        .parse()
        .map_err(|_| format!("{word}: invalid argument: {value}"))
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));
        match word.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "restart" => Ok(Self::Restart),
            "save" => Ok(Self::Save),
            "title" => Ok(Self::Title(rest.to_string())),
            "max" => {
                let mut parts = rest.split_whitespace();
                let hours = arg("max", parts.next())?;
                let minutes = match parts.next() {
                    Some(m) => arg("max", Some(m))?,
                    None => 0,
                };
                Ok(Self::Max(hours, minutes))
            }
            "volume" => Ok(Self::Volume(arg("volume", Some(rest).filter(|r| !r.is_empty()))?)),
            "theme" => rest.parse().map(Self::Theme),
            "delete" => Ok(Self::Delete(arg("delete", Some(rest).filter(|r| !r.is_empty()))?)),
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "failed to encode event"),
    }
}

pub fn run(title: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(title))
}

async fn session(title: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Rc::new(Database::open()?);
    let volume = SettingsStore::load(Rc::clone(&db)).current().volume;
    let cue = AudioCueService::load(volume);
    if !cue.is_available() {
        tracing::info!("running without the ambient cue");
    }

    let mut app = DeepWork::new(db, Box::new(cue));
    app.subscribe(print_event);
    if let Some(title) = title {
        app.set_title(title);
    }
    print_event(&app.snapshot());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick(), if app.engine().is_ticking() => {
                app.tick();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<SessionCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("error: {e}");
                        continue;
                    }
                };
                match command {
                    SessionCommand::Start => {
                        if app.start().is_some() {
                            ticker.reset();
                        }
                    }
                    SessionCommand::Pause => {
                        app.pause();
                    }
                    SessionCommand::Resume => {
                        if app.resume().is_some() {
                            ticker.reset();
                        }
                    }
                    SessionCommand::Restart => {
                        app.restart();
                    }
                    SessionCommand::Save => {
                        if app.save_current_session().is_none() {
                            eprintln!("nothing to save yet");
                        }
                    }
                    SessionCommand::Title(title) => {
                        app.set_title(title);
                        print_event(&app.snapshot());
                    }
                    SessionCommand::Max(hours, minutes) => {
                        let settings = Settings {
                            max_duration: Settings::max_duration_from_parts(hours, minutes),
                            ..app.settings().clone()
                        };
                        app.update_settings(settings);
                    }
                    SessionCommand::Volume(volume) => {
                        let mut settings = app.settings().clone();
                        settings.set_volume(volume);
                        app.update_settings(settings);
                    }
                    SessionCommand::Theme(theme) => {
                        let settings = Settings {
                            background_theme: theme,
                            ..app.settings().clone()
                        };
                        app.update_settings(settings);
                    }
                    SessionCommand::Delete(id) => {
                        if !app.delete_session(id) {
                            eprintln!("error: no session with id {id}");
                        }
                    }
                    SessionCommand::Status => print_event(&app.snapshot()),
                    SessionCommand::Quit => break,
                }
            }
        }
    }

    app.pause();
    Ok(())
}
