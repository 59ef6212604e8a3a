use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deepwork", version, about = "Deep Work session tracker")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively (commands on stdin, JSON events on stdout)
    Run {
        /// Title for the session being timed
        #[arg(long)]
        title: Option<String>,
    },
    /// Session history and statistics
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DEEPWORK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { title } => commands::timer::run(title),
        Commands::History { action } => commands::history::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_history_stats_period() {
        let cli = Cli::try_parse_from(["deepwork", "history", "stats", "--period", "week"]).unwrap();
        match cli.command {
            Commands::History {
                action: commands::history::HistoryAction::Stats { period },
            } => assert_eq!(period, deepwork_core::Period::Week),
            _ => panic!("expected history stats"),
        }
    }

    #[test]
    fn rejects_unknown_period() {
        assert!(Cli::try_parse_from(["deepwork", "history", "list", "--period", "year"]).is_err());
    }

    #[test]
    fn settings_set_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["deepwork", "settings", "set", "--theme", "teal"]).is_err());
        let cli = Cli::try_parse_from(["deepwork", "settings", "set", "--theme", "orange"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: commands::settings::SettingsAction::Set {
                    theme: Some(deepwork_core::Theme::Orange),
                    ..
                }
            }
        ));
    }

    #[test]
    fn settings_set_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["deepwork", "settings", "set", "--max-hours", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: commands::settings::SettingsAction::Set {
                    max_hours: Some(-2),
                    ..
                }
            }
        ));
    }
}
