use chrono::Local;
use clap::Subcommand;
use deepwork_core::{format_hms, Database, HistoryStore, Period, PeriodStats};
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List sessions, newest first
    List {
        /// today, week, month or all
        #[arg(long, default_value = "all")]
        period: Period,
    },
    /// Count, total and average duration for a period
    Stats {
        /// today, week, month or all
        #[arg(long, default_value = "today")]
        period: Period,
    },
    /// Delete a session by id
    Delete {
        id: Uuid,
    },
}

#[derive(Serialize)]
struct StatsReport {
    period: Period,
    label: &'static str,
    #[serde(flatten)]
    stats: PeriodStats,
    total_formatted: String,
    average_formatted: String,
}

impl StatsReport {
    fn new(period: Period, stats: PeriodStats) -> Self {
        Self {
            period,
            label: period.label(),
            stats,
            total_formatted: format_hms(stats.total_duration),
            average_formatted: format_hms(stats.average_duration as u64),
        }
    }
}

#[derive(Serialize)]
struct SessionRow<'a> {
    id: Uuid,
    title: &'a str,
    duration: u64,
    formatted_duration: String,
    date: chrono::DateTime<chrono::Utc>,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut history = HistoryStore::load(&db);
    let now = Local::now();

    match action {
        HistoryAction::List { period } => {
            let rows: Vec<SessionRow<'_>> = history
                .sessions_in(period, &now)
                .into_iter()
                .map(|s| SessionRow {
                    id: s.id,
                    title: &s.title,
                    duration: s.duration,
                    formatted_duration: s.formatted_duration(),
                    date: s.date,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        HistoryAction::Stats { period } => {
            let report = StatsReport::new(period, history.stats(period, &now));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        HistoryAction::Delete { id } => {
            if !history.delete(id) {
                return Err(format!("no session with id {id}").into());
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}
