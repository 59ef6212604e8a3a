mod period;
mod session;
mod store;

pub use period::Period;
pub use session::WorkSession;
pub use store::{average_duration, total_duration, HistoryStore, PeriodStats};
