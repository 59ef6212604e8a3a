use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Reporting window for history views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::All];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::All => "All Time",
        }
    }

    /// Half-open `[start, end)` covering `now`'s calendar day, week or month
    /// in `now`'s time zone. `None` for [`Period::All`].
    pub fn range<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        week_start: Weekday,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let tz = now.timezone();
        let today = now.date_naive();
        let (first, next) = match self {
            Period::All => return None,
            Period::Today => (today, today + Duration::days(1)),
            Period::Week => {
                let back = (today.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                let first = today - Duration::days(back as i64);
                (first, first + Duration::days(7))
            }
            Period::Month => {
                let first = today.with_day(1)?;
                let next = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
                };
                (first, next)
            }
        };
        Some((start_of_day(&tz, first)?, start_of_day(&tz, next)?))
    }

    /// Whether `date` falls inside this period relative to `now`.
    pub fn contains<Tz: TimeZone>(
        &self,
        date: DateTime<Utc>,
        now: &DateTime<Tz>,
        week_start: Weekday,
    ) -> bool {
        match self.range(now, week_start) {
            Some((start, end)) => start <= date && date < end,
            None => true,
        }
    }
}

/// First instant of `day` in `tz`. Skips forward an hour when midnight
/// falls into a DST gap.
fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = day.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" | "day" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            other => Err(format!("unknown period: {other} (expected today, week, month, all)")),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
