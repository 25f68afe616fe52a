use chrono::{DateTime, Utc};

use crate::errors::InternalError;
use crate::types::db::history_entry;
use crate::types::internal::complaint::{ComplaintStatus, Role};

/// One display row of a complaint's reconstructed history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub status: ComplaintStatus,
    pub relative_label: String,
    pub comment: Option<String>,
    pub actor_label: String,
}

/// Project an ordered history into display rows
///
/// Lazy and restartable: callers can re-invoke with the same slice to
/// iterate again. Never mutates its input. Entries are assumed already
/// ordered by append id, which the store guarantees.
pub fn project<'a>(
    history: &'a [history_entry::Model],
    now: DateTime<Utc>,
) -> impl Iterator<Item = Result<TimelineRow, InternalError>> + 'a {
    history.iter().map(move |entry| {
        let status = ComplaintStatus::parse(&entry.status)?;
        Ok(TimelineRow {
            status,
            relative_label: relative_label(entry.timestamp, now),
            comment: entry.comment.clone(),
            actor_label: actor_label(entry.actor_role.as_deref()),
        })
    })
}

/// Bucketed relative time label for an entry timestamp
///
/// Bucket boundaries are closed-open (`diff < threshold`): under a minute
/// is "moments ago", then minutes, hours and days, and anything a week or
/// older renders as an absolute calendar date.
pub fn relative_label(timestamp: i64, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;

    let diff = now.timestamp() - timestamp;
    if diff < MINUTE {
        "moments ago".to_string()
    } else if diff < HOUR {
        pluralized(diff / MINUTE, "minute")
    } else if diff < DAY {
        pluralized(diff / HOUR, "hour")
    } else if diff < WEEK {
        pluralized(diff / DAY, "day")
    } else {
        DateTime::<Utc>::from_timestamp(timestamp, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}

fn pluralized(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

fn actor_label(actor_role: Option<&str>) -> String {
    match actor_role.and_then(|r| Role::parse(r).ok()) {
        Some(Role::Citizen) => "Citizen".to_string(),
        Some(Role::Authority) => "Authority".to_string(),
        Some(Role::Admin) => "Admin".to_string(),
        None => "System".to_string(),
    }
}
