//! Plain-text rendering of the event list.

use chrono::{DateTime, TimeZone};
use countdown_core::{Countdown, Event};

pub const HEADER: &str = "📆 Countdown Tracker";

/// One line per event, in list order, under the header.
pub fn event_list(rows: &[(&Event, Countdown)]) -> String {
    let mut out = format!("{HEADER}\n");
    if rows.is_empty() {
        out.push_str("  no events yet\n");
        return out;
    }
    let width = rows.iter().map(|(event, _)| event.title.chars().count()).max().unwrap_or(0);
    for (event, countdown) in rows {
        out.push_str(&format!(
            "  #{:<4} {:<width$}  {}  {}\n",
            event.id.to_string(),
            event.title,
            event.date,
            countdown
        ));
    }
    out
}

pub fn event_line<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> String {
    format!(
        "#{} {} ({}): {}",
        event.id,
        event.title,
        event.date,
        Countdown::for_date(event.date, now)
    )
}
