//! Row and column headers of the grid.

use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::settings::TimetableSettings;
use crate::models::GroupId;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// A labeled run of time columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeHeader {
    /// First column.
    pub pos: i64,
    /// Columns covered.
    pub span: i64,
    /// Header start (ms after midnight).
    pub time: i64,
    /// Hour of day shown as the label.
    pub hour: i64,
}

/// A labeled run of rows for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateHeader {
    /// First row.
    pub pos: i64,
    /// Rows covered.
    pub span: i64,
    /// Start of the day (ms).
    pub day: i64,
    /// Calendar date, if representable.
    pub date: Option<NaiveDate>,
    /// Day of week, if representable.
    pub weekday: Option<Weekday>,
}

/// A group label for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHeader {
    /// Row.
    pub pos: i64,
    /// Group identifier.
    pub group: GroupId,
    /// Display name.
    pub name: String,
}

/// One header per time header of the settings.
pub fn time_headers(settings: &TimetableSettings) -> Vec<TimeHeader> {
    settings
        .time_headers
        .iter()
        .enumerate()
        .map(|(idx, &time)| TimeHeader {
            pos: idx as i64 * settings.time_span,
            span: settings.time_span,
            time,
            hour: time / HOUR_MS,
        })
        .collect()
}

/// One header per day, spanning all of its group rows.
pub fn date_headers(settings: &TimetableSettings) -> Vec<DateHeader> {
    settings
        .days
        .iter()
        .enumerate()
        .map(|(idx, &day)| {
            let date = DateTime::from_timestamp_millis(day).map(|dt| dt.date_naive());
            DateHeader {
                pos: idx as i64 * settings.group_cnt,
                span: settings.group_cnt,
                day,
                date,
                weekday: date.map(|d| d.weekday()),
            }
        })
        .collect()
}

/// One header per group and day.
pub fn group_headers(settings: &TimetableSettings) -> Vec<GroupHeader> {
    (0..settings.days.len())
        .flat_map(|idx| {
            settings
                .groups
                .iter()
                .enumerate()
                .map(move |(group_idx, group)| GroupHeader {
                    pos: idx as i64 * settings.group_cnt + group_idx as i64,
                    group: group.id.clone(),
                    name: group.name.clone(),
                })
        })
        .collect()
}
