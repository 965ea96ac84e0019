//! Grid settings derived from a schedule snapshot.
//!
//! The grid has one column per time step inside the visible window and one
//! row per group for every day that carries a placed program.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::TimetableConfig;
use crate::models::interval::{ceil_to, floor_to};
use crate::models::{date_of, time_of_day, Group, Program, DAY_MS};

/// Derived grid configuration. Recomputed for every render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSettings {
    /// Start-of-day instants (UTC midnights), ascending.
    pub days: Vec<i64>,
    /// Header start offsets within a day (ms after midnight).
    pub time_headers: Vec<i64>,
    /// Column granularity (ms).
    pub time_step: i64,
    /// Visible window start (ms after midnight).
    pub day_start: i64,
    /// Visible window end (ms after midnight).
    pub day_end: i64,
    /// Columns per header.
    pub time_span: i64,
    /// Rows per day, at least 1.
    pub group_cnt: i64,
    /// Groups in row order.
    pub groups: Vec<Group>,
}

impl TimetableSettings {
    /// Number of time columns of the grid.
    pub fn columns(&self) -> i64 {
        self.time_headers.len() as i64 * self.time_span
    }

    /// Number of rows of the dated grid.
    pub fn rows(&self) -> i64 {
        self.days.len() as i64 * self.group_cnt
    }

    /// Index of the day starting at `date`, if enumerated.
    pub fn day_index(&self, date: i64) -> Option<usize> {
        self.days.binary_search(&date).ok()
    }

    /// Row index of a group within a day.
    pub fn group_index(&self, group: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group)
    }
}

/// Derives grid settings from programs, groups and configuration.
///
/// - Days are the distinct dates of placed programs, or the date of `now_ms`
///   when nothing is placed.
/// - The visible window spans from the earliest begin to the latest end
///   (time of day), rounded outward to header boundaries.
pub fn compute_settings(
    programs: &[Program],
    groups: &[Group],
    config: &TimetableConfig,
    now_ms: i64,
) -> TimetableSettings {
    let time_step = config.time_step_ms.max(1);
    let header_span = ceil_to(config.header_span_ms.max(time_step), time_step);

    let placed: Vec<&Program> = programs
        .iter()
        .filter(|p| p.is_live() && p.is_placed())
        .collect();

    let mut days: BTreeSet<i64> = placed
        .iter()
        .filter_map(|p| p.begin)
        .map(date_of)
        .collect();
    if days.is_empty() {
        days.insert(date_of(now_ms));
    }

    let (mut day_start, mut day_end) = if placed.is_empty() {
        (config.default_day_start_ms, config.default_day_end_ms)
    } else {
        let start = placed
            .iter()
            .filter_map(|p| p.begin)
            .map(time_of_day)
            .min()
            .unwrap_or(0);
        let end = placed
            .iter()
            .filter_map(|p| p.span())
            .map(|s| time_of_day(s.begin_ms).saturating_add(s.duration_ms()).min(DAY_MS))
            .max()
            .unwrap_or(start);
        (start, end)
    };

    day_start = floor_to(day_start.clamp(0, DAY_MS), header_span);
    day_end = ceil_to(day_end.clamp(0, DAY_MS), header_span);
    if day_end <= day_start {
        day_end = day_start + header_span;
    }

    let time_headers: Vec<i64> = (0..)
        .map(|i| day_start + i * header_span)
        .take_while(|t| *t < day_end)
        .collect();

    let settings = TimetableSettings {
        days: days.into_iter().collect(),
        time_headers,
        time_step,
        day_start,
        day_end,
        time_span: header_span / time_step,
        group_cnt: groups.len().max(1) as i64,
        groups: groups.to_vec(),
    };

    debug!(
        days = settings.days.len(),
        headers = settings.time_headers.len(),
        day_start = settings.day_start,
        day_end = settings.day_end,
        groups = settings.group_cnt,
        "timetable settings computed"
    );

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60_000;
    const HOUR: i64 = 60 * MIN;

    fn config() -> TimetableConfig {
        TimetableConfig::default()
    }

    fn groups() -> Vec<Group> {
        vec![Group::new("g1"), Group::new("g2"), Group::new("g3")]
    }

    #[test]
    fn test_days_sorted_and_distinct() {
        let programs = vec![
            Program::new("c").with_begin(2 * DAY_MS + 10 * HOUR).with_duration(HOUR),
            Program::new("a").with_begin(10 * HOUR).with_duration(HOUR),
            Program::new("b").with_begin(12 * HOUR).with_duration(HOUR),
        ];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!(s.days, vec![0, 2 * DAY_MS]);
        assert_eq!(s.day_index(2 * DAY_MS), Some(1));
        assert_eq!(s.day_index(DAY_MS), None);
    }

    #[test]
    fn test_window_rounded_outward() {
        let programs = vec![
            Program::new("a").with_begin(9 * HOUR + 20 * MIN).with_duration(30 * MIN),
            Program::new("b").with_begin(DAY_MS + 14 * HOUR).with_duration(70 * MIN),
        ];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!(s.day_start, 9 * HOUR);
        assert_eq!(s.day_end, 16 * HOUR);
        assert_eq!(s.time_headers.len(), 7);
        assert_eq!(s.time_headers[0], 9 * HOUR);
        assert_eq!(s.time_headers[6], 15 * HOUR);
        assert_eq!(s.time_span, 4);
        assert_eq!(s.columns(), 28);
        assert_eq!(s.rows(), 6);
    }

    #[test]
    fn test_aligned_window_not_widened() {
        let programs = vec![Program::new("a").with_begin(10 * HOUR).with_duration(2 * HOUR)];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!((s.day_start, s.day_end), (10 * HOUR, 12 * HOUR));
    }

    #[test]
    fn test_no_programs_uses_now_and_default_window() {
        let now = 5 * DAY_MS + 3 * HOUR;
        let s = compute_settings(&[], &[], &config(), now);
        assert_eq!(s.days, vec![5 * DAY_MS]);
        assert_eq!(s.day_start, 8 * HOUR);
        assert_eq!(s.day_end, 20 * HOUR);
        assert_eq!(s.group_cnt, 1);
    }

    #[test]
    fn test_unplaced_and_deleted_ignored() {
        let programs = vec![
            Program::new("tray").with_duration(HOUR),
            Program::new("gone").with_begin(DAY_MS).with_duration(HOUR).with_deleted(true),
            Program::new("a").with_begin(10 * HOUR).with_duration(HOUR),
        ];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!(s.days, vec![0]);
        assert_eq!((s.day_start, s.day_end), (10 * HOUR, 11 * HOUR));
    }

    #[test]
    fn test_end_capped_at_midnight() {
        let programs = vec![Program::new("night").with_begin(22 * HOUR).with_duration(5 * HOUR)];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!(s.day_end, DAY_MS);
        assert_eq!(s.time_headers.len(), 2);
    }

    #[test]
    fn test_huge_duration_before_epoch() {
        let programs = vec![Program::new("p").with_begin(-1).with_duration(i64::MAX)];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!(s.days, vec![-DAY_MS]);
        assert_eq!((s.day_start, s.day_end), (23 * HOUR, DAY_MS));
        assert_eq!(s.time_headers, vec![23 * HOUR]);
    }

    #[test]
    fn test_zero_duration_keeps_one_header() {
        let programs = vec![Program::new("a").with_begin(10 * HOUR)];
        let s = compute_settings(&programs, &groups(), &config(), 0);
        assert_eq!((s.day_start, s.day_end), (10 * HOUR, 11 * HOUR));
        assert_eq!(s.time_headers, vec![10 * HOUR]);
    }

    #[test]
    fn test_custom_step() {
        let programs = vec![Program::new("a").with_begin(10 * HOUR).with_duration(HOUR)];
        let cfg = config().with_time_step(30 * MIN);
        let s = compute_settings(&programs, &groups(), &cfg, 0);
        assert_eq!(s.time_step, 30 * MIN);
        assert_eq!(s.time_span, 2);
    }

    #[test]
    fn test_group_index() {
        let s = compute_settings(&[], &groups(), &config(), 0);
        assert_eq!(s.group_cnt, 3);
        assert_eq!(s.group_index("g2"), Some(1));
        assert_eq!(s.group_index("nope"), None);
    }
}
