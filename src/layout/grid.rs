//! Grid coordinates.
//!
//! Converts (begin, duration, groups) into zero-based grid cells: one column
//! per time step from `day_start`, one row per group per day.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::blocks::{expand_wildcard_groups, group_programs_to_blocks};
use super::settings::TimetableSettings;
use crate::clock::TimeProvider;
use crate::models::{ceil_div, date_of, time_of_day, GroupId, Program, ProgramId};

/// A rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// First column.
    pub x: i64,
    /// First row.
    pub y: i64,
    /// Columns covered.
    pub width: i64,
    /// Rows covered.
    pub height: i64,
}

impl Rect {
    /// Creates a rect.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether two rects share at least one cell.
    #[cfg(test)]
    pub(crate) fn intersects(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Position of the current-time marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIndicatorRect {
    /// Column of the current time step.
    pub x: i64,
    /// First row of the current day.
    pub y: i64,
    /// Rows of one day.
    pub height: i64,
}

/// A member program positioned relative to its block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedProgram {
    /// Program identifier, if it has one.
    pub id: Option<ProgramId>,
    /// Rect relative to the block origin.
    pub rect: Rect,
}

/// A block positioned on the grid, with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLayout {
    /// Stable block identity.
    pub key: String,
    /// Absolute rect of the block.
    pub rect: Rect,
    /// Members in block order.
    pub programs: Vec<PlacedProgram>,
}

/// Grid rect of an item.
///
/// Empty `groups` spans every row. Returns `None` when the date is not one
/// of the enumerated days or when `groups` names no known group.
pub fn rect_for(
    begin: i64,
    duration: i64,
    groups: &[GroupId],
    settings: &TimetableSettings,
) -> Option<Rect> {
    let day = settings.day_index(date_of(begin))? as i64;
    let time = time_of_day(begin);

    let (first, last) = if groups.is_empty() {
        (0, settings.group_cnt - 1)
    } else {
        let rows = settings
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| groups.contains(&g.id))
            .map(|(idx, _)| idx as i64);
        let (first, last) = rows.fold(None, |acc: Option<(i64, i64)>, idx| match acc {
            None => Some((idx, idx)),
            Some((lo, hi)) => Some((lo.min(idx), hi.max(idx))),
        })?;
        (first, last)
    };

    Some(Rect {
        x: ceil_div(time - settings.day_start, settings.time_step),
        y: day * settings.group_cnt + first,
        width: ceil_div(duration.max(0), settings.time_step),
        height: last - first + 1,
    })
}

/// Grid rect of a placed program.
pub fn program_rect(program: &Program, settings: &TimetableSettings) -> Option<Rect> {
    rect_for(program.begin?, program.duration, &program.groups, settings)
}

/// Rect of a member relative to its block, one row high and shifted down
/// by its block order.
pub fn program_rect_in_block(
    program: &Program,
    block_rect: &Rect,
    settings: &TimetableSettings,
) -> Option<Rect> {
    let rect = program_rect(program, settings)?;
    Some(Rect {
        x: rect.x - block_rect.x,
        y: (rect.y - block_rect.y).saturating_add(program.effective_block_order()),
        width: rect.width,
        height: 1,
    })
}

/// Groups placed programs into blocks and positions them.
///
/// Wildcard programs are expanded to every configured group first. Deleted
/// programs, and blocks or members that cannot be positioned, are skipped.
pub fn layout_blocks(programs: &[Program], settings: &TimetableSettings) -> Vec<BlockLayout> {
    let expanded = expand_wildcard_groups(programs, &settings.groups);
    let blocks = group_programs_to_blocks(&expanded);

    blocks
        .iter()
        .filter_map(|block| {
            let Some(rect) = rect_for(block.begin, block.duration, &block.groups, settings) else {
                warn!(key = %block.key(), "block outside the grid, skipped");
                return None;
            };
            let members = block
                .programs
                .iter()
                .filter_map(|p| {
                    program_rect_in_block(p, &rect, settings).map(|rect| PlacedProgram {
                        id: p.id.clone(),
                        rect,
                    })
                })
                .collect();
            trace!(key = %block.key(), ?rect, "block placed");
            Some(BlockLayout {
                key: block.key(),
                rect,
                programs: members,
            })
        })
        .collect()
}

/// Position of the current-time marker, or `None` when now is off the grid.
///
/// Instants carry no zone; the marker assumes the viewer is in the zone of
/// the event and shifts `now` by the viewer's offset.
pub fn time_indicator_rect(
    settings: &TimetableSettings,
    clock: &dyn TimeProvider,
) -> Option<TimeIndicatorRect> {
    let now = clock.now_ms();
    let local = now.saturating_add(clock.utc_offset_ms(now));

    let time = time_of_day(local);
    if time < settings.day_start || time > settings.day_end {
        return None;
    }
    let day = settings.day_index(date_of(local))? as i64;

    Some(TimeIndicatorRect {
        x: ceil_div(time - settings.day_start, settings.time_step),
        y: day * settings.group_cnt,
        height: settings.group_cnt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::TimetableConfig;
    use crate::layout::compute_settings;
    use crate::models::{Group, DAY_MS};

    const MIN: i64 = 60_000;
    const HOUR: i64 = 60 * MIN;

    fn groups() -> Vec<Group> {
        vec![Group::new("g1"), Group::new("g2"), Group::new("g3")]
    }

    fn ids(list: &[&str]) -> Vec<GroupId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Two days, 08:00–12:00, 15 minute steps, three groups.
    fn settings() -> TimetableSettings {
        let programs = vec![
            Program::new("a").with_begin(8 * HOUR).with_duration(HOUR),
            Program::new("b").with_begin(DAY_MS + 11 * HOUR).with_duration(HOUR),
        ];
        compute_settings(&programs, &groups(), &TimetableConfig::default(), 0)
    }

    #[test]
    fn test_rect_single_group() {
        let s = settings();
        let r = rect_for(9 * HOUR, HOUR, &ids(&["g2"]), &s).unwrap();
        assert_eq!(r, Rect::new(4, 1, 4, 1));
    }

    #[test]
    fn test_rect_second_day() {
        let s = settings();
        let r = rect_for(DAY_MS + 8 * HOUR + 30 * MIN, 30 * MIN, &ids(&["g1"]), &s).unwrap();
        assert_eq!(r, Rect::new(2, 3, 2, 1));
    }

    #[test]
    fn test_rect_spans_touched_rows() {
        let s = settings();
        // Non-contiguous groups cover the rows between them.
        let r = rect_for(8 * HOUR, HOUR, &ids(&["g3", "g1"]), &s).unwrap();
        assert_eq!((r.y, r.height), (0, 3));
        let r = rect_for(8 * HOUR, HOUR, &ids(&["g2", "g3"]), &s).unwrap();
        assert_eq!((r.y, r.height), (1, 2));
    }

    #[test]
    fn test_rect_wildcard_full_span() {
        let s = settings();
        let r = rect_for(DAY_MS + 8 * HOUR, HOUR, &[], &s).unwrap();
        assert_eq!((r.y, r.height), (3, 3));
    }

    #[test]
    fn test_rect_partial_steps_round_up() {
        let s = settings();
        let r = rect_for(8 * HOUR + MIN, 16 * MIN, &ids(&["g1"]), &s).unwrap();
        assert_eq!(r.x, 1);
        assert_eq!(r.width, 2);
    }

    #[test]
    fn test_rect_unknown_day_or_group() {
        let s = settings();
        assert!(rect_for(5 * DAY_MS + 8 * HOUR, HOUR, &ids(&["g1"]), &s).is_none());
        assert!(rect_for(8 * HOUR, HOUR, &ids(&["nope"]), &s).is_none());
        // Unknown ids next to known ones are ignored.
        let r = rect_for(8 * HOUR, HOUR, &ids(&["nope", "g3"]), &s).unwrap();
        assert_eq!((r.y, r.height), (2, 1));
    }

    #[test]
    fn test_rect_in_block() {
        let s = settings();
        let block = Rect::new(0, 0, 8, 2);
        let p = Program::new("p")
            .with_begin(9 * HOUR)
            .with_duration(HOUR)
            .with_group("g2")
            .with_block_order(1);
        let r = program_rect_in_block(&p, &block, &s).unwrap();
        assert_eq!(r, Rect::new(4, 2, 4, 1));
    }

    #[test]
    fn test_layout_blocks() {
        let s = settings();
        let programs = vec![
            Program::new("a").with_begin(8 * HOUR).with_duration(HOUR).with_group("g1"),
            Program::new("b")
                .with_begin(8 * HOUR + 30 * MIN)
                .with_duration(HOUR)
                .with_groups(["g1", "g2"]),
            Program::new("all").with_begin(DAY_MS + 11 * HOUR).with_duration(HOUR),
            Program::new("tray").with_duration(HOUR),
        ];
        let layouts = layout_blocks(&programs, &s);
        assert_eq!(layouts.len(), 2);

        let first = &layouts[0];
        assert_eq!(first.rect, Rect::new(0, 0, 6, 2));
        assert_eq!(first.programs.len(), 2);
        assert_eq!(first.programs[0].id.as_deref(), Some("a"));
        assert_eq!(first.programs[0].rect, Rect::new(0, 0, 4, 1));
        assert_eq!(first.programs[1].rect, Rect::new(2, 0, 4, 1));

        let wildcard = &layouts[1];
        assert_eq!(wildcard.rect, Rect::new(12, 3, 4, 3));
        assert_eq!(wildcard.key, format!("{}-{}-g1-g2-g3", DAY_MS + 11 * HOUR, HOUR));
    }

    #[test]
    fn test_layout_skips_deleted() {
        let s = settings();
        let programs = vec![
            Program::new("a").with_begin(8 * HOUR).with_duration(HOUR).with_group("g1"),
            Program::new("gone")
                .with_begin(8 * HOUR)
                .with_duration(HOUR)
                .with_group("g1")
                .with_deleted(true),
            Program::new("elsewhere")
                .with_begin(5 * DAY_MS + 8 * HOUR)
                .with_duration(HOUR)
                .with_deleted(true),
        ];
        let layouts = layout_blocks(&programs, &s);
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].programs.len(), 1);
        assert_eq!(layouts[0].programs[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_rect_huge_duration() {
        let s = settings();
        let r = rect_for(8 * HOUR, i64::MAX, &[], &s).unwrap();
        assert_eq!((r.x, r.y), (0, 0));
        assert_eq!(r.width, i64::MAX / (15 * MIN) + 1);

        let r = rect_for(-1, HOUR, &ids(&["g1"]), &s);
        assert!(r.is_none());
    }

    #[test]
    fn test_stacked_members_use_block_order() {
        let s = settings();
        let programs = vec![
            Program::new("top").with_begin(8 * HOUR).with_duration(HOUR).with_group("g1"),
            Program::new("below")
                .with_begin(8 * HOUR)
                .with_duration(HOUR)
                .with_group("g1")
                .with_block_order(1),
        ];
        let layouts = layout_blocks(&programs, &s);
        assert_eq!(layouts.len(), 1);
        let rows: Vec<i64> = layouts[0].programs.iter().map(|p| p.rect.y).collect();
        assert_eq!(rows, vec![1, 0]);
    }

    #[test]
    fn test_time_indicator() {
        let s = settings();
        let clock = FixedClock::at(DAY_MS + 9 * HOUR + 20 * MIN);
        let r = time_indicator_rect(&s, &clock).unwrap();
        assert_eq!(r, TimeIndicatorRect { x: 6, y: 3, height: 3 });
    }

    #[test]
    fn test_time_indicator_window_edges() {
        let s = settings();
        assert!(time_indicator_rect(&s, &FixedClock::at(8 * HOUR)).is_some());
        assert!(time_indicator_rect(&s, &FixedClock::at(12 * HOUR)).is_some());
        assert!(time_indicator_rect(&s, &FixedClock::at(8 * HOUR - 1)).is_none());
        assert!(time_indicator_rect(&s, &FixedClock::at(12 * HOUR + 1)).is_none());
    }

    #[test]
    fn test_time_indicator_unknown_day() {
        let s = settings();
        assert!(time_indicator_rect(&s, &FixedClock::at(3 * DAY_MS + 9 * HOUR)).is_none());
    }

    #[test]
    fn test_time_indicator_applies_offset() {
        let s = settings();
        // 07:30 UTC seen from UTC+2 is 09:30 local.
        let clock = FixedClock::at(7 * HOUR + 30 * MIN).with_offset(2 * HOUR);
        let r = time_indicator_rect(&s, &clock).unwrap();
        assert_eq!((r.x, r.y), (6, 0));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 2, 1);
        assert!(a.intersects(&Rect::new(1, 0, 2, 1)));
        assert!(!a.intersects(&Rect::new(2, 0, 2, 1)));
        assert!(!a.intersects(&Rect::new(0, 1, 2, 1)));
    }
}
