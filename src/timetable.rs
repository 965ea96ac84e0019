//! One render pass over a schedule snapshot.
//!
//! Bundles everything a grid view needs. Deleted programs are dropped before
//! any computation; the clock is read once so the pass is consistent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{FixedClock, TimeProvider};
use crate::config::TimetableConfig;
use crate::layout::{
    compute_settings, date_headers, droppable_cells, group_headers, layout_blocks, time_headers,
    time_indicator_rect, tray_layout, BlockLayout, DateHeader, DroppableCell, GroupHeader,
    TimeHeader, TimeIndicatorRect, TimetableSettings, TrayLayout,
};
use crate::models::{Group, Program};

/// Everything needed to draw the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableView {
    /// Derived grid settings.
    pub settings: TimetableSettings,
    /// Positioned blocks of placed programs.
    pub blocks: Vec<BlockLayout>,
    /// Empty cells accepting drops.
    pub droppables: Vec<DroppableCell>,
    /// Column headers.
    pub time_headers: Vec<TimeHeader>,
    /// Day headers.
    pub date_headers: Vec<DateHeader>,
    /// Group row headers.
    pub group_headers: Vec<GroupHeader>,
    /// Current-time marker, when now is on the grid.
    pub time_indicator: Option<TimeIndicatorRect>,
    /// Unplaced programs, when the tray is enabled.
    pub tray: Option<TrayLayout>,
}

impl TimetableView {
    /// Lays out a snapshot.
    pub fn build(
        programs: &[Program],
        groups: &[Group],
        config: &TimetableConfig,
        clock: &dyn TimeProvider,
    ) -> Self {
        let live: Vec<Program> = programs.iter().filter(|p| p.is_live()).cloned().collect();

        let now = clock.now_ms();
        let frozen = FixedClock::at(now).with_offset(clock.utc_offset_ms(now));
        let settings = compute_settings(&live, groups, config, now);

        let view = Self {
            blocks: layout_blocks(&live, &settings),
            droppables: droppable_cells(&settings),
            time_headers: time_headers(&settings),
            date_headers: date_headers(&settings),
            group_headers: group_headers(&settings),
            time_indicator: time_indicator_rect(&settings, &frozen),
            tray: config.tray_enabled.then(|| tray_layout(&live, &settings)),
            settings,
        };

        debug!(
            programs = live.len(),
            blocks = view.blocks.len(),
            droppables = view.droppables.len(),
            tray = view.tray.as_ref().map_or(0, |t| t.items.len()),
            "timetable laid out"
        );

        view
    }

    /// Time columns of the dated grid.
    pub fn columns(&self) -> i64 {
        self.settings.columns()
    }

    /// Rows of the dated grid.
    pub fn rows(&self) -> i64 {
        self.settings.rows()
    }
}
