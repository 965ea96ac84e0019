//! Grid layout engine.
//!
//! Turns a schedule snapshot into grid cells:
//!
//! 1. [`compute_settings`] derives days, visible window and rows.
//! 2. [`group_programs_to_blocks`] clusters overlapping programs.
//! 3. [`rect_for`] / [`layout_blocks`] compute block and member rects.
//! 4. [`droppable_cells`], [`relocate`] and [`tray_layout`] cover drag and
//!    drop and the overflow tray.
//!
//! All functions are pure over their inputs.

mod blocks;
mod droppable;
mod grid;
mod headers;
mod settings;
mod tray;

pub use blocks::{expand_wildcard_groups, group_programs_to_blocks, Block};
pub use droppable::{
    droppable_cells, relocate, relocate_to_cell, relocated_groups, DroppableCell, ProgramPatch,
};
pub use grid::{
    layout_blocks, program_rect, program_rect_in_block, rect_for, time_indicator_rect,
    BlockLayout, PlacedProgram, Rect, TimeIndicatorRect,
};
pub use headers::{date_headers, group_headers, time_headers, DateHeader, GroupHeader, TimeHeader};
pub use settings::{compute_settings, TimetableSettings};
pub use tray::{tray_layout, TrayLayout};
