//! Timetable domain models.
//!
//! Boundary records shared by the checker and the layout engine, plus the
//! two predicates everything else is built on: time overlap and group
//! intersection.
//!
//! | Type | Meaning |
//! |------|---------|
//! | Program | A schedule item with time and group membership |
//! | Group | An audience row |
//! | Person | A participant, opaque to the core |
//! | Violation | A finding about one program |
//! | CheckReport | All findings of one checker pass |

mod group;
pub mod interval;
mod program;
mod violation;

pub use group::{Group, GroupId, Person};
pub use interval::{
    ceil_div, date_of, groups_intersect, same_group_set, time_of_day, time_overlaps, TimeSpan,
    DAY_MS,
};
pub use program::{Program, ProgramId};
pub use violation::{CheckReport, RuleFailure, RuleId, Violation, OVERLAP_MESSAGE};
