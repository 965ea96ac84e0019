//! Droppable cells and relocation.
//!
//! Every empty grid cell is a drop target that stands for a concrete
//! `(begin, group)` pair. Dropping a program there yields a patch for the
//! external write path; the core never applies it to its own state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::settings::TimetableSettings;
use crate::models::{GroupId, Program, ProgramId};

/// An addressable empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppableCell {
    /// Instant a program dropped here begins at (ms).
    pub begin: i64,
    /// Target group; `None` for the synthesized wildcard row.
    pub group: Option<GroupId>,
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

/// A proposed change to one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPatch {
    /// Program to update.
    #[serde(rename = "_id")]
    pub program: ProgramId,
    /// New begin (ms).
    pub begin: i64,
    /// New group set.
    pub groups: Vec<GroupId>,
}

impl ProgramPatch {
    /// Copy of `program` with the patch applied.
    pub fn apply(&self, program: &Program) -> Program {
        Program {
            begin: Some(self.begin),
            groups: self.groups.clone(),
            ..program.clone()
        }
    }
}

/// Every droppable cell: day × header × step within header × group row.
///
/// Without configured groups a single wildcard row is synthesized so the
/// grid stays usable.
pub fn droppable_cells(settings: &TimetableSettings) -> Vec<DroppableCell> {
    let rows: Vec<Option<GroupId>> = if settings.groups.is_empty() {
        vec![None]
    } else {
        settings.groups.iter().map(|g| Some(g.id.clone())).collect()
    };

    let mut cells = Vec::with_capacity(
        settings.days.len()
            * settings.time_headers.len()
            * settings.time_span.max(0) as usize
            * rows.len(),
    );
    for (day_idx, &day) in settings.days.iter().enumerate() {
        for (header_idx, &time) in settings.time_headers.iter().enumerate() {
            for slot in 0..settings.time_span {
                let begin = day + time + slot * settings.time_step;
                for (group_idx, group) in rows.iter().enumerate() {
                    cells.push(DroppableCell {
                        begin,
                        group: group.clone(),
                        x: header_idx as i64 * settings.time_span + slot,
                        y: day_idx as i64 * settings.group_cnt + group_idx as i64,
                    });
                }
            }
        }
    }
    cells
}

/// New group set for a program dropped onto `target`.
///
/// Groups are kept when the target is the wildcard row or already one of
/// the program's groups, so a multi-group program dropped on one of its own
/// rows keeps the others. Otherwise they collapse to the target.
pub fn relocated_groups(program: &Program, target: Option<&str>) -> Vec<GroupId> {
    match target {
        Some(target) if !program.groups.iter().any(|g| g == target) => vec![target.to_string()],
        _ => program.groups.clone(),
    }
}

/// Proposes moving the program `program_id` to `begin` in `target`.
///
/// Returns `None` when no program in `programs` has that id.
pub fn relocate(
    program_id: &str,
    begin: i64,
    target: Option<&str>,
    programs: &[Program],
) -> Option<ProgramPatch> {
    let program = programs
        .iter()
        .find(|p| p.id.as_deref() == Some(program_id))?;
    let patch = ProgramPatch {
        program: program_id.to_string(),
        begin,
        groups: relocated_groups(program, target),
    };
    debug!(program = program_id, begin, groups = ?patch.groups, "relocation proposed");
    Some(patch)
}

/// Proposes moving a program onto a droppable cell.
pub fn relocate_to_cell(
    program_id: &str,
    cell: &DroppableCell,
    programs: &[Program],
) -> Option<ProgramPatch> {
    relocate(program_id, cell.begin, cell.group.as_deref(), programs)
}
