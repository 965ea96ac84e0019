//! Program model.
//!
//! A program is the unit of the schedule: something that happens at a time,
//! for a while, for some groups of the audience. A program without `begin`
//! is unplaced and lives in the tray until someone drags it onto the grid.

use serde::{Deserialize, Deserializer, Serialize};

use super::interval::TimeSpan;
use super::GroupId;

/// Program identifier.
pub type ProgramId = String;

/// A schedule item.
///
/// Field names on the wire follow the stored documents (`_id`,
/// `blockOrder`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Unique identifier. Programs without one cannot be referenced.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProgramId>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Start instant (ms). `None` = unplaced.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub begin: Option<i64>,
    /// Duration (ms).
    #[serde(default)]
    pub duration: i64,
    /// Groups this program is meant for. Empty = all groups.
    #[serde(default)]
    pub groups: Vec<GroupId>,
    /// Participant references.
    #[serde(default)]
    pub people: Vec<String>,
    /// Explicit stacking rank inside a block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_order: Option<i64>,
    /// Editors must not auto-adjust the duration.
    #[serde(default)]
    pub locked: bool,
    /// Soft-deleted.
    #[serde(default)]
    pub deleted: bool,
}

impl Program {
    /// Creates an unplaced, zero-length program for all groups.
    pub fn new(id: impl Into<ProgramId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Creates a program without an identifier.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Places the program at an instant.
    pub fn with_begin(mut self, begin_ms: i64) -> Self {
        self.begin = Some(begin_ms);
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration = duration_ms;
        self
    }

    /// Adds a group.
    pub fn with_group(mut self, group: impl Into<GroupId>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Replaces the group set.
    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a participant reference.
    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.people.push(person.into());
        self
    }

    /// Sets the block order.
    pub fn with_block_order(mut self, order: i64) -> Self {
        self.block_order = Some(order);
        self
    }

    /// Marks the program deleted.
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Whether the program has a place on the dated grid.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.begin.is_some()
    }

    /// Whether the program takes part in layout and checking.
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.deleted
    }

    /// Block order with the default applied.
    #[inline]
    pub fn effective_block_order(&self) -> i64 {
        self.block_order.unwrap_or(0)
    }

    /// Whether the program applies to every group.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.groups.is_empty()
    }

    /// Occupied time span. Negative durations collapse to an empty span.
    pub fn span(&self) -> Option<TimeSpan> {
        self.begin
            .map(|begin| TimeSpan::new(begin, begin.saturating_add(self.duration.max(0))))
    }

    /// End instant, if placed.
    pub fn end(&self) -> Option<i64> {
        self.span().map(|s| s.end_ms)
    }
}

/// Reads `begin` as an integer instant. Whole-number floats are accepted;
/// anything else means "unplaced".
fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeInstant {
        Instant(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }

    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    Ok(match MaybeInstant::deserialize(deserializer)? {
        MaybeInstant::Instant(ms) => Some(ms),
        MaybeInstant::Float(ms) if ms.fract() == 0.0 && (-LIMIT..LIMIT).contains(&ms) => {
            Some(ms as i64)
        }
        MaybeInstant::Float(_) | MaybeInstant::Other(_) => None,
    })
}
