//! Overflow tray for unplaced programs.
//!
//! Programs without a begin are packed below the dated grid, first-fit in
//! input order, into rows as wide as the grid. Only tray members are kept
//! apart from each other; they are never compared against dated programs.

use serde::{Deserialize, Serialize};

use super::grid::{PlacedProgram, Rect};
use super::settings::TimetableSettings;
use crate::models::{ceil_div, Program};

/// Packed tray contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayLayout {
    /// Tray area, directly below the dated grid.
    pub rect: Rect,
    /// Members with rects relative to the tray area.
    pub items: Vec<PlacedProgram>,
}

/// Packs live, unplaced programs into the tray.
pub fn tray_layout(programs: &[Program], settings: &TimetableSettings) -> TrayLayout {
    let width = settings.columns().max(1);
    // Free column of each open row.
    let mut rows: Vec<i64> = Vec::new();
    let mut items = Vec::new();

    for program in programs.iter().filter(|p| p.is_live() && !p.is_placed()) {
        let w = ceil_div(program.duration.max(0), settings.time_step).clamp(1, width);
        let row = match rows.iter().position(|&used| used + w <= width) {
            Some(row) => row,
            None => {
                rows.push(0);
                rows.len() - 1
            }
        };
        items.push(PlacedProgram {
            id: program.id.clone(),
            rect: Rect::new(rows[row], row as i64, w, 1),
        });
        rows[row] += w;
    }

    TrayLayout {
        rect: Rect::new(0, settings.rows(), width, (rows.len() as i64).max(1)),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::layout::compute_settings;
    use crate::models::Group;

    const MIN: i64 = 60_000;
    const HOUR: i64 = 60 * MIN;

    /// One day, 08:00–10:00: 8 columns, two group rows.
    fn settings() -> TimetableSettings {
        let programs = vec![Program::new("a").with_begin(8 * HOUR).with_duration(2 * HOUR)];
        let groups = vec![Group::new("g1"), Group::new("g2")];
        compute_settings(&programs, &groups, &TimetableConfig::default(), 0)
    }

    fn tray(id: &str, duration: i64) -> Program {
        Program::new(id).with_duration(duration)
    }

    #[test]
    fn test_empty_tray() {
        let layout = tray_layout(&[], &settings());
        assert!(layout.items.is_empty());
        assert_eq!(layout.rect, Rect::new(0, 2, 8, 1));
    }

    #[test]
    fn test_first_fit_rows() {
        let programs = vec![
            tray("a", HOUR),     // 4 columns
            tray("b", 75 * MIN), // 5 columns, does not fit next to a
            tray("c", 45 * MIN), // 3 columns, fits next to a
            tray("d", 50 * MIN), // 4 columns, fits nowhere
        ];
        let layout = tray_layout(&programs, &settings());
        let rects: Vec<Rect> = layout.items.iter().map(|i| i.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 4, 1),
                Rect::new(0, 1, 5, 1),
                Rect::new(4, 0, 3, 1),
                Rect::new(0, 2, 4, 1),
            ]
        );
        assert_eq!(layout.rect.height, 3);
    }

    #[test]
    fn test_long_and_empty_durations_clamped() {
        let programs = vec![tray("long", 10 * HOUR), tray("zero", 0)];
        let layout = tray_layout(&programs, &settings());
        assert_eq!(layout.items[0].rect, Rect::new(0, 0, 8, 1));
        assert_eq!(layout.items[1].rect, Rect::new(0, 1, 1, 1));
    }

    #[test]
    fn test_huge_duration_clamped() {
        let layout = tray_layout(&[tray("t", i64::MAX)], &settings());
        assert_eq!(layout.items[0].rect, Rect::new(0, 0, 8, 1));
    }

    #[test]
    fn test_placed_and_deleted_excluded() {
        let programs = vec![
            Program::new("placed").with_begin(8 * HOUR).with_duration(HOUR),
            tray("gone", HOUR).with_deleted(true),
            tray("kept", HOUR),
        ];
        let layout = tray_layout(&programs, &settings());
        assert_eq!(layout.items.len(), 1);
        assert_eq!(layout.items[0].id.as_deref(), Some("kept"));
    }

    #[test]
    fn test_items_never_overlap() {
        let programs: Vec<Program> = (0..12)
            .map(|i| tray(&format!("p{i}"), (i % 5 + 1) * 20 * MIN))
            .collect();
        let layout = tray_layout(&programs, &settings());
        for (i, a) in layout.items.iter().enumerate() {
            assert!(a.rect.x >= 0 && a.rect.x + a.rect.width <= layout.rect.width);
            for b in &layout.items[i + 1..] {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }
}
