//! Timetable core for shared event schedules.
//!
//! Programs are placed across days, time slots and audience groups. This
//! crate checks them for conflicts and lays them out on a two-dimensional
//! time × group grid. Persistence, sync, editors and styling live outside.
//!
//! # Modules
//!
//! - **`models`**: Boundary records (`Program`, `Group`, `Person`,
//!   `Violation`, `CheckReport`) and the interval/group predicates
//! - **`checker`**: Built-in overlap detection plus the generic `Rule` evaluator
//! - **`layout`**: Block grouping, grid settings and rects, headers,
//!   droppable cells, relocation and the overflow tray
//! - **`timetable`**: One render pass over a snapshot
//! - **`config`**, **`clock`**, **`error`**: Ambient settings, injected time
//!   source and error type
//!
//! # Time Model
//!
//! Instants are milliseconds since the Unix epoch and carry no zone. Days are
//! UTC midnights; only the current-time indicator applies the viewer's offset.
//!
//! # Example
//!
//! ```
//! use u_timetable::checker::check_rules;
//! use u_timetable::models::Program;
//!
//! let programs = vec![
//!     Program::new("a").with_begin(0).with_duration(60).with_group("first"),
//!     Program::new("b").with_begin(30).with_duration(60).with_group("first"),
//! ];
//! let report = check_rules(&[], &programs, &[]);
//! assert_eq!(report.other.len(), 2);
//! ```

pub mod checker;
pub mod clock;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod timetable;

pub use error::{Result, TimetableError};
