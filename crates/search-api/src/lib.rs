//! Shared data types for `fedsearch`.
//!
//! Everything here is pure data: the entity records a local search runs over,
//! the normalized [`MatchResult`] both search paths produce, and the
//! display-ready [`ResultGroup`] handed to a UI.

pub mod group;
pub mod types;

pub use group::{DISPLAY_LIMIT, ResultGroup, TruncationInfo, group_label};
pub use types::{Category, EntityField, EntityKind, MatchResult, SearchableEntity};
