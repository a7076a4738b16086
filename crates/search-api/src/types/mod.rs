mod category;
mod entity;
mod result;

pub use category::Category;
pub use entity::{EntityField, EntityKind, SearchableEntity};
pub use result::MatchResult;
