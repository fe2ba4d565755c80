pub mod featured;
pub mod ordering;

pub use featured::FeaturedSelector;
pub use ordering::{EditState, MoveCommand, OrderingEditor};
