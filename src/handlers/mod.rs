//! HTTP handlers for the index, episodes, guests and appearances.

pub mod appearance;
pub mod episode;
pub mod guest;
pub mod index;
pub use appearance::*;
pub use episode::*;
pub use guest::*;
pub use index::*;
