//! ShowService: reads and writes for episodes, guests and appearances.

mod crud;
mod validation;
pub use crud::ShowService;
pub use validation::RequestValidator;
