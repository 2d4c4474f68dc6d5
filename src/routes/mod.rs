mod entry;
pub mod health;
pub mod todos;

pub use entry::{API_PREFIX, router};
