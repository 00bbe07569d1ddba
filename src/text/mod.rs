//! Plain-text utilities.

pub mod modifier;

pub use modifier::{delete_range, insert_at, replace_occurrences, replace_range};
