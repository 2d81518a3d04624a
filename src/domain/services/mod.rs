//! Domain Services
//!
//! Stateless rules used by the application layer.

mod layout;
mod selection;

pub use layout::{archive_prefix, locate_top_level, TopLevelEntry};
pub use selection::{select_asset, select_payload};
