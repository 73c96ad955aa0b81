//! Program listings: the text format programs are loaded from.

pub mod listing;

pub use listing::{Image, ListingError, parse_listing, load_listing, format_listing, save_listing};
