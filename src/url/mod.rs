//! URL handling module for Diary-Walker
//!
//! The diary site renders image sources and navigation links as
//! site-relative paths. This module turns them into absolute URLs against
//! the site origin and derives file names for downloaded images.

mod resolve;

pub use resolve::{file_name_from_url, resolve_site_relative, site_origin, FALLBACK_FILE_NAME};
