#![forbid(unsafe_code)]
//! Quill model SSOT: the three persisted document shapes.
//!
//! Posts and ads live on disk as ordered lists of raw JSON records; the
//! typed views here are lenient on purpose so that legacy records (missing
//! fields, non-numeric ids) render instead of erroring. Settings is a
//! singleton object with documented per-field defaults.

mod record;
mod settings;

pub use record::{sort_newest_first, Ad, Post};
pub use settings::Settings;

pub const CRATE_NAME: &str = "quill-model";
