//! Local text handling: normalization of scraped/extracted text and contact lookup.
//! Pure functions only — no I/O.

pub mod cleaner;
pub mod email_extractor;

pub use cleaner::clean;
pub use email_extractor::extract_email;
