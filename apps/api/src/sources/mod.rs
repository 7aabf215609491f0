//! Where raw text comes from: job listing pages and uploaded résumé PDFs.

pub mod page;
pub mod pdf;

pub use page::{HttpPageFetcher, PageFetcher};
pub use pdf::extract_pdf_text;
