// Profile: the single stored candidate profile, optionally prefilled from a résumé PDF.

pub mod handlers;
pub mod validation;
