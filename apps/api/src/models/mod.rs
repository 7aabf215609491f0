pub mod email;
pub mod profile;
