pub mod lenient;
pub mod profile;
