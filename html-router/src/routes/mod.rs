pub mod index;
pub mod movie;
