pub mod error;
pub mod tmdb;
pub mod utils;
