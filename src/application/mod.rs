pub mod editor;
pub mod error;
pub mod posts;
pub mod repos;
pub mod stream;
pub mod uploads;
