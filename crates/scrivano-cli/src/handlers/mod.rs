pub mod blogs;
pub mod uploads;
