pub mod dashboard;
pub mod views;
