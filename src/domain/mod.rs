pub mod entities;
pub mod slug;
pub mod types;
pub mod validation;
