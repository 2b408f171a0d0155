//! Shared domain enumerations aligned with persisted database enums.
//!
//! `PostStatus` is defined in `scrivano-api-types` so the CLI shares it;
//! the re-export keeps domain code importing from one place.

pub use scrivano_api_types::PostStatus;
