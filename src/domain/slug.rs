//! Slug derivation and the derived/diverged lifecycle of the editor slug field.
//!
//! Derivation is deterministic: lowercase, non-alphanumeric runs collapse to
//! single hyphens, leading and trailing hyphens are stripped. `SlugField`
//! models whether the slug still tracks the title or has been edited by hand,
//! as an explicit flag rather than a string comparison.

use slug::slugify;
use thiserror::Error;

/// Errors that can occur while deriving a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Editor slug state: the value plus whether it is still derived from the title.
///
/// The flag flips to diverged the moment the field is edited and stays there
/// until an explicit regeneration, which recomputes from the current title
/// and restores the derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    derived: bool,
}

impl SlugField {
    /// Start a fresh field derived from a title.
    pub fn derived_from(title: &str) -> Result<Self, SlugError> {
        Ok(Self {
            value: derive_slug(title)?,
            derived: true,
        })
    }

    /// Restore a field from persisted state.
    pub fn restore(value: String, derived: bool) -> Self {
        Self { value, derived }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_derived(&self) -> bool {
        self.derived
    }

    /// React to a title edit. Re-derives only while the field has never been
    /// manually edited; returns whether the value changed.
    pub fn title_changed(&mut self, title: &str) -> Result<bool, SlugError> {
        if !self.derived {
            return Ok(false);
        }
        let next = derive_slug(title)?;
        let changed = next != self.value;
        self.value = next;
        Ok(changed)
    }

    /// React to a manual edit of the slug field itself.
    pub fn edited(&mut self, value: String) {
        self.value = value;
        self.derived = false;
    }

    /// Explicit regeneration from the title, regardless of divergence.
    pub fn regenerate(&mut self, title: &str) -> Result<(), SlugError> {
        self.value = derive_slug(title)?;
        self.derived = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_collapses_punctuation() {
        assert_eq!(derive_slug("Hello World").expect("slug"), "hello-world");
        assert_eq!(derive_slug("Hello   World!!").expect("slug"), "hello-world");
        assert_eq!(derive_slug("  --Spaced--  ").expect("slug"), "spaced");
    }

    #[test]
    fn derive_slug_is_idempotent() {
        let once = derive_slug("A Post: With Punctuation?").expect("slug");
        let twice = derive_slug(&once).expect("slug");
        assert_eq!(once, twice);
    }

    #[test]
    fn derive_slug_rejects_empty_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }

    #[test]
    fn title_edits_track_until_divergence() {
        let mut field = SlugField::derived_from("First Title").expect("field");
        assert_eq!(field.value(), "first-title");

        assert!(field.title_changed("Second Title").expect("rederive"));
        assert_eq!(field.value(), "second-title");

        field.edited("custom-slug".to_string());
        assert!(!field.is_derived());

        assert!(!field.title_changed("Third Title").expect("no-op"));
        assert_eq!(field.value(), "custom-slug");
    }

    #[test]
    fn regenerate_restores_derived_state() {
        let mut field = SlugField::derived_from("Original").expect("field");
        field.edited("hand-written".to_string());

        field.regenerate("Fresh Title").expect("regenerate");
        assert_eq!(field.value(), "fresh-title");
        assert!(field.is_derived());

        assert!(field.title_changed("Another Title").expect("rederive"));
        assert_eq!(field.value(), "another-title");
    }
}
