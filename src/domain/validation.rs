//! Field validation for post submissions.
//!
//! The same checks gate both the dashboard form and `PUT /api/blogs`:
//! violations map field names to messages so forms can render them inline.

use std::collections::BTreeMap;

use thiserror::Error;

const TITLE_MIN_LEN: usize = 5;
const SLUG_MIN_LEN: usize = 5;
const EXCERPT_MIN_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", errors.len())]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// One-line summary for API error bodies and logs.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Unvalidated post fields as submitted by either surface.
#[derive(Debug, Clone)]
pub struct PostFields<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub excerpt: &'a str,
    pub cover_image: &'a str,
}

/// Check all submitted fields, collecting every violation.
pub fn validate_post_fields(fields: &PostFields<'_>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = fields.title.trim();
    if title.is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() < TITLE_MIN_LEN {
        errors.push("title", format!("Title must be at least {TITLE_MIN_LEN} characters"));
    }

    if fields.slug.chars().count() < SLUG_MIN_LEN {
        errors.push("slug", format!("Slug must be at least {SLUG_MIN_LEN} characters"));
    } else if !is_valid_slug(fields.slug) {
        errors.push(
            "slug",
            "Slug may only contain lowercase letters, digits, and single hyphens",
        );
    }

    let excerpt = fields.excerpt.trim();
    if excerpt.is_empty() {
        errors.push("excerpt", "Excerpt is required");
    } else if excerpt.chars().count() < EXCERPT_MIN_LEN {
        errors.push(
            "excerpt",
            format!("Excerpt must be at least {EXCERPT_MIN_LEN} characters"),
        );
    }

    if fields.cover_image.trim().is_empty() {
        errors.push("coverImage", "A cover image is required");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`: hyphen-separated lowercase alphanumeric runs.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() {
        return false;
    }

    let mut previous_was_hyphen = true;
    for ch in slug.chars() {
        match ch {
            'a'..='z' | '0'..='9' => previous_was_hyphen = false,
            '-' if !previous_was_hyphen => previous_was_hyphen = true,
            _ => return false,
        }
    }

    !previous_was_hyphen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_shape_accepts_hyphenated_lowercase() {
        assert!(is_valid_slug("my-post-123"));
        assert!(is_valid_slug("abc12"));
    }

    #[test]
    fn slug_shape_rejects_malformed_values() {
        assert!(!is_valid_slug("My Post"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn short_slug_fails_on_length_before_shape() {
        let fields = PostFields {
            title: "Valid Title",
            slug: "ab",
            excerpt: "A long enough excerpt.",
            cover_image: "https://example.com/c.png",
        };
        let errors = validate_post_fields(&fields).expect_err("too short");
        assert!(errors.get("slug").expect("slug error").contains("at least 5"));
    }

    #[test]
    fn all_violations_are_collected() {
        let fields = PostFields {
            title: "Hi",
            slug: "Bad Slug",
            excerpt: "short",
            cover_image: "",
        };
        let errors = validate_post_fields(&fields).expect_err("invalid");
        assert!(errors.get("title").is_some());
        assert!(errors.get("slug").is_some());
        assert!(errors.get("excerpt").is_some());
        assert!(errors.get("coverImage").is_some());
    }

    #[test]
    fn valid_fields_pass() {
        let fields = PostFields {
            title: "A Fine Title",
            slug: "a-fine-title",
            excerpt: "An excerpt long enough to pass.",
            cover_image: "https://example.com/cover.png",
        };
        assert!(validate_post_fields(&fields).is_ok());
    }
}
