//! Milestone form state and validation.
//!
//! Validation is a pure function from submitted values to a map of field
//! names to error messages. All violations are collected and reported
//! together rather than short-circuiting on the first, so the form can show
//! every problem at once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Field name to human-readable error message.
pub type FieldErrors = BTreeMap<String, String>;

/// Submitted milestone field values, before validation and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDraft {
    /// Submitted title.
    #[serde(default)]
    pub title: String,
    /// Submitted description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Submitted event date, if any.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// Submitted image URL, if any.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Field values that passed validation, with optional fields normalized to
/// absent when submitted empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMilestone {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description, absent when submitted empty.
    pub description: Option<String>,
    /// The event date.
    pub event_date: NaiveDate,
    /// Trimmed image URL, absent when submitted empty.
    pub image_url: Option<String>,
}

impl MilestoneDraft {
    /// Validates the draft, collecting every violation.
    ///
    /// Returns an empty map when the draft is valid.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.insert("title".to_string(), "title is required".to_string());
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.insert(
                "title".to_string(),
                format!("title must be at most {TITLE_MAX_CHARS} characters"),
            );
        }

        if self.event_date.is_none() {
            errors.insert(
                "event_date".to_string(),
                "event date is required".to_string(),
            );
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                errors.insert(
                    "description".to_string(),
                    format!("description must be at most {DESCRIPTION_MAX_CHARS} characters"),
                );
            }
        }

        if let Some(image_url) = &self.image_url {
            let trimmed = image_url.trim();
            if !trimmed.is_empty() && Url::parse(trimmed).is_err() {
                errors.insert(
                    "image_url".to_string(),
                    "image URL must be a valid absolute URL".to_string(),
                );
            }
        }

        errors
    }

    /// Validates and normalizes the draft in one step.
    ///
    /// Optional fields submitted empty (after trimming) come back absent.
    ///
    /// # Errors
    ///
    /// Returns the full set of field errors when any constraint is violated.
    pub fn normalize(&self) -> Result<ValidatedMilestone, FieldErrors> {
        let errors = self.validate();
        match self.event_date {
            Some(event_date) if errors.is_empty() => Ok(ValidatedMilestone {
                title: self.title.trim().to_string(),
                description: normalize_optional(self.description.as_deref()),
                event_date,
                image_url: normalize_optional(self.image_url.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Form-state aggregate: current values plus per-field error messages.
///
/// Editing a field clears only that field's existing error; the full
/// validation runs on submission via [`FormState::validate`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: MilestoneDraft,
    errors: FieldErrors,
}

impl FormState {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from existing values (the edit form).
    #[must_use]
    pub fn prefilled(draft: MilestoneDraft) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
        }
    }

    /// Returns the current field values.
    #[must_use]
    pub fn draft(&self) -> &MilestoneDraft {
        &self.draft
    }

    /// Returns the current field errors.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Sets the title, clearing any existing title error.
    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
        self.errors.remove("title");
    }

    /// Sets the description, clearing any existing description error.
    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
        self.errors.remove("description");
    }

    /// Sets the event date, clearing any existing event date error.
    pub fn set_event_date(&mut self, event_date: Option<NaiveDate>) {
        self.draft.event_date = event_date;
        self.errors.remove("event_date");
    }

    /// Sets the image URL, clearing any existing image URL error.
    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.draft.image_url = image_url;
        self.errors.remove("image_url");
    }

    /// Runs full validation, replacing the error map.
    ///
    /// Returns true when the form is ready to submit.
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> MilestoneDraft {
        MilestoneDraft {
            title: "Ibadah Natal 2025".to_string(),
            description: None,
            event_date: Some("2025-12-25".parse().expect("valid date")),
            image_url: None,
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(valid_draft().validate().is_empty());
    }

    #[test]
    fn empty_title_names_the_title_field() {
        let draft = MilestoneDraft {
            title: String::new(),
            ..valid_draft()
        };
        let errors = draft.validate();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn whitespace_title_is_still_required() {
        let draft = MilestoneDraft {
            title: "   ".to_string(),
            ..valid_draft()
        };
        assert!(draft.validate().contains_key("title"));
    }

    #[test]
    fn title_of_exactly_200_chars_is_accepted() {
        let draft = MilestoneDraft {
            title: "x".repeat(200),
            ..valid_draft()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn title_of_201_chars_is_rejected() {
        let draft = MilestoneDraft {
            title: "x".repeat(201),
            ..valid_draft()
        };
        assert!(draft.validate().contains_key("title"));
    }

    #[test]
    fn missing_event_date_is_rejected() {
        let draft = MilestoneDraft {
            event_date: None,
            ..valid_draft()
        };
        assert!(draft.validate().contains_key("event_date"));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let draft = MilestoneDraft {
            description: Some("d".repeat(2001)),
            ..valid_draft()
        };
        assert!(draft.validate().contains_key("description"));
    }

    #[test]
    fn description_at_limit_is_accepted() {
        let draft = MilestoneDraft {
            description: Some("d".repeat(2000)),
            ..valid_draft()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn malformed_image_url_is_rejected() {
        let draft = MilestoneDraft {
            image_url: Some("not a url".to_string()),
            ..valid_draft()
        };
        assert!(draft.validate().contains_key("image_url"));
    }

    #[test]
    fn absolute_image_url_is_accepted() {
        let draft = MilestoneDraft {
            image_url: Some("https://example.com/x.jpg".to_string()),
            ..valid_draft()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn all_violations_are_collected_together() {
        let draft = MilestoneDraft {
            title: String::new(),
            description: Some("d".repeat(2001)),
            event_date: None,
            image_url: Some("not a url".to_string()),
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("description"));
        assert!(errors.contains_key("event_date"));
        assert!(errors.contains_key("image_url"));
    }

    #[test]
    fn normalize_strips_empty_optionals() {
        let draft = MilestoneDraft {
            title: "  Launch  ".to_string(),
            description: Some("   ".to_string()),
            event_date: Some("2025-06-01".parse().expect("valid date")),
            image_url: Some(String::new()),
        };
        let fields = draft.normalize().expect("should validate");
        assert_eq!(fields.title, "Launch");
        assert_eq!(fields.description, None);
        assert_eq!(fields.image_url, None);
    }

    #[test]
    fn normalize_keeps_present_optionals() {
        let draft = MilestoneDraft {
            description: Some("A description".to_string()),
            image_url: Some("https://example.com/x.jpg".to_string()),
            ..valid_draft()
        };
        let fields = draft.normalize().expect("should validate");
        assert_eq!(fields.description.as_deref(), Some("A description"));
        assert_eq!(fields.image_url.as_deref(), Some("https://example.com/x.jpg"));
    }

    #[test]
    fn normalize_returns_errors_for_invalid_draft() {
        let draft = MilestoneDraft {
            title: String::new(),
            ..valid_draft()
        };
        let errors = draft.normalize().unwrap_err();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn editing_a_field_clears_only_its_own_error() {
        let mut form = FormState::prefilled(MilestoneDraft {
            title: String::new(),
            event_date: None,
            ..MilestoneDraft::default()
        });
        assert!(!form.validate());
        assert!(form.errors().contains_key("title"));
        assert!(form.errors().contains_key("event_date"));

        form.set_title("Launch".to_string());
        assert!(!form.errors().contains_key("title"));
        assert!(form.errors().contains_key("event_date"));
    }

    #[test]
    fn submission_runs_full_validation() {
        let mut form = FormState::new();
        form.set_title("Launch".to_string());
        assert!(!form.validate());
        assert!(form.errors().contains_key("event_date"));

        form.set_event_date(Some("2025-06-01".parse().expect("valid date")));
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }
}
