use std::fmt;
use thiserror::Error;

use crate::image::ImageSource;

/// Required fields of a portfolio entry, named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    ImageUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Category => "category",
            Field::ImageUrl => "imageUrl",
        };
        write!(f, "{name}")
    }
}

/// Validation failure naming every missing required field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing required fields: {}", format_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

fn format_fields(fields: &[Field]) -> String {
    let names: Vec<String> = fields.iter().map(Field::to_string).collect();
    names.join(", ")
}

/// What an admin typed into the entry form. Nothing is trusted yet:
/// `validate` reports every missing required field at once so the form can
/// surface them together.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub category: String,
    pub image: ImageSource,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, category: impl Into<String>, image: ImageSource) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            image,
            description: None,
            link: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Check the required fields. Whitespace-only input counts as missing.
    /// An upload counts as a present image; its bytes are checked separately
    /// by intake.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(Field::Title);
        }
        if self.category.trim().is_empty() {
            missing.push(Field::Category);
        }
        if let ImageSource::Url(url) = &self.image {
            if url.trim().is_empty() {
                missing.push(Field::ImageUrl);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Trimmed optional field, `None` when left blank in the form.
    pub fn description(&self) -> Option<String> {
        normalize_optional(self.description.as_deref())
    }

    pub fn link(&self) -> Option<String> {
        normalize_optional(self.link.as_deref())
    }
}

fn normalize_optional(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.to_string()),
    }
}
