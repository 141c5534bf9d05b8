//! Domain library for the company profile site.
//!
//! This crate only depends on `serde` (for handing records to templates) and
//! holds the content records, the repository port, and error definitions.
//! Keep adapters and IO concerns out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// A selling point shown on the home page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Feature {
    pub fn new(
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A customer quote shown on the home page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub company: String,
    pub text: String,
    pub avatar: String,
}

impl Testimonial {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        text: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            text: text.into(),
            avatar: avatar.into(),
        }
    }
}

/// Company details rendered in the layout header and footer.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "TechSolution Inc.".into(),
            tagline: "Digital solutions for the future of your business".into(),
            address: "Jl. Teknologi No. 123, Jakarta".into(),
            phone: "+62 21 1234 5678".into(),
            email: "info@techsolution.com".into(),
        }
    }
}

/// A message posted through the contact form.
///
/// Submissions are only logged; nothing is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Confirmation shown after a successful submission.
    ///
    /// Name and email are embedded verbatim; escaping is left to the
    /// template layer.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Thank you {}, your message has been sent! We will reply to {} shortly.",
            self.name, self.email
        )
    }
}

/// Repository port for the listings shown on the home page.
///
/// Both listings are returned in ascending insertion order; templates render
/// them as-is without sorting.
pub trait ContentRepository: Send + Sync {
    fn list_features(&self) -> Result<Vec<Feature>, CoreError>;
    fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError>;
}

impl<R: ContentRepository + ?Sized> ContentRepository for std::sync::Arc<R> {
    fn list_features(&self) -> Result<Vec<Feature>, CoreError> {
        (**self).list_features()
    }

    fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError> {
        (**self).list_testimonials()
    }
}

/// Core domain errors (no external error crates to keep deps at zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    Repository(String),
    Migration(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Repository(msg) => write!(f, "repository error: {}", msg),
            CoreError::Migration(msg) => write!(f, "migration error: {}", msg),
        }
    }
}

impl Error for CoreError {}

pub mod adapters;
pub mod service;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_embeds_name_and_email_verbatim() {
        let sub = ContactSubmission::new("Budi", "budi@x.com", "Hi");
        let msg = sub.confirmation_message();
        assert!(msg.contains("Budi"));
        assert!(msg.contains("budi@x.com"));
    }

    #[test]
    fn confirmation_does_not_escape() {
        let sub = ContactSubmission::new("<b>Budi</b>", "a&b@x.com", "");
        let msg = sub.confirmation_message();
        assert!(msg.contains("<b>Budi</b>"));
        assert!(msg.contains("a&b@x.com"));
    }

    #[test]
    fn core_error_display() {
        let err = CoreError::Repository("no such table: features".into());
        assert_eq!(err.to_string(), "repository error: no such table: features");
    }
}
