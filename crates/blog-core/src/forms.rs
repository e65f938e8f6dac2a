//! Input forms for the public views.
//!
//! Forms are deserialized from query strings or urlencoded bodies, cleaned
//! (trimmed), then validated. Validation failures are reported per field so
//! the view can re-render the form with messages next to each input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::ports::EmailMessage;

/// Field name to messages.
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Clean and validate a form in one step.
pub trait CleanForm: Validate + Sized {
    /// Normalize raw input (trim whitespace) before validation.
    fn clean(self) -> Self;

    fn cleaned(self) -> Result<Self, FormErrors> {
        let form = self.clean();
        match form.validate() {
            Ok(()) => Ok(form),
            Err(errors) => Err(collect_errors(&errors)),
        }
    }
}

fn collect_errors(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Share a post with a friend by email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmailPostForm {
    #[serde(default)]
    #[validate(length(min = 2, max = 25, message = "Name must be between 2 and 25 characters."))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid sender email address."))]
    pub sender_email: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid recipient email address."))]
    pub recipient_email: String,

    #[serde(default)]
    pub comments: String,
}

impl CleanForm for EmailPostForm {
    fn clean(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            sender_email: self.sender_email.trim().to_string(),
            recipient_email: self.recipient_email.trim().to_string(),
            comments: self.comments.trim().to_string(),
        }
    }
}

impl EmailPostForm {
    /// Compose the recommendation email for a post reachable at `post_url`.
    pub fn share_message(&self, post_title: &str, post_url: &str) -> EmailMessage {
        let subject = format!("{} recommends you to read {}", self.name, post_title);
        let mut body = format!("Read {} at the {}\n\n", post_title, post_url);
        if !self.comments.is_empty() {
            body.push_str(&format!("{}'s comments: {}", self.name, self.comments));
        }

        EmailMessage {
            subject,
            body,
            from: self.sender_email.clone(),
            to: vec![self.recipient_email.clone()],
        }
    }
}

/// Body of a new comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 4000, message = "Comment must be between 1 and 4000 characters."))]
    pub body: String,
}

impl CleanForm for CommentForm {
    fn clean(self) -> Self {
        Self {
            body: self.body.trim().to_string(),
        }
    }
}

/// Full-text search input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 1024, message = "Enter a search query of at most 1024 characters."))]
    pub query: String,
}

impl CleanForm for SearchForm {
    fn clean(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

/// Admin post editor fields. A blank slug is derived from the title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters."))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Slug must be between 1 and 255 characters."))]
    pub slug: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 4000, message = "Body must be between 1 and 4000 characters."))]
    pub body: String,
}

impl CleanForm for PostForm {
    fn clean(self) -> Self {
        let title = self.title.trim().to_string();
        let slug = match self.slug.trim() {
            "" => slug::slugify(&title),
            given => given.to_string(),
        };
        Self {
            title,
            slug,
            body: self.body.trim().to_string(),
        }
    }
}
