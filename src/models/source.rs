//! Monitored source descriptor.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named page whose update marker is watched.
///
/// `name` is the key of the persisted check state, so renaming a source
/// resets its change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SourceDescriptor {
    #[validate(length(min = 1, message = "Source name cannot be empty"))]
    pub name: String,

    #[validate(url(message = "Source URL must be an absolute URL"))]
    pub url: String,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_descriptor() {
        let source = SourceDescriptor::new("SiteA", "https://example.com/a");
        assert!(source.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let source = SourceDescriptor::new("", "https://example.com/a");
        let errors = source.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_relative_url_rejected() {
        let source = SourceDescriptor::new("SiteA", "/catalog/a");
        let errors = source.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }
}
