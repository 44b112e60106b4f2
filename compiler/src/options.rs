use serde::Serialize;
use tracing::warn;

use crate::{error::GenError, utils::is_valid_identifier};

pub const DEFAULT_EXTENSION: &str = ".gen.hpp";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HeaderStyle {
    #[default]
    Pragma,
    Guard,
}

/// Generation-wide settings, built once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenOptions {
    pub header:      HeaderStyle,
    pub namespace:   Option<String>,
    pub extension:   String,
    pub all_mutable: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        GenOptions {
            header:      HeaderStyle::Pragma,
            namespace:   None,
            extension:   DEFAULT_EXTENSION.to_string(),
            all_mutable: false,
        }
    }
}

impl GenOptions {
    /// Checks the namespace and warns about an extension without a leading period.
    pub fn validate(&self) -> Result<(), GenError> {
        if let Some(ns) = &self.namespace {
            if !ns.split("::").all(is_valid_identifier) {
                return Err(GenError::InvalidNamespace(ns.clone()));
            }
        }
        if !self.extension.starts_with('.') {
            warn!(extension = %self.extension, "extension supplied does not start with period (.)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GenOptions::default();
        assert_eq!(opts.header, HeaderStyle::Pragma);
        assert_eq!(opts.extension, ".gen.hpp");
        assert!(opts.namespace.is_none());
        assert!(!opts.all_mutable);
        opts.validate().unwrap();
    }

    #[test]
    fn test_namespace_validation() {
        let mut opts = GenOptions {
            namespace: Some("outer::inner".to_string()),
            ..GenOptions::default()
        };
        opts.validate().unwrap();

        opts.namespace = Some("bad ns".to_string());
        assert!(matches!(opts.validate(), Err(GenError::InvalidNamespace(_))));

        opts.namespace = Some("outer::".to_string());
        assert!(matches!(opts.validate(), Err(GenError::InvalidNamespace(_))));
    }

    #[test]
    fn test_extension_without_period_is_accepted() {
        let opts = GenOptions {
            extension: "hpp".to_string(),
            ..GenOptions::default()
        };
        opts.validate().unwrap();
    }
}
