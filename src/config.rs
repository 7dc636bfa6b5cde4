//! # Loader Settings
//!
//! Base options can be read from a TOML file at startup instead of being written in code.
//! Only the plain-data fields can be expressed this way; error factories and computed
//! messages are still set through [`LoaderOptions`].
//!
//! ```toml
//! field_name = "slug"
//! object_name = "loadedObject"
//! pass_error_to_next = false
//! error_message = "No such record"
//! ```

use crate::error::ConfigError;
use crate::loader::{LoaderOptions, ParamLoaderFactory};
use crate::request::ParamRequest;
use serde::Deserialize;
use std::path::Path;

/// Plain-data loader options as they appear in a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderSettings {
    pub field_name: Option<String>,
    pub object_name: Option<String>,
    pub pass_error_to_next: Option<bool>,
    pub error_message: Option<String>,
}

impl LoaderSettings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::InvalidSettings(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidSettings(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&input)
    }

    /// Converts into options with only the fields present in the file set.
    pub fn into_options<R>(self) -> LoaderOptions<R> {
        let mut options = LoaderOptions::new();
        if let Some(field_name) = self.field_name {
            options = options.field_name(field_name);
        }
        if let Some(object_name) = self.object_name {
            options = options.object_name(object_name);
        }
        if let Some(pass) = self.pass_error_to_next {
            options = options.pass_error_to_next(pass);
        }
        if let Some(message) = self.error_message {
            options = options.error_message(message);
        }
        options
    }

    /// A factory using these settings as its base options.
    pub fn into_factory<R>(self) -> ParamLoaderFactory<R>
    where
        R: ParamRequest + 'static,
    {
        ParamLoaderFactory::with_defaults(self.into_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_settings() {
        let settings = LoaderSettings::from_toml_str(
            r#"
            object_name = "loadedObject"
            pass_error_to_next = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.object_name.as_deref(), Some("loadedObject"));
        assert_eq!(settings.pass_error_to_next, Some(false));
        assert_eq!(settings.field_name, None);
    }

    #[test]
    fn settings_become_factory_defaults() {
        use crate::mock::MockModel;
        use crate::request::Request;

        let factory = LoaderSettings::from_toml_str(
            r#"
            field_name = "slug"
            object_name = "loadedObject"
            pass_error_to_next = false
            "#,
        )
        .unwrap()
        .into_factory::<Request>();

        let handler = factory
            .load_model(MockModel::<String>::new("Book"), LoaderOptions::new())
            .unwrap();
        assert_eq!(handler.object_name(), "loadedObject");
        assert_eq!(handler.field_name(), Some("slug"));
        assert!(!handler.passes_error_to_next());
    }

    #[test]
    fn empty_input_is_all_defaults() {
        assert_eq!(
            LoaderSettings::from_toml_str("").unwrap(),
            LoaderSettings::default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LoaderSettings::from_toml_str("objectName = \"book\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings(_)));
    }

    #[test]
    fn missing_file_is_a_settings_error() {
        let err = LoaderSettings::from_file("/nonexistent/params-loader.toml").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings(msg) if msg.contains("params-loader.toml")));
    }
}
