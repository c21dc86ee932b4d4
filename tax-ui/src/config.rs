//! Bridge configuration, read from a TOML file.
//!
//! Every key has a default, so an empty file (or no file at all) yields a
//! bridge talking to a local backend with the stock error presentation.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{logging::LogSettings, models::FormId, page::NodeId, presenter::ErrorPresenter};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub backend: BackendConfig,
    pub forms: FormPresenters,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin the `/api/...` paths are joined to.
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Error presenter of each form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormPresenters {
    pub estimate: ErrorPresenter,
    pub save_net: ErrorPresenter,
    pub edit_latest: ErrorPresenter,
}

impl Default for FormPresenters {
    fn default() -> Self {
        Self {
            estimate: ErrorPresenter::Modal,
            save_net: ErrorPresenter::Modal,
            edit_latest: ErrorPresenter::Inline(NodeId::EditError),
        }
    }
}

impl FormPresenters {
    pub fn for_form(
        &self,
        form: FormId,
    ) -> ErrorPresenter {
        match form {
            FormId::Estimate => self.estimate,
            FormId::SaveNet => self.save_net,
            FormId::EditLatest => self.edit_latest,
        }
    }
}

impl BridgeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid bridge configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();

        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(
            config.forms.for_form(FormId::EditLatest),
            ErrorPresenter::Inline(NodeId::EditError)
        );
        assert_eq!(config.forms.for_form(FormId::SaveNet), ErrorPresenter::Modal);
    }

    #[test]
    fn example_file_parses() {
        let config = BridgeConfig::from_toml_str(include_str!("../bridge.example.toml")).unwrap();

        assert_eq!(config.forms, FormPresenters::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.logging.file.as_deref(),
            Some(Path::new("bridge.log"))
        );
    }

    #[test]
    fn presenters_can_be_swapped_per_form() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [forms]
            estimate = { inline = "edit_error" }
            edit_latest = "modal"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.forms.for_form(FormId::Estimate),
            ErrorPresenter::Inline(NodeId::EditError)
        );
        assert_eq!(config.forms.for_form(FormId::SaveNet), ErrorPresenter::Modal);
        assert_eq!(config.forms.for_form(FormId::EditLatest), ErrorPresenter::Modal);
    }

    #[test]
    fn unknown_presenter_is_rejected() {
        let err = BridgeConfig::from_toml_str("[forms]\nestimate = \"toast\"").unwrap_err();

        assert!(err.to_string().contains("invalid bridge configuration"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = BridgeConfig::load(Path::new("does/not/exist.toml")).unwrap_err();

        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
