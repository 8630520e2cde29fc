use crate::error::{MailmoodError, Result};
use crate::types::tone_data::ToneLabel;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `tracing` filter used when neither `-v` nor `RUST_LOG` is given.
    pub log_filter: String,
    pub pretty_json: bool,
    pub default_target_tone: ToneLabel,
    /// Extra lexicon entries. Relative paths resolve against the config file.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: "warn".to_string(),
            pretty_json: true,
            default_target_tone: ToneLabel::CalmProfessional,
            lexicon_path: None,
        }
    }
}

pub fn parse_config(contents: &str, file_path: &Path) -> Result<Config> {
    let mut config: Config = toml::from_str(contents).map_err(|e| MailmoodError::ConfigParse {
        path: file_path.to_path_buf(),
        source: e,
    })?;

    if let Some(lexicon_path) = config.lexicon_path.take() {
        let resolved = if lexicon_path.is_relative() {
            file_path
                .parent()
                .map_or_else(|| lexicon_path.clone(), |dir| dir.join(&lexicon_path))
        } else {
            lexicon_path
        };
        config.lexicon_path = Some(resolved);
    }
    Ok(config)
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(file_path).map_err(|e| MailmoodError::Io {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    parse_config(&contents, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = parse_config("pretty_json = false\n", Path::new("mailmood.toml")).unwrap();
        assert!(!config.pretty_json);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.default_target_tone, ToneLabel::CalmProfessional);
        assert_eq!(config.lexicon_path, None);
    }

    #[test]
    fn lexicon_path_resolves_next_to_config() {
        let config = parse_config(
            "lexicon_path = \"extra.toml\"\ndefault_target_tone = \"warm_positive\"\n",
            Path::new("/etc/mailmood/mailmood.toml"),
        )
        .unwrap();
        assert_eq!(config.lexicon_path, Some(PathBuf::from("/etc/mailmood/extra.toml")));
        assert_eq!(config.default_target_tone, ToneLabel::WarmPositive);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("colour = \"red\"\n", Path::new("mailmood.toml")).unwrap_err();
        assert!(matches!(err, MailmoodError::ConfigParse { .. }));
    }
}
