//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tutorforge_core::tutor::TutorConfig;

/// Top-level tutorforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding ledgers, reports, and the roster.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Default question bank path.
    #[serde(default = "default_questions")]
    pub questions: PathBuf,
    /// Default number of questions per demo session.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Adjustment thresholds, inlined at the top level of the file.
    #[serde(flatten)]
    pub tutor: TutorConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./tutor-data")
}
fn default_questions() -> PathBuf {
    PathBuf::from("questions.csv")
}
fn default_question_count() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            questions: default_questions(),
            question_count: default_question_count(),
            tutor: TutorConfig::default(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `tutorforge.toml` in the current directory
/// 2. `~/.config/tutorforge/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tutorforge.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(AppConfig::default()),
    }
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tutorforge"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.question_count, 5);
        assert_eq!(config.tutor.mastery_streak, 3);
        assert_eq!(config.tutor.demotion_streak, 2);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
data_dir = "/tmp/tutor"
mastery_streak = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tutor"));
        assert_eq!(config.tutor.mastery_streak, 4);
        // Everything unset falls back to the defaults.
        assert_eq!(config.question_count, 5);
        assert_eq!(config.tutor.demotion_streak, 2);
        assert!((config.tutor.weak_area_accuracy - 0.6).abs() < 1e-9);
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
