use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub fonts:   Option<FontConfig>,
    pub output:  Option<OutputConfig>,
    /// Name of a built-in palette; overridden by `--palette`.
    pub palette: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold:    Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            Ok(AppConfig::default())
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marchbot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let cfg: AppConfig = toml::from_str(
            r#"
            palette = "midnight"

            [fonts]
            regular = "/tmp/Sans.ttf"
            bold    = "/tmp/Sans-Bold.ttf"

            [output]
            dir = "/tmp/out"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.palette.as_deref(), Some("midnight"));
        assert_eq!(
            cfg.fonts.unwrap().bold.unwrap(),
            PathBuf::from("/tmp/Sans-Bold.ttf")
        );
        assert_eq!(cfg.output.unwrap().dir.unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.fonts.is_none());
        assert!(cfg.output.is_none());
        assert!(cfg.palette.is_none());
    }
}
