use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::domain::matcher::{MatchOptions, MAX_BITAP_WIDTH};
use crate::domain::offset::ListLayout;
use crate::domain::palette::ActivePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    pub active_policy: ActivePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutsConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub matcher: MatchOptions,
    pub palette: PaletteConfig,
    pub layout: ListLayout,
    pub shortcuts: ShortcutsConfig,
    pub logging: LoggingConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            matcher: MatchOptions::default(),
            palette: PaletteConfig {
                active_policy: ActivePolicy::default(),
            },
            layout: ListLayout::default(),
            shortcuts: ShortcutsConfig {
                path: config_dir().join("shortcuts.json"),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file: {}", path.display()))?;
        self.merge_toml_text(&content)
            .with_context(|| format!("failed parsing config TOML: {}", path.display()))
    }

    fn merge_toml_text(&mut self, content: &str) -> Result<()> {
        let mut section = String::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(anyhow!("line {}: invalid section syntax", idx + 1));
                }
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value_raw) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("line {}: expected key=value", idx + 1))?;
            let key = key.trim();
            let value = parse_value(value_raw.trim())
                .with_context(|| format!("line {}: invalid value", idx + 1))?;

            self.apply_file_value(&section, key, value)
                .with_context(|| format!("line {}: invalid {section}.{key}", idx + 1))?;
        }

        Ok(())
    }

    fn apply_file_value(&mut self, section: &str, key: &str, value: TomlValue) -> Result<()> {
        match (section, key) {
            ("matcher", "threshold") => {
                self.matcher.threshold = value.as_f64()?;
            }
            ("matcher", "location") => {
                self.matcher.location = value.as_usize()?;
            }
            ("matcher", "distance") => {
                self.matcher.distance = value.as_usize()?;
            }
            ("matcher", "max_pattern_length") => {
                self.matcher.max_pattern_length = value.as_usize()?;
            }
            ("matcher", "min_match_char_length") => {
                self.matcher.min_match_char_length = value.as_usize()?;
            }
            ("palette", "active_policy") => {
                self.palette.active_policy = ActivePolicy::parse(value.as_str()?)?;
            }
            ("layout", "row_height") => {
                self.layout.row_height = value.as_i32()?;
            }
            ("layout", "trailing_margin") => {
                self.layout.trailing_margin = value.as_i32()?;
            }
            ("layout", "visible_rows") => {
                self.layout.visible_rows = value.as_usize()?;
            }
            ("shortcuts", "path") => {
                self.shortcuts.path = PathBuf::from(value.into_string()?);
            }
            ("logging", "file") => {
                self.logging.file = non_empty(value.into_string()?).map(PathBuf::from);
            }
            _ => {}
        }

        Ok(())
    }

    fn merge_env(&mut self) -> Result<()> {
        if let Ok(threshold) = env::var("CMDPAL_MATCH_THRESHOLD") {
            self.matcher.threshold = threshold
                .trim()
                .parse::<f64>()
                .with_context(|| "invalid CMDPAL_MATCH_THRESHOLD".to_string())?;
        }
        if let Ok(distance) = env::var("CMDPAL_MATCH_DISTANCE") {
            self.matcher.distance = distance
                .trim()
                .parse::<usize>()
                .with_context(|| "invalid CMDPAL_MATCH_DISTANCE".to_string())?;
        }
        if let Ok(length) = env::var("CMDPAL_MAX_PATTERN_LENGTH") {
            self.matcher.max_pattern_length = length
                .trim()
                .parse::<usize>()
                .with_context(|| "invalid CMDPAL_MAX_PATTERN_LENGTH".to_string())?;
        }
        if let Ok(policy) = env::var("CMDPAL_ACTIVE_POLICY") {
            self.palette.active_policy = ActivePolicy::parse(&policy)
                .with_context(|| "invalid CMDPAL_ACTIVE_POLICY".to_string())?;
        }
        if let Ok(path) = env::var("CMDPAL_SHORTCUTS_PATH") {
            if let Some(path) = non_empty(path) {
                self.shortcuts.path = PathBuf::from(path);
            }
        }
        if let Ok(file) = env::var("CMDPAL_LOG_FILE") {
            self.logging.file = non_empty(file).map(PathBuf::from);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matcher.threshold) {
            return Err(anyhow!(
                "matcher.threshold must be between 0 and 1 (got {})",
                self.matcher.threshold
            ));
        }
        if self.matcher.max_pattern_length == 0 || self.matcher.max_pattern_length > MAX_BITAP_WIDTH
        {
            return Err(anyhow!(
                "matcher.max_pattern_length must be between 1 and {MAX_BITAP_WIDTH} (got {})",
                self.matcher.max_pattern_length
            ));
        }
        if self.layout.visible_rows == 0 {
            return Err(anyhow!("layout.visible_rows must be at least 1"));
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config/cmdpal")
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[derive(Debug, Clone)]
enum TomlValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl TomlValue {
    fn as_str(&self) -> Result<&str> {
        match self {
            Self::String(value) => Ok(value.as_str()),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn into_string(self) -> Result<String> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(anyhow!("expected string value")),
        }
    }

    fn as_f64(&self) -> Result<f64> {
        match self {
            Self::Float(value) => Ok(*value),
            Self::Integer(value) => Ok(*value as f64),
            Self::String(_) => Err(anyhow!("expected numeric value")),
        }
    }

    fn as_i64(&self) -> Result<i64> {
        match self {
            Self::Integer(value) => Ok(*value),
            _ => Err(anyhow!("expected integer value")),
        }
    }

    fn as_i32(&self) -> Result<i32> {
        let value = self.as_i64()?;
        i32::try_from(value).map_err(|_| anyhow!("integer value is out of range for i32"))
    }

    fn as_usize(&self) -> Result<usize> {
        let value = self.as_i64()?;
        usize::try_from(value).map_err(|_| anyhow!("integer value must not be negative"))
    }
}

fn parse_value(value: &str) -> Result<TomlValue> {
    let trimmed = value.trim();
    if trimmed.starts_with('"') {
        if !trimmed.ends_with('"') || trimmed.len() < 2 {
            return Err(anyhow!("unterminated string"));
        }
        return Ok(TomlValue::String(trimmed[1..trimmed.len() - 1].to_string()));
    }

    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(TomlValue::Integer(number));
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return Ok(TomlValue::Float(number));
    }

    Ok(TomlValue::String(trimmed.to_string()))
}
