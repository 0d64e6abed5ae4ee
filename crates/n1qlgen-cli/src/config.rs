use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_dir: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    /// Load `config_path`; a missing file yields the defaults.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config_dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let raw = match std::fs::read_to_string(config_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    config_dir,
                    file: ConfigFile::default(),
                });
            }
            Err(e) => {
                anyhow::bail!(
                    "failed to read config file {}: {e}",
                    config_path.display()
                )
            }
        };

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to load config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self { config_dir, file })
    }

    pub fn resolve_path(&self, p: impl AsRef<Path>) -> PathBuf {
        let p = p.as_ref();
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.config_dir.join(p)
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.resolve_path(&self.file.history.file)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.resolve_path(&self.file.templates.file)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub render: RenderConfig,
    pub history: HistoryConfig,
    pub templates: TemplatesConfig,
    pub log: LogConfig,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.history.max_entries == 0 {
            anyhow::bail!("history.max_entries must be at least 1");
        }
        if self.history.file.trim().is_empty() {
            anyhow::bail!("history.file must not be empty");
        }
        if self.templates.file.trim().is_empty() {
            anyhow::bail!("templates.file must not be empty");
        }
        if self.log.level.trim().is_empty() {
            anyhow::bail!("log.level must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub formatted: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { formatted: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub file: String,
    pub max_entries: usize,
    pub record: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: ".n1qlgen/history.json".to_string(),
            max_entries: n1qlgen::history::DEFAULT_CAPACITY,
            record: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub file: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            file: ".n1qlgen/templates.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
