//! Configuration for Folio.
//!
//! Settings live in `~/.folio/config.toml`. Every section is optional; a missing
//! file means defaults everywhere.
//!
//! ```toml
//! [app]
//! theme = "dark"
//! reduced_motion = false
//!
//! [relay]
//! form_id = "${FOLIO_FORM_ID}"
//!
//! [contact]
//! fallback_email = "me@example.com"
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use folio_types::ui::{ThemeMode, UiOptions};

/// Default Formspree host. The form id is appended as `/f/{form_id}`.
pub const DEFAULT_RELAY_BASE_URL: &str = "https://formspree.io";
pub const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "New portfolio message from {name}";
/// Consulted when `[relay] form_id` is absent or expands to nothing.
pub const FORM_ID_ENV_VAR: &str = "FOLIO_FORM_ID";

#[derive(Debug, Default, Deserialize)]
pub struct FolioConfig {
    pub app: Option<AppConfig>,
    pub relay: Option<RelayConfig>,
    pub contact: Option<ContactConfig>,
    pub content: Option<ContentConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to write config at {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Persist { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// "dark" (default) or "light".
    pub theme: Option<String>,
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable reveal animations and smooth scrolling.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Form-relay endpoint.
///
/// ```toml
/// [relay]
/// form_id = "xyzabcd"
/// base_url = "https://formspree.io"
/// timeout_seconds = 15
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RelayConfig {
    pub form_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    /// Address quoted in the error banner so visitors can write directly.
    pub fallback_email: Option<String>,
    /// Subject line template; `{name}` is replaced with the sender's name.
    pub subject: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentConfig {
    /// Portfolio content file replacing the bundled profile.
    pub path: Option<String>,
}

/// Relay settings after env expansion and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub form_id: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            form_id: None,
            base_url: DEFAULT_RELAY_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_RELAY_TIMEOUT_SECS),
        }
    }
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl FolioConfig {
    /// Load `~/.folio/config.toml`. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let Some(app) = self.app.as_ref() else {
            return UiOptions::default();
        };
        let theme = match app.theme.as_deref() {
            None => ThemeMode::default(),
            Some(raw) => ThemeMode::parse(raw).unwrap_or_else(|| {
                tracing::warn!("Unknown theme in config: {}", raw);
                ThemeMode::default()
            }),
        };
        UiOptions {
            theme,
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
        }
    }

    #[must_use]
    pub fn relay_settings(&self) -> RelaySettings {
        let relay = self.relay.as_ref();
        let form_id = relay
            .and_then(|r| r.form_id.as_deref())
            .map(expand_env_vars)
            .and_then(non_empty)
            .or_else(|| env::var(FORM_ID_ENV_VAR).ok().and_then(non_empty));
        let base_url = relay
            .and_then(|r| r.base_url.as_deref())
            .map(expand_env_vars)
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_RELAY_BASE_URL.to_string());
        let timeout_secs = relay
            .and_then(|r| r.timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_RELAY_TIMEOUT_SECS);

        RelaySettings {
            form_id,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    #[must_use]
    pub fn subject_template(&self) -> String {
        self.contact
            .as_ref()
            .and_then(|c| c.subject.clone())
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_SUBJECT_TEMPLATE.to_string())
    }

    #[must_use]
    pub fn fallback_email(&self) -> Option<String> {
        self.contact
            .as_ref()
            .and_then(|c| c.fallback_email.as_deref())
            .map(expand_env_vars)
            .and_then(non_empty)
    }

    /// Content override path with `~/` expanded against the home directory.
    #[must_use]
    pub fn content_path(&self) -> Option<PathBuf> {
        let raw = self
            .content
            .as_ref()
            .and_then(|c| c.path.as_deref())
            .map(expand_env_vars)
            .and_then(non_empty)?;
        if let Some(rest) = raw.strip_prefix("~/") {
            return dirs::home_dir().map(|home| home.join(rest));
        }
        Some(PathBuf::from(raw))
    }
}

/// Write `[app] theme` into the TOML file at `path`, creating it if needed.
pub fn persist_theme_at(path: &Path, theme: ThemeMode) -> Result<(), ConfigError> {
    let persist_err = |source: io::Error| ConfigError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(persist_err)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path).map_err(persist_err)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| persist_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    if !doc.contains_key("app") {
        doc["app"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["app"]["theme"] = toml_edit::value(theme.as_str());

    atomic_write(path, doc.to_string().as_bytes()).map_err(persist_err)?;
    tracing::debug!(path = %path.display(), theme = theme.as_str(), "Persisted theme");
    Ok(())
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// `~/.folio`, home of the config file and logs.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".folio"))
}
