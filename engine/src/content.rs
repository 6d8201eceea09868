//! Portfolio content: the bundled profile and user overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const BUNDLED_PORTFOLIO: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/portfolio.toml"));

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("bundled portfolio is malformed: {0}")]
    Bundled(#[source] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub works: Works,
    #[serde(default)]
    pub interests: Interests,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct About {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub number: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Works {
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Interests {
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub items: Vec<Interest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subtext: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub back_to_top: String,
}

impl Portfolio {
    /// The profile compiled into the binary.
    pub fn bundled() -> Result<Self, ContentError> {
        toml::from_str(BUNDLED_PORTFOLIO).map_err(ContentError::Bundled)
    }

    pub fn load_from(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the override when given, falling back to the bundled profile if it
    /// cannot be read or parsed.
    pub fn load(override_path: Option<&Path>) -> Result<Self, ContentError> {
        if let Some(path) = override_path {
            match Self::load_from(path) {
                Ok(portfolio) => {
                    tracing::info!("Loaded portfolio content from {}", path.display());
                    return Ok(portfolio);
                }
                Err(err) => {
                    tracing::warn!("{err}; using bundled portfolio");
                }
            }
        }
        Self::bundled()
    }

    /// Footer copyright with `{year}` filled in.
    #[must_use]
    pub fn copyright(&self, year: i32) -> String {
        self.footer.copyright.replace("{year}", &year.to_string())
    }

    /// Address shown in the submission apology.
    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        let email = self.contact.email.trim();
        (!email.is_empty()).then_some(email)
    }
}

/// Calendar year used for the footer.
#[must_use]
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn bundled_profile_parses() {
        let portfolio = Portfolio::bundled().unwrap();
        assert_eq!(portfolio.profile.name, "Md Mahabub Rana Saikat");
        assert_eq!(portfolio.profile.roles.len(), 3);
        assert_eq!(portfolio.services.len(), 4);
        assert_eq!(portfolio.education.len(), 3);
        assert_eq!(portfolio.works.projects.len(), 5);
        assert_eq!(portfolio.interests.items.len(), 6);
        assert_eq!(portfolio.contact_email(), Some("mahabubranasaikat@gmail.com"));
    }

    #[test]
    fn copyright_fills_year() {
        let portfolio = Portfolio::bundled().unwrap();
        let text = portfolio.copyright(2031);
        assert!(text.starts_with("© 2031 "));
        assert!(!text.contains("{year}"));
    }

    #[test]
    fn minimal_profile_defaults_missing_sections() {
        let portfolio: Portfolio = toml::from_str("[profile]\nname = \"Grace\"\n").unwrap();
        assert_eq!(portfolio.profile.name, "Grace");
        assert!(portfolio.services.is_empty());
        assert!(portfolio.works.projects.is_empty());
        assert_eq!(portfolio.contact_email(), None);
    }

    #[test]
    fn override_path_is_used_when_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profile]\nname = \"Grace Hopper\"\nroles = [\"Admiral\"]").unwrap();

        let portfolio = Portfolio::load(Some(file.path())).unwrap();
        assert_eq!(portfolio.profile.name, "Grace Hopper");
    }

    #[test]
    fn broken_override_falls_back_to_bundled() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profile\nname = ").unwrap();

        assert!(matches!(
            Portfolio::load_from(file.path()),
            Err(ContentError::Parse { .. })
        ));
        let portfolio = Portfolio::load(Some(file.path())).unwrap();
        assert_eq!(portfolio, Portfolio::bundled().unwrap());
    }

    #[test]
    fn missing_override_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Portfolio::load_from(&missing),
            Err(ContentError::Read { .. })
        ));
        assert!(Portfolio::load(Some(&missing)).is_ok());
    }
}
