//! Site configuration, read from an optional JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use slider::SliderOptions;

use crate::error::SiteError;

/// One portfolio project. Its page carries a gallery slider with one stop
/// per image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    #[serde(default = "default_images")]
    pub images: usize,
}

fn default_images() -> usize {
    6
}

impl Project {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, images: usize) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            images,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub projects: Vec<Project>,
    /// Options for every slider on the site.
    pub slider: SliderOptions,
    /// Complete smooth scrolls instantly.
    pub reduced_motion: bool,
    /// Whether the host reports the end of a scroll; without it sliders
    /// settle on their timeout.
    pub scrollend: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Studio".into(),
            projects: vec![
                Project::new("harbor-house", "Harbor House", 7),
                Project::new("quarry-pavilion", "Quarry Pavilion", 5),
                Project::new("north-library", "North Library", 4),
            ],
            slider: SliderOptions::default(),
            reduced_motion: false,
            scrollend: true,
            log_file: None,
        }
    }
}

impl SiteConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SiteError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&raw).map_err(|source| SiteError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use slider::ScrollMapping;

    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = SiteConfig::parse(
            r#"{
                "title": "Atelier",
                "projects": [{ "slug": "loft", "title": "Loft" }],
                "slider": { "mapping": { "kind": "item_width", "width": 400 } },
                "scrollend": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.title, "Atelier");
        assert_eq!(config.projects, vec![Project::new("loft", "Loft", 6)]);
        assert_eq!(config.slider.mapping, ScrollMapping::ItemWidth { width: 400.0 });
        assert!(config.slider.keyboard);
        assert!(!config.scrollend);
        assert!(!config.reduced_motion);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("studio-site-test-missing/site.json");
        assert_eq!(SiteConfig::load(&path).unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("studio-site-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("site.json");
        fs::write(&path, "{ \"title\": 4 ").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, SiteError::Config { .. }));
        assert!(err.to_string().contains("site.json"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_project_lookup() {
        let config = SiteConfig::default();
        assert_eq!(config.project("north-library").map(|p| p.images), Some(4));
        assert!(config.project("nowhere").is_none());
    }
}
