use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "index-template.html";
pub const DEFAULT_OUTPUT: &str = "index.html";
pub const DEFAULT_BACKUP: &str = "index-backup.html";

const DEFAULT_COMPONENTS: [(&str, &str); 9] = [
    ("LOGIN_SCREEN_COMPONENT", "components/login-screen.html"),
    ("SIDEBAR_COMPONENT", "components/sidebar.html"),
    ("HEADER_COMPONENT", "components/header.html"),
    ("ANALYTICS_COMPONENT", "components/analytics-dashboard.html"),
    ("REVISION_COMPONENT", "components/revision-view.html"),
    ("SEARCH_RESULTS_COMPONENT", "components/search-results.html"),
    ("MAIN_MENU_COMPONENT", "components/main-menu-cards.html"),
    ("SECTION_CARDS_COMPONENT", "components/section-cards.html"),
    ("TOPIC_DETAILS_COMPONENT", "components/topic-details.html"),
];

/// A placeholder name bound to the fragment file that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Component {
    pub placeholder: String,
    pub path: PathBuf,
}

impl Component {
    pub fn new(placeholder: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            placeholder: placeholder.into(),
            path: path.into(),
        }
    }
}

/// The literal `{{ NAME }}` token a placeholder name stands for.
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{ {name} }}}}")
}

pub fn default_components() -> Vec<Component> {
    DEFAULT_COMPONENTS
        .iter()
        .map(|(placeholder, path)| Component::new(*placeholder, *path))
        .collect()
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid placeholder name {0:?} (expected uppercase letters, digits and underscores)")]
    InvalidPlaceholder(String),
    #[error("placeholder {0} is mapped more than once")]
    DuplicatePlaceholder(String),
    #[error("manifest declares an empty component list")]
    EmptyComponents,
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Optional TOML overrides for paths and the component mapping.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub backup: Option<PathBuf>,
    #[serde(default, rename = "component")]
    pub components: Option<Vec<Component>>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(raw)?;
        if let Some(components) = &manifest.components {
            validate_components(components)?;
        }
        Ok(manifest)
    }
}

pub fn validate_components(components: &[Component]) -> Result<(), ManifestError> {
    if components.is_empty() {
        return Err(ManifestError::EmptyComponents);
    }
    let mut seen = HashSet::new();
    for component in components {
        if !is_valid_placeholder(&component.placeholder) {
            return Err(ManifestError::InvalidPlaceholder(
                component.placeholder.clone(),
            ));
        }
        if !seen.insert(component.placeholder.as_str()) {
            return Err(ManifestError::DuplicatePlaceholder(
                component.placeholder.clone(),
            ));
        }
    }
    Ok(())
}

fn is_valid_placeholder(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
