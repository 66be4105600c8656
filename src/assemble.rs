use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::components::placeholder_token;
use crate::config::Config;
use crate::report::SizeReport;

/// Template text after every component has been substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub text: String,
    /// Configured paths that were absent, in mapping order.
    pub missing: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub merged: Merged,
    pub output_path: PathBuf,
    pub report: Option<SizeReport>,
}

/// Outcome of reading one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    Found(String),
    Missing(String),
}

impl Loaded {
    pub fn into_text(self) -> String {
        match self {
            Loaded::Found(text) | Loaded::Missing(text) => text,
        }
    }
}

pub fn sentinel(path: &Path) -> String {
    format!("<!-- Component {} not found -->", path.display())
}

/// Reads `path` under the project root. A missing file degrades to a
/// sentinel comment; every other I/O failure is returned.
pub fn load(config: &Config, path: &Path) -> Result<Loaded> {
    let full = config.resolve(path);
    match fs::read_to_string(&full) {
        Ok(text) => Ok(Loaded::Found(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            println!("Warning: Component file {} not found", path.display());
            Ok(Loaded::Missing(sentinel(path)))
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", full.display())),
    }
}

pub fn substitute(template: &str, placeholder: &str, fragment: &str) -> String {
    template.replace(&placeholder_token(placeholder), fragment)
}

pub fn merge(config: &Config) -> Result<Merged> {
    let mut missing = Vec::new();
    let mut text = match load(config, &config.template)? {
        Loaded::Found(text) => text,
        Loaded::Missing(text) => {
            missing.push(config.template.clone());
            text
        }
    };

    for component in &config.components {
        let fragment = load(config, &component.path)?;
        if matches!(fragment, Loaded::Missing(_)) {
            missing.push(component.path.clone());
        }
        text = substitute(&text, &component.placeholder, &fragment.into_text());
    }

    Ok(Merged { text, missing })
}

/// Merges, writes the output, then prints the comparison report. The output
/// is already on disk when the report step fails.
pub fn assemble(config: &Config) -> Result<Assembly> {
    let merged = merge(config)?;

    let output_path = config.resolve(&config.output);
    fs::write(&output_path, &merged.text)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    println!("✅ {} assembled successfully!", config.output.display());

    let report = if config.report {
        let report = SizeReport::compare(&config.resolve(&config.backup), &merged.text)?;
        println!("{report}");
        Some(report)
    } else {
        None
    };

    Ok(Assembly {
        merged,
        output_path,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;

    fn config_in(root: &Path, components: Vec<Component>) -> Config {
        Config {
            root: root.to_path_buf(),
            components,
            report: false,
            ..Config::default()
        }
    }

    #[test]
    fn substitute_replaces_every_occurrence() {
        let out = substitute("{{ A }}|{{ A }}|{{ B }}|{{A}}", "A", "x");
        assert_eq!(out, "x|x|{{ B }}|{{A}}");
    }

    #[test]
    fn substitute_inserts_fragment_verbatim() {
        let fragment = "<p>$1 \\n {{ NOT_EXPANDED }}</p>\r\n";
        let out = substitute("<div>{{ HEADER }}</div>", "HEADER", fragment);
        assert_eq!(out, format!("<div>{fragment}</div>"));
    }

    #[test]
    fn load_returns_sentinel_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Vec::new());
        let loaded = load(&config, Path::new("components/sidebar.html")).unwrap();
        assert_eq!(
            loaded,
            Loaded::Missing("<!-- Component components/sidebar.html not found -->".into())
        );
    }

    #[test]
    fn load_propagates_non_missing_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("components")).unwrap();
        let config = config_in(dir.path(), Vec::new());
        let err = load(&config, Path::new("components")).expect_err("directory is not a file");
        assert!(err.to_string().contains("components"));
    }

    #[test]
    fn merge_applies_components_in_mapping_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index-template.html"), "{{ FIRST }} {{ SECOND }}").unwrap();
        // FIRST's fragment introduces SECOND's token, which a later entry then fills.
        fs::write(dir.path().join("first.html"), "[{{ SECOND }}]").unwrap();
        fs::write(dir.path().join("second.html"), "2").unwrap();
        let config = config_in(
            dir.path(),
            vec![
                Component::new("FIRST", "first.html"),
                Component::new("SECOND", "second.html"),
            ],
        );

        let merged = merge(&config).unwrap();
        assert_eq!(merged.text, "[2] 2");
        assert!(merged.missing.is_empty());
    }

    #[test]
    fn merge_records_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Vec::new());
        let merged = merge(&config).unwrap();
        assert_eq!(merged.text, "<!-- Component index-template.html not found -->");
        assert_eq!(merged.missing, vec![PathBuf::from("index-template.html")]);
    }
}
