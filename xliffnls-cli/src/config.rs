//! Project layout resolution: TOML file first, command-line flags on top.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use xliffnls::{Locale, ProjectLayout};

/// Layout overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LayoutOverrides {
    pub root: Option<PathBuf>,
    pub localization_dir: Option<PathBuf>,
    pub constants_dir: Option<PathBuf>,
}

/// Loads the layout from `config` (if any) and applies `overrides`.
pub fn load_layout(config: Option<&Path>, overrides: LayoutOverrides) -> Result<ProjectLayout> {
    let mut layout = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<ProjectLayout>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProjectLayout::default(),
    };
    if let Some(root) = overrides.root {
        layout = layout.with_root(root);
    }
    if let Some(dir) = overrides.localization_dir {
        layout = layout.with_localization_dir(dir);
    }
    if let Some(dir) = overrides.constants_dir {
        layout = layout.with_constants_dir(dir);
    }
    Ok(layout)
}

/// Parses `--locale` values, accepting vendor codes (`ptb`) as well as public tags (`pt-BR`).
pub fn parse_locales(values: &[String]) -> Result<Vec<Locale>> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<Locale>()
                .or_else(|_| Locale::from_public_tag(value))
                .with_context(|| format!("invalid --locale value '{value}'"))
        })
        .collect()
}
