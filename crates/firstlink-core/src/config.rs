//! Project and user configuration.
//!
//! Resolution order (first hit wins, no merging):
//!
//! 1. An explicit path (`--config`).
//! 2. `firstlink.toml` in the project directory.
//! 3. `<config_dir>/firstlink/config.toml` for the current user.
//! 4. Built-in defaults.
//!
//! Every field is optional in the file; missing fields take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "firstlink.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstLinkConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Knobs for the multi-component layout driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Multiplier applied to a component's radius to get the distance to the
    /// next component's center.
    #[serde(default = "default_orbit_factor")]
    pub orbit_factor: f64,
    /// Seed for the orbit-angle random source.
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
    /// Lower bound on the measured component radius. A component made of a
    /// single node has radius 0 and would otherwise not move the center.
    #[serde(default = "default_min_orbit_radius")]
    pub min_orbit_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orbit_factor: default_orbit_factor(),
            rng_seed: default_rng_seed(),
            min_orbit_radius: default_min_orbit_radius(),
        }
    }
}

/// Column names used when reading delimited network and seed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_source_column")]
    pub source_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// Optional column holding the source node's resource link. Absent
    /// columns are tolerated.
    #[serde(default = "default_link_column")]
    pub link_column: String,
    #[serde(default = "default_seed_column")]
    pub seed_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source_column: default_source_column(),
            target_column: default_target_column(),
            link_column: default_link_column(),
            seed_column: default_seed_column(),
        }
    }
}

/// Marker shape hint handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Diamond,
    Square,
    Triangle,
}

impl Shape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }
}

/// Presentation hints for seed and non-seed nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_seed_color")]
    pub seed_color: String,
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_seed_shape")]
    pub seed_shape: Shape,
    #[serde(default = "default_shape")]
    pub default_shape: Shape,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            seed_color: default_seed_color(),
            default_color: default_color(),
            seed_shape: default_seed_shape(),
            default_shape: default_shape(),
        }
    }
}

/// Parse a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`FirstLinkConfig`].
pub fn load_config_file(path: &Path) -> Result<FirstLinkConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<FirstLinkConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Location of the per-user configuration file, if the platform has one.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("firstlink/config.toml"))
}

/// Resolve the effective configuration.
///
/// # Errors
///
/// Returns an error if the selected file exists but cannot be parsed, or if
/// an explicit path does not exist.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<FirstLinkConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicit config");
        return load_config_file(path);
    }

    let candidates = std::iter::once(project_root.join(PROJECT_CONFIG_FILE)).chain(user_config_path());
    for path in candidates {
        if path.exists() {
            debug!(path = %path.display(), "using discovered config");
            return load_config_file(&path);
        }
    }

    Ok(FirstLinkConfig::default())
}

const fn default_orbit_factor() -> f64 {
    1.5
}

const fn default_rng_seed() -> u64 {
    1
}

const fn default_min_orbit_radius() -> f64 {
    1.0
}

fn default_source_column() -> String {
    "First Node".to_string()
}

fn default_target_column() -> String {
    "Second Node".to_string()
}

fn default_link_column() -> String {
    "First Link".to_string()
}

fn default_seed_column() -> String {
    "Britannica".to_string()
}

fn default_seed_color() -> String {
    "green".to_string()
}

fn default_color() -> String {
    "#ffa950".to_string()
}

const fn default_seed_shape() -> Shape {
    Shape::Diamond
}

const fn default_shape() -> Shape {
    Shape::Circle
}
