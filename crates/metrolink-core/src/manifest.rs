//! Read-only projections of package.json and pnpm-workspace.yaml.
//!
//! A missing file is a normal case (`Ok(None)`); a file that exists but
//! fails to parse is a fatal error.

use crate::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Root manifest file name.
pub const PACKAGE_JSON: &str = "package.json";

/// pnpm workspace file name.
pub const PNPM_WORKSPACE_YAML: &str = "pnpm-workspace.yaml";

/// Dependency-style mapping: package name to version-or-protocol value.
///
/// Values stay as raw JSON so nested shapes (npm's object-valued overrides)
/// parse without erroring; consumers only look at string values.
pub type DependencyMap = BTreeMap<String, serde_json::Value>;

/// Projection of the package.json fields this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: DependencyMap,
    #[serde(default)]
    pub dev_dependencies: DependencyMap,
    #[serde(default)]
    pub optional_dependencies: DependencyMap,
    #[serde(default)]
    pub peer_dependencies: DependencyMap,
    pub workspaces: Option<WorkspacesField>,
    pub pnpm: Option<PnpmSection>,
    #[serde(default)]
    pub overrides: DependencyMap,
    #[serde(default)]
    pub resolutions: DependencyMap,
}

/// The `workspaces` field: a bare pattern list, or yarn's object shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    Patterns(Vec<String>),
    Config {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    /// Glob patterns, regardless of shape.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::Patterns(patterns) | Self::Config { packages: patterns } => patterns,
        }
    }
}

/// The pnpm-specific section of package.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PnpmSection {
    #[serde(default)]
    pub overrides: DependencyMap,
}

/// Projection of pnpm-workspace.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PnpmWorkspace {
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub overrides: DependencyMap,
}

/// Read the package.json in `dir`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_package_json(dir: &Path) -> Result<Option<PackageJson>, Error> {
    let path = dir.join(PACKAGE_JSON);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let manifest =
        serde_json::from_str(&content).map_err(|source| Error::ManifestParse { path, source })?;

    Ok(Some(manifest))
}

/// Read the pnpm-workspace.yaml in `dir`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_pnpm_workspace(dir: &Path) -> Result<Option<PnpmWorkspace>, Error> {
    let path = dir.join(PNPM_WORKSPACE_YAML);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| Error::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let workspace =
        serde_yaml::from_str(&content).map_err(|source| Error::WorkspaceParse { path, source })?;

    Ok(Some(workspace))
}
