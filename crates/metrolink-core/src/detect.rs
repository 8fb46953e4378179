//! Package manager detection from lockfile presence.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// pnpm lockfile name, probed first.
pub const PNPM_LOCKFILE: &str = "pnpm-lock.yaml";

/// yarn lockfile name, probed second.
pub const YARN_LOCKFILE: &str = "yarn.lock";

/// The package manager in use at a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManager {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the package manager for a project root.
///
/// Fixed priority: a pnpm lockfile wins over a yarn lockfile even when both
/// exist; no lockfile at all means npm. Recomputed per call from the current
/// filesystem state, never cached.
#[must_use]
pub fn detect_package_manager(project_root: &Path) -> PackageManager {
    if project_root.join(PNPM_LOCKFILE).exists() {
        return PackageManager::Pnpm;
    }
    if project_root.join(YARN_LOCKFILE).exists() {
        return PackageManager::Yarn;
    }
    PackageManager::Npm
}
