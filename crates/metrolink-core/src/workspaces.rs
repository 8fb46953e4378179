//! Workspace member discovery.
//!
//! Expands workspace glob patterns into member package directories. Under
//! pnpm a non-empty `pnpm-workspace.yaml` pattern list wins; otherwise the
//! root manifest's `workspaces` field is used (both the bare-array and the
//! `{packages: [...]}` shapes).

use crate::detect::{detect_package_manager, PackageManager};
use crate::error::Error;
use crate::linked::LinkedPackage;
use crate::manifest;
use crate::paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Determine the workspace glob patterns for a project root.
fn workspace_patterns(project_root: &Path) -> Result<Vec<String>, Error> {
    if detect_package_manager(project_root) == PackageManager::Pnpm {
        if let Some(workspace) = manifest::read_pnpm_workspace(project_root)? {
            if !workspace.packages.is_empty() {
                return Ok(workspace.packages);
            }
        }
    }

    let Some(pkg) = manifest::read_package_json(project_root)? else {
        return Ok(Vec::new());
    };
    Ok(pkg
        .workspaces
        .map(|w| w.patterns().to_vec())
        .unwrap_or_default())
}

/// List workspace member packages for a project root.
///
/// A matched directory contributes a package only when it holds a manifest
/// that declares a name; directories without either are silently skipped.
/// Returns an empty list without touching the filesystem further when no
/// patterns are configured.
pub fn list_workspace_packages(project_root: &Path) -> Result<Vec<LinkedPackage>, Error> {
    let project_root = &paths::absolute(project_root)?;
    let patterns = workspace_patterns(project_root)?;
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let mut members = Vec::new();
    let mut seen = HashSet::new();

    for pattern in &patterns {
        let full_pattern = project_root.join(pattern);
        let entries = glob::glob(&full_pattern.to_string_lossy()).map_err(|source| {
            Error::WorkspacePattern {
                pattern: pattern.clone(),
                source,
            }
        })?;

        for dir in entries.flatten() {
            if !dir.is_dir() {
                continue;
            }
            // Drop any trailing separator left by the pattern.
            let dir: PathBuf = dir.components().collect();

            let Some(member) = manifest::read_package_json(&dir)? else {
                continue;
            };
            let Some(name) = member.name else {
                continue;
            };
            if seen.insert(name.clone()) {
                members.push(LinkedPackage { name, path: dir });
            }
        }
    }

    Ok(members)
}
