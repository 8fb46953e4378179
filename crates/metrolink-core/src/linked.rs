//! Linked package discovery from dependency fields.
//!
//! Scans the root manifest's dependency-like fields for entries whose
//! version string carries a path-link protocol (`link:` or `file:`) and
//! resolves each one to a package on disk.

use crate::error::Error;
use crate::manifest::{self, DependencyMap};
use crate::paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Version prefixes that mean "install from a local path".
pub const LINK_PROTOCOLS: [&str; 2] = ["link:", "file:"];

/// A locally linked package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedPackage {
    /// Package name (dependency-field key, or manifest name for workspace
    /// members).
    pub name: String,
    /// Absolute path to the package root.
    pub path: PathBuf,
}

fn link_protocol_path(version: &str) -> Option<&str> {
    LINK_PROTOCOLS
        .iter()
        .find_map(|protocol| version.strip_prefix(protocol))
}

/// Scan one dependency mapping, appending qualifying entries not seen yet.
fn extract_linked(
    deps: &DependencyMap,
    project_root: &Path,
    linked: &mut Vec<LinkedPackage>,
    seen: &mut HashSet<String>,
) {
    for (name, version) in deps {
        let Some(version) = version.as_str() else {
            continue;
        };
        let Some(relative) = link_protocol_path(version) else {
            continue;
        };
        if seen.contains(name) {
            continue;
        }

        let absolute = project_root.join(relative);
        // pnpm global links sit behind a symlink chain; resolve to the real
        // path when the target exists, keep the literal path when it doesn't
        // so callers can still see the package.
        let path = dunce::canonicalize(&absolute).unwrap_or(absolute);

        seen.insert(name.clone());
        linked.push(LinkedPackage {
            name: name.clone(),
            path,
        });
    }
}

/// List packages referenced via a path-link protocol from the root manifest.
///
/// Fields are scanned in a fixed order (dependencies, devDependencies,
/// optionalDependencies, pnpm.overrides, overrides, resolutions, then any
/// pnpm-workspace.yaml overrides) and the first occurrence of a name wins.
/// A missing root manifest yields an empty list.
pub fn list_linked_packages(project_root: &Path) -> Result<Vec<LinkedPackage>, Error> {
    let project_root = &paths::absolute(project_root)?;
    let Some(pkg) = manifest::read_package_json(project_root)? else {
        return Ok(Vec::new());
    };

    let mut linked = Vec::new();
    let mut seen = HashSet::new();

    extract_linked(&pkg.dependencies, project_root, &mut linked, &mut seen);
    extract_linked(&pkg.dev_dependencies, project_root, &mut linked, &mut seen);
    extract_linked(
        &pkg.optional_dependencies,
        project_root,
        &mut linked,
        &mut seen,
    );

    if let Some(pnpm) = &pkg.pnpm {
        extract_linked(&pnpm.overrides, project_root, &mut linked, &mut seen);
    }
    extract_linked(&pkg.overrides, project_root, &mut linked, &mut seen);
    extract_linked(&pkg.resolutions, project_root, &mut linked, &mut seen);

    if let Some(workspace) = manifest::read_pnpm_workspace(project_root)? {
        extract_linked(&workspace.overrides, project_root, &mut linked, &mut seen);
    }

    Ok(linked)
}
