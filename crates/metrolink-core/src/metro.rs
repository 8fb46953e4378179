//! Metro resolver configuration synthesis.
//!
//! The top of the pipeline: discover linked packages (or accept an explicit
//! list), collect their peer dependencies, and produce the watch folders,
//! module overrides, and exclusion matcher to merge into a Metro config.

use crate::error::Error;
use crate::exclusion::ExclusionList;
use crate::linked::{list_linked_packages, LinkedPackage};
use crate::paths;
use crate::peers::collect_peer_dependencies;
use crate::symlinks::list_symlinks;
use crate::workspaces::list_workspace_packages;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// Modules directory name under a project root.
pub const NODE_MODULES: &str = "node_modules";

/// Discovery options for [`linked_packages_config`].
#[derive(Debug, Clone)]
pub struct LinkedPackagesOptions {
    /// Explicitly specify linked packages (skips auto-detection).
    pub linked_packages: Option<Vec<LinkedPackage>>,
    /// Additional peer dependencies to always include.
    pub additional_peer_dependencies: Vec<String>,
    /// Include workspace packages (default: true).
    pub include_workspaces: bool,
}

impl Default for LinkedPackagesOptions {
    fn default() -> Self {
        Self {
            linked_packages: None,
            additional_peer_dependencies: Vec::new(),
            include_workspaces: true,
        }
    }
}

impl LinkedPackagesOptions {
    /// Set an explicit package list, bypassing discovery.
    #[must_use]
    pub fn with_linked_packages(mut self, packages: Vec<LinkedPackage>) -> Self {
        self.linked_packages = Some(packages);
        self
    }

    /// Set extra peer dependency names.
    #[must_use]
    pub fn with_additional_peer_dependencies(mut self, names: Vec<String>) -> Self {
        self.additional_peer_dependencies = names;
        self
    }

    /// Enable or disable workspace member discovery.
    #[must_use]
    pub fn with_include_workspaces(mut self, include: bool) -> Self {
        self.include_workspaces = include;
        self
    }
}

/// The synthesized resolver configuration.
///
/// Shaped to be merged directly into a Metro config: `watch_folders` at the
/// top level, `extra_node_modules` and `block_list` under `resolver`.
#[derive(Debug, Clone)]
pub struct MetroResolverConfig {
    /// Directories the dev server watches for hot reload, one per linked
    /// package, in discovery order.
    pub watch_folders: Vec<PathBuf>,
    /// Module name to absolute resolution path. Covers every linked package
    /// and every collected peer dependency.
    pub extra_node_modules: BTreeMap<String, PathBuf>,
    /// Matcher blocking each linked package's own `node_modules` subtree.
    pub block_list: ExclusionList,
}

/// Run discovery: dependency-field scan, then workspace members, then the
/// symlink fallback when both came up empty. First producer wins per name.
fn discover_packages(
    project_root: &Path,
    options: &LinkedPackagesOptions,
) -> Result<Vec<LinkedPackage>, Error> {
    let mut packages = list_linked_packages(project_root)?;

    if options.include_workspaces {
        let mut seen: HashSet<String> = packages.iter().map(|p| p.name.clone()).collect();
        for member in list_workspace_packages(project_root)? {
            if seen.insert(member.name.clone()) {
                packages.push(member);
            }
        }
    }

    if packages.is_empty() {
        let modules_dir = project_root.join(NODE_MODULES);
        if modules_dir.is_dir() {
            for name in list_symlinks(&modules_dir, 1, None)? {
                let target = modules_dir.join(&name);
                let path = dunce::canonicalize(&target).unwrap_or(target);
                packages.push(LinkedPackage { name, path });
            }
        }
    }

    Ok(packages)
}

/// Produce the synthesized Metro resolver config for a project root.
///
/// With `options.linked_packages` set, discovery is skipped entirely; peer
/// dependencies are still collected from the explicit list's manifests.
pub fn linked_packages_config(
    project_root: &Path,
    options: &LinkedPackagesOptions,
) -> Result<MetroResolverConfig, Error> {
    let project_root = paths::absolute(project_root)?;

    let packages = match &options.linked_packages {
        Some(explicit) => explicit.clone(),
        None => discover_packages(&project_root, options)?,
    };

    let peers = collect_peer_dependencies(&packages, &options.additional_peer_dependencies)?;

    let modules_dir = project_root.join(NODE_MODULES);

    let watch_folders: Vec<PathBuf> = packages.iter().map(|pkg| pkg.path.clone()).collect();

    // One pattern per package: its own node_modules and everything under it,
    // with the path escaped so it is matched literally.
    let patterns = packages
        .iter()
        .map(|pkg| {
            let node_modules = pkg.path.join(NODE_MODULES);
            format!(
                "{}{}.*",
                regex_lite::escape(&node_modules.to_string_lossy()),
                regex_lite::escape(MAIN_SEPARATOR_STR),
            )
        })
        .collect();
    let block_list = ExclusionList::new(patterns)?;

    // Linked packages map to their real paths; Metro's own symlink
    // following can't be trusted across every package-manager layout.
    let mut extra_node_modules = BTreeMap::new();
    for pkg in &packages {
        extra_node_modules.insert(pkg.name.clone(), pkg.path.clone());
    }
    // Peer aliases point into the host project's modules directory. They
    // yield to package entries, so a linked package that is also somebody's
    // peer keeps its direct mapping.
    for name in &peers {
        extra_node_modules
            .entry(name.clone())
            .or_insert_with(|| modules_dir.join(name));
    }

    Ok(MetroResolverConfig {
        watch_folders,
        extra_node_modules,
        block_list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peers::DEFAULT_PEER_DEPENDENCY;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_packages_skip_discovery() {
        let dir = tempdir().unwrap();
        // A link: dependency that discovery would pick up.
        fs::create_dir(dir.path().join("detected")).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"detected": "link:./detected"}}"#,
        )
        .unwrap();

        let explicit = dir.path().join("explicit-pkg");
        fs::create_dir(&explicit).unwrap();
        let options = LinkedPackagesOptions::default().with_linked_packages(vec![LinkedPackage {
            name: "my-pkg".to_string(),
            path: explicit.clone(),
        }]);

        let config = linked_packages_config(dir.path(), &options).unwrap();
        assert_eq!(config.watch_folders, [explicit.clone()]);
        assert_eq!(config.extra_node_modules["my-pkg"], explicit);
        assert!(!config.extra_node_modules.contains_key("detected"));
    }

    #[test]
    fn test_workspace_members_merged_after_linked() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("linked-lib")).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "dependencies": {"linked-lib": "link:./linked-lib"},
                "workspaces": ["packages/*"]
            }"#,
        )
        .unwrap();
        let member = dir.path().join("packages/member");
        fs::create_dir_all(&member).unwrap();
        fs::write(member.join("package.json"), r#"{"name": "member"}"#).unwrap();

        let config =
            linked_packages_config(dir.path(), &LinkedPackagesOptions::default()).unwrap();
        assert_eq!(config.watch_folders.len(), 2);
        assert!(config.extra_node_modules.contains_key("linked-lib"));
        assert!(config.extra_node_modules.contains_key("member"));
    }

    #[test]
    fn test_linked_scan_wins_over_workspace_member_with_same_name() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("direct")).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "dependencies": {"lib": "link:./direct"},
                "workspaces": ["packages/*"]
            }"#,
        )
        .unwrap();
        let member = dir.path().join("packages/lib");
        fs::create_dir_all(&member).unwrap();
        fs::write(member.join("package.json"), r#"{"name": "lib"}"#).unwrap();

        let config =
            linked_packages_config(dir.path(), &LinkedPackagesOptions::default()).unwrap();
        assert_eq!(config.watch_folders.len(), 1);
        assert_eq!(
            config.extra_node_modules["lib"],
            dunce::canonicalize(dir.path().join("direct")).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_fallback_when_nothing_else_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let real = dir.path().join("elsewhere/real-pkg");
        fs::create_dir_all(&real).unwrap();
        let modules = dir.path().join(NODE_MODULES);
        fs::create_dir(&modules).unwrap();
        std::os::unix::fs::symlink(&real, modules.join("real-pkg")).unwrap();

        let config =
            linked_packages_config(dir.path(), &LinkedPackagesOptions::default()).unwrap();
        assert_eq!(config.watch_folders.len(), 1);
        assert_eq!(
            config.extra_node_modules["real-pkg"],
            dunce::canonicalize(&real).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_fallback_not_used_when_scan_found_packages() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"lib": "link:./lib"}}"#,
        )
        .unwrap();

        let stray = dir.path().join("stray");
        fs::create_dir(&stray).unwrap();
        let modules = dir.path().join(NODE_MODULES);
        fs::create_dir(&modules).unwrap();
        std::os::unix::fs::symlink(&stray, modules.join("stray")).unwrap();

        let config =
            linked_packages_config(dir.path(), &LinkedPackagesOptions::default()).unwrap();
        assert!(!config.extra_node_modules.contains_key("stray"));
    }

    #[test]
    fn test_block_list_covers_each_package_node_modules() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();

        let options = LinkedPackagesOptions::default().with_linked_packages(vec![LinkedPackage {
            name: "pkg".to_string(),
            path: pkg.clone(),
        }]);
        let config = linked_packages_config(dir.path(), &options).unwrap();

        let inside = pkg.join("node_modules/some-dep/index.js");
        assert!(config.block_list.is_match(&inside.to_string_lossy()));
        let source = pkg.join("src/index.js");
        assert!(!config.block_list.is_match(&source.to_string_lossy()));
    }

    #[test]
    fn test_peer_alias_yields_to_package_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        // "ui-kit" is linked and also declared as a peer of another linked
        // package; the direct mapping must survive.
        let ui_kit = dir.path().join("ui-kit");
        fs::create_dir(&ui_kit).unwrap();
        fs::write(ui_kit.join("package.json"), r#"{"name": "ui-kit"}"#).unwrap();
        let app_lib = dir.path().join("app-lib");
        fs::create_dir(&app_lib).unwrap();
        fs::write(
            app_lib.join("package.json"),
            r#"{"name": "app-lib", "peerDependencies": {"ui-kit": "*"}}"#,
        )
        .unwrap();

        let options = LinkedPackagesOptions::default().with_linked_packages(vec![
            LinkedPackage {
                name: "ui-kit".to_string(),
                path: ui_kit.clone(),
            },
            LinkedPackage {
                name: "app-lib".to_string(),
                path: app_lib,
            },
        ]);
        let config = linked_packages_config(dir.path(), &options).unwrap();

        assert_eq!(config.extra_node_modules["ui-kit"], ui_kit);
        assert_eq!(
            config.extra_node_modules[DEFAULT_PEER_DEPENDENCY],
            dir.path().join(NODE_MODULES).join(DEFAULT_PEER_DEPENDENCY)
        );
    }

    #[test]
    fn test_additional_peers_resolve_under_modules_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let options = LinkedPackagesOptions::default()
            .with_linked_packages(Vec::new())
            .with_additional_peer_dependencies(vec!["lodash".to_string()]);
        let config = linked_packages_config(dir.path(), &options).unwrap();

        assert_eq!(
            config.extra_node_modules["lodash"],
            dir.path().join(NODE_MODULES).join("lodash")
        );
    }

    #[test]
    fn test_include_workspaces_false_skips_members() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"workspaces": ["packages/*"]}"#,
        )
        .unwrap();
        let member = dir.path().join("packages/lib");
        fs::create_dir_all(&member).unwrap();
        fs::write(member.join("package.json"), r#"{"name": "lib"}"#).unwrap();

        let options = LinkedPackagesOptions::default().with_include_workspaces(false);
        let config = linked_packages_config(dir.path(), &options).unwrap();

        assert!(!config.watch_folders.contains(&member));
        assert!(!config.extra_node_modules.contains_key("lib"));
    }
}
