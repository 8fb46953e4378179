//! `metrolink config` command implementation.
//!
//! Runs the full discovery pipeline and prints the synthesized Metro
//! resolver config.

use metrolink_core::{linked_packages_config, LinkedPackage, LinkedPackagesOptions};
use miette::Result;
use std::path::{Path, PathBuf};

/// Run the config command.
pub fn run(
    cwd: &Path,
    no_workspaces: bool,
    packages: &[String],
    peers: &[String],
    json: bool,
) -> Result<()> {
    let mut options = LinkedPackagesOptions::default()
        .with_include_workspaces(!no_workspaces)
        .with_additional_peer_dependencies(peers.to_vec());

    if !packages.is_empty() {
        let mut explicit = Vec::new();
        for spec in packages {
            let Some((name, path)) = spec.split_once('=') else {
                eprintln!("error: invalid --package '{spec}', expected NAME=PATH");
                std::process::exit(2);
            };
            explicit.push(LinkedPackage {
                name: name.to_string(),
                path: PathBuf::from(path),
            });
        }
        options = options.with_linked_packages(explicit);
    }

    tracing::debug!(cwd = %cwd.display(), "synthesizing resolver config");

    let config = match linked_packages_config(cwd, &options) {
        Ok(config) => config,
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "message": e.to_string() }
                    })
                );
            } else {
                eprintln!("error: {e}");
            }
            std::process::exit(1);
        }
    };

    if json {
        let watch_folders: Vec<String> = config
            .watch_folders
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let extra_node_modules: serde_json::Map<String, serde_json::Value> = config
            .extra_node_modules
            .iter()
            .map(|(name, path)| {
                (
                    name.clone(),
                    serde_json::json!(path.to_string_lossy()),
                )
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "watchFolders": watch_folders,
                "extraNodeModules": extra_node_modules,
                "blockList": config.block_list.patterns()
            })
        );
    } else {
        println!("Watch folders ({}):", config.watch_folders.len());
        for folder in &config.watch_folders {
            println!("  {}", folder.display());
        }
        println!();
        println!("Module overrides ({}):", config.extra_node_modules.len());
        for (name, path) in &config.extra_node_modules {
            println!("  {name} -> {}", path.display());
        }
        println!();
        println!("Blocked patterns ({}):", config.block_list.patterns().len());
        for pattern in config.block_list.patterns() {
            println!("  {pattern}");
        }
    }

    Ok(())
}
