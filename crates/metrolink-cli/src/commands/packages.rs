//! `metrolink packages` command implementation.
//!
//! Lists packages referenced via a path-link protocol in the root manifest.

use metrolink_core::list_linked_packages;
use miette::Result;
use std::path::Path;

/// Run the packages command.
pub fn run(cwd: &Path, json: bool) -> Result<()> {
    let packages = match list_linked_packages(cwd) {
        Ok(packages) => packages,
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
        let list: Vec<_> = packages
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "path": p.path.to_string_lossy()
                })
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "packages": list
            })
        );
    } else if packages.is_empty() {
        println!("No linked packages found.");
        println!("hint: link a package with a \"link:\" or \"file:\" dependency");
    } else {
        println!("Linked packages ({}):", packages.len());
        for pkg in &packages {
            println!("  {}", pkg.name);
            println!("    {}", pkg.path.display());
        }
    }

    Ok(())
}
