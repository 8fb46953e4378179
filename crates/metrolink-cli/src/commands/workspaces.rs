//! `metrolink workspaces` command implementation.
//!
//! Lists workspace member packages for the project root.

use metrolink_core::list_workspace_packages;
use miette::Result;
use std::path::Path;

/// Run the workspaces command.
pub fn run(cwd: &Path, json: bool) -> Result<()> {
    let members = match list_workspace_packages(cwd) {
        Ok(members) => members,
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
        let list: Vec<_> = members
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
                "workspaces": !members.is_empty(),
                "packages": list
            })
        );
    } else if members.is_empty() {
        println!("No workspaces configured.");
        println!("hint: add a \"workspaces\" field to package.json");
    } else {
        println!("Packages ({}):", members.len());
        for member in &members {
            println!("  {}", member.name);
            println!("    {}", member.path.display());
        }
    }

    Ok(())
}
