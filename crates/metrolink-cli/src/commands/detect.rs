//! `metrolink detect` command implementation.

use metrolink_core::detect_package_manager;
use miette::Result;
use std::path::Path;

/// Run the detect command.
pub fn run(cwd: &Path, json: bool) -> Result<()> {
    let manager = detect_package_manager(cwd);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "packageManager": manager.as_str()
            })
        );
    } else {
        println!("{manager}");
    }

    Ok(())
}
