//! XTask - build automation for Miqat
//!
//! # Usage
//! ```sh
//! cargo xtask dist-web                 # WASM package for browsers and NPM
//! cargo xtask sync-versions            # Copy the workspace version into pkg/package.json
//! cargo xtask publish-crates --dry-run # Validate crates.io packaging
//! cargo xtask build-all                # Everything above except publishing
//! ```

use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Name under which the wasm package is published.
const NPM_PACKAGE: &str = "@miqat/miqat";

/// Workspace crates in dependency order (leaves first, facade last).
const WORKSPACE_CRATES: &[(&str, &str)] = &[
    ("miqat-types", "crates/miqat-types"),
    ("miqat-astronomy", "crates/miqat-astronomy"),
    ("miqat-network", "crates/miqat-network"),
    ("miqat-core", "crates/miqat_core"),
    ("miqat", "crates/miqat"),
];

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");

    match args[1].as_str() {
        "dist-web" => dist_web()?,
        "sync-versions" => sync_versions()?,
        "publish-crates" => publish_crates(dry_run)?,
        "build-all" => build_all()?,
        "-h" | "--help" | "help" => print_usage(),
        cmd => {
            eprintln!("❌ Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!(
        r#"
Miqat build tasks

USAGE:
    cargo xtask <COMMAND> [--dry-run]

COMMANDS:
    dist-web         Build the WASM package (dist/web for browsers, pkg/ for NPM)
    sync-versions    Copy the workspace version into pkg/package.json
    publish-crates   Publish library crates to crates.io in dependency order
    build-all        Release build of the CLI plus dist-web
    help             Show this message

OPTIONS:
    -n, --dry-run    Validate without publishing
"#
    );
}

// =============================================================================
// Helper Functions
// =============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let root = PathBuf::from(manifest_dir)
        .parent()
        .context("Failed to find project root")?
        .to_path_buf();
    Ok(root)
}

fn run_cmd(cmd: &str, args: &[&str]) -> Result<()> {
    run_cmd_in_dir(&project_root()?, cmd, args)
}

fn run_cmd_in_dir(dir: &Path, cmd: &str, args: &[&str]) -> Result<()> {
    println!("  → [{}] {} {}", dir.display(), cmd, args.join(" "));

    let status = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to start: {} {}", cmd, args.join(" ")))?;

    if !status.success() {
        bail!("Command '{}' failed with exit code: {:?}", cmd, status.code());
    }
    Ok(())
}

fn command_exists(cmd: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// The `version` from `[workspace.package]`.
fn read_cargo_version() -> Result<String> {
    let cargo_path = project_root()?.join("Cargo.toml");
    let content = fs::read_to_string(&cargo_path)
        .with_context(|| format!("Failed to read {}", cargo_path.display()))?;
    workspace_version(&content).context("Could not find [workspace.package] version in Cargo.toml")
}

fn workspace_version(manifest: &str) -> Option<String> {
    let mut in_package = false;
    for line in manifest.lines().map(str::trim) {
        if line.starts_with('[') {
            in_package = line == "[workspace.package]";
            continue;
        }
        if in_package && line.starts_with("version") && line.contains('=') {
            return line.split('"').nth(1).map(str::to_string);
        }
    }
    None
}

fn set_json_field(content: &str, field: &str, value: &str) -> String {
    let key = format!("\"{}\"", field);
    content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with(&key) {
                let indent = &line[..line.len() - trimmed.len()];
                let comma = if trimmed.trim_end().ends_with(',') { "," } else { "" };
                format!("{}{}: \"{}\"{}", indent, key, value, comma)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Task: sync-versions
// =============================================================================

fn sync_versions() -> Result<()> {
    let root = project_root()?;
    let version = read_cargo_version()?;

    println!("🔄 Syncing version {} to pkg/package.json...", version);
    update_json_field(&root.join("pkg").join("package.json"), "version", &version)?;
    println!("✅ Version sync complete!");
    Ok(())
}

fn update_json_field(path: &Path, field: &str, value: &str) -> Result<()> {
    if !path.exists() {
        println!("  ⏭️  {} not built yet, skipping", path.display());
        return Ok(());
    }

    let content = fs::read_to_string(path)?;
    fs::write(path, set_json_field(&content, field, value))?;
    println!("  ✅ Updated {} in {}", field, path.display());
    Ok(())
}

// =============================================================================
// Task: dist-web
// =============================================================================

fn dist_web() -> Result<()> {
    println!("\n🕸️  Building WASM Package...\n");

    let root = project_root()?;
    let wasm_dir = root.join("bindings").join("miqat_wasm");
    let dist_web = root.join("dist").join("web");
    let pkg_dir = root.join("pkg");

    if !command_exists("wasm-pack") {
        println!("  ⚠️ wasm-pack not found. Installing...");
        run_cmd("cargo", &["install", "wasm-pack"])?;
    }

    for (target, out_dir) in [("web", &dist_web), ("bundler", &pkg_dir)] {
        println!("  🏗️  Building WASM ({} target)...", target);
        run_cmd_in_dir(
            &wasm_dir,
            "wasm-pack",
            &[
                "build",
                "--release",
                "--target",
                target,
                "--out-dir",
                out_dir.to_string_lossy().as_ref(),
                "--out-name",
                "miqat",
            ],
        )?;
    }

    update_json_field(&pkg_dir.join("package.json"), "name", NPM_PACKAGE)?;
    sync_versions()?;

    println!("\n✅ WASM build complete!");
    println!("   Web: dist/web/");
    println!("   NPM: pkg/");
    Ok(())
}

// =============================================================================
// Task: publish-crates
// =============================================================================

fn publish_crates(dry_run: bool) -> Result<()> {
    println!("\n📦 Publishing crates to crates.io...\n");

    let root = project_root()?;

    for (crate_name, dir) in WORKSPACE_CRATES {
        println!("  📦 Publishing {}...", crate_name);

        let mut args = vec!["publish"];
        if dry_run {
            args.push("--dry-run");
        }

        let output = Command::new("cargo")
            .args(&args)
            .current_dir(root.join(dir))
            .output()
            .with_context(|| format!("Failed to run cargo publish for {}", crate_name))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            println!("  ✅ {} published!", crate_name);
        } else if stderr.contains("already exists") {
            println!("  ⏭️  {} already published, skipping...", crate_name);
            continue;
        } else {
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", stderr);
            bail!("Failed to publish {}", crate_name);
        }

        // crates.io needs a moment before dependents can resolve the new version
        if !dry_run {
            println!("  ⏳ Waiting 30s for crates.io index update...");
            std::thread::sleep(std::time::Duration::from_secs(30));
        }
    }

    if dry_run {
        println!("\n✅ All crates validated!");
    } else {
        println!("\n✅ All crates published to crates.io!");
    }
    Ok(())
}

// =============================================================================
// Task: build-all
// =============================================================================

fn build_all() -> Result<()> {
    println!("\n🚀 Building All Targets...\n");

    println!("\n🦀 Building Rust (Release)...");
    run_cmd("cargo", &["build", "--release", "-p", "miqat-cli"])?;

    dist_web()?;

    println!("\n✅ ALL BUILDS COMPLETE!");
    println!(" - CLI: target/release/miqat");
    println!(" - WASM/Web: dist/web/");
    println!(" - NPM: pkg/");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_version_ignores_dependency_versions() {
        let manifest = r#"
[workspace.dependencies]
chrono = { version = "0.4.42" }

[workspace.package]
version = "0.3.0"
edition = "2024"
"#;
        assert_eq!(workspace_version(manifest).as_deref(), Some("0.3.0"));
        assert_eq!(workspace_version("[package]\nversion = \"1.0.0\"\n"), None);
    }

    #[test]
    fn test_set_json_field_keeps_indent_and_comma() {
        let json = "{\n  \"name\": \"miqat-wasm\",\n  \"version\": \"0.1.0\"\n}";
        let updated = set_json_field(json, "name", NPM_PACKAGE);
        assert_eq!(updated, "{\n  \"name\": \"@miqat/miqat\",\n  \"version\": \"0.1.0\"\n}");
        let updated = set_json_field(&updated, "version", "0.3.0");
        assert!(updated.contains("  \"version\": \"0.3.0\"\n}"));
    }
}
