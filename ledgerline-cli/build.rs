use std::path::{Path, PathBuf};
use std::process::Command;

/// Short SHA of the checkout this binary was built from.
fn git_short_sha(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let repo_root = std::env::var("CARGO_MANIFEST_DIR")
        .map(|dir| PathBuf::from(dir).join(".."))
        .unwrap_or_else(|_| PathBuf::from(".."));

    let head = repo_root.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let sha = git_short_sha(&repo_root).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=LEDGERLINE_BUILD_SHA={sha}");
}
