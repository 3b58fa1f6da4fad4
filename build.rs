use std::path::Path;
use std::process::Command;

/// Set this to stamp builds made outside a git checkout (e.g. from a tarball).
const HASH_OVERRIDE_ENV: &str = "HACKTERM_GIT_HASH";

fn short_git_hash() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    // GIT_HASH ends up in `hackterm --version` and the wasm debug report
    let git_hash = std::env::var(HASH_OVERRIDE_ENV)
        .ok()
        .filter(|h| !h.trim().is_empty())
        .or_else(short_git_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={git_hash}");
    println!("cargo:rerun-if-env-changed={HASH_OVERRIDE_ENV}");
    if Path::new(".git/HEAD").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
    }
}
