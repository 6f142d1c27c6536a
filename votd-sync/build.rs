//! Stamps `votd-sync --version` with the commit, build time and cargo profile.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    emit("GIT_HASH", &commit().unwrap_or_else(|| UNKNOWN.into()));
    emit(
        "BUILD_TIMESTAMP",
        &chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    );
    emit("BUILD_PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into()));

    for watched in ["../.git/HEAD", "../.git/refs/heads", "src"] {
        println!("cargo:rerun-if-changed={}", watched);
    }
}

/// Eight-character commit id, or `None` outside a checkout
fn commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}
