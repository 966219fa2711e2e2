//! Build script: embeds the PCM version string.

use std::process::Command;

fn main() {
    // PCM_VERSION wins when set (release builds); local builds use git describe.
    if let Ok(version) = std::env::var("PCM_VERSION") {
        println!("cargo:rustc-env=PCM_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=PCM_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=templates/");
    println!("cargo:rerun-if-env-changed=PCM_VERSION");
}
