//! Build script: embeds the git hash and pre-checks GPU toolkits.
//!
//! whisper-rs-sys fails late and cryptically when a GPU toolkit is missing,
//! so the relevant tools are probed here before its build starts.

use std::process::Command;

fn main() {
    // Embed git short hash for version string
    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    if cfg!(feature = "cuda") {
        require_tool(
            "nvcc",
            "CUDA toolkit not found. Install it from \
             https://developer.nvidia.com/cuda-downloads or build without: \
             cargo build --release",
        );
    }
    if cfg!(feature = "vulkan") {
        require_tool(
            "vulkaninfo",
            "Vulkan SDK not found. Install it from https://vulkan.lunarg.com/ \
             or build without: cargo build --release",
        );
    }
    if cfg!(feature = "hipblas") {
        require_tool(
            "rocminfo",
            "ROCm not found. Install it from https://rocm.docs.amd.com/ \
             or build without: cargo build --release",
        );
    }
    if cfg!(feature = "openblas") {
        check_openblas();
    }
}

/// Fail the build early with a readable message when `tool` is missing.
fn require_tool(tool: &str, message: &str) {
    if Command::new(tool).arg("--version").output().is_err() {
        panic!("\n\n`{tool}` not found. {message}\n");
    }
    println!("cargo::warning={tool} detected");
}

fn check_openblas() {
    let pkg_config_ok = Command::new("pkg-config")
        .args(["--exists", "openblas"])
        .status()
        .is_ok_and(|s| s.success());

    if !pkg_config_ok {
        let lib_exists = std::path::Path::new("/usr/lib/x86_64-linux-gnu/libopenblas.so").exists()
            || std::path::Path::new("/usr/lib/libopenblas.so").exists()
            || std::path::Path::new("/usr/lib64/libopenblas.so").exists();

        if !lib_exists {
            panic!(
                "\n\nOpenBLAS not found. Install: sudo apt install libopenblas-dev \
                 or build without: cargo build --release\n"
            );
        }
    }
    println!("cargo::warning=OpenBLAS detected");
}
