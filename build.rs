use std::env;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed=BUILDINFO_DISABLE");

    // Leaving the metadata out is how a binary reports "not available"
    if env::var_os("BUILDINFO_DISABLE").is_some() {
        println!("cargo:warning=BUILDINFO_DISABLE is set, build metadata will not be embedded");
        return Ok(());
    }

    let build = BuildBuilder::default()
        .build_timestamp(true) // Build timestamp
        .build()?;

    let cargo = CargoBuilder::default()
        .debug(true) // Debug assertions
        .features(true) // Enabled features
        .opt_level(true) // Optimization level
        .target_triple(true) // Target triple (e.g., x86_64-unknown-linux-gnu)
        .build()?;

    let rustc = RustcBuilder::default()
        .semver(true) // Rust compiler version
        .channel(true) // Rust channel (stable, beta, nightly)
        .host_triple(true) // Host the compiler ran on
        .build()?;

    // Git metadata via the git command line; outside a checkout vergen emits placeholders
    let gitcl = GitclBuilder::default()
        .sha(true) // Git commit SHA
        .commit_timestamp(true) // Git commit timestamp
        .dirty(true) // Whether working tree is dirty
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    emit_target()?;

    println!("cargo:rustc-env=BUILDINFO_EMBEDDED=1");

    Ok(())
}

/// Target OS and architecture in the short form used by the build settings
fn emit_target() -> Result<(), Box<dyn std::error::Error>> {
    let os = env::var("CARGO_CFG_TARGET_OS")?;
    let arch = env::var("CARGO_CFG_TARGET_ARCH")?;

    println!("cargo:rustc-env=BUILDINFO_TARGET_OS={}", os);
    println!("cargo:rustc-env=BUILDINFO_TARGET_ARCH={}", arch);

    Ok(())
}
