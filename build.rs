//! Pokedex build script.
//!
//! Embedded migrations live outside `src`, so changes to them must trigger a rebuild explicitly.
//! Also enables the `backtrace_support` cfg on toolchains that can attach backtraces to errors.

use rustc_version::{version_meta, Channel};

#[doc(hidden)]
fn main() {
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-changed=build.rs");

    // `Error::provide` is still unstable; only Nightly and Dev channels can use it.
    match version_meta() {
        Ok(meta) if matches!(meta.channel, Channel::Nightly | Channel::Dev) => {
            println!("cargo:rustc-cfg=backtrace_support");
        },
        Ok(_) => (),
        Err(err) => println!("cargo:warning=failed to detect rustc channel: {}", err),
    }
}
