//! Build/test operations for blockray.
//!
//! This is an instance of the `cargo-xtask` pattern as described by
//! <https://github.com/matklad/cargo-xtask>.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use anyhow::Context as _;
use anyhow::Error as ActionError;
use xshell::{Cmd, Shell};

#[derive(Debug, clap::Parser)]
struct XtaskArgs {
    #[clap(subcommand)]
    command: XtaskCommand,
}

#[derive(Debug, clap::Subcommand)]
enum XtaskCommand {
    /// Run all tests with default features, and check that the libraries build without
    /// `std`.
    Test,

    /// Run tests with all features enabled, then test each package with all features
    /// disabled.
    TestMore,

    /// Check for lint and build documentation, but do not test.
    Lint,
}

/// Packages that are `no_std` when their default features are disabled.
const NO_STD_PACKAGES: [&str; 2] = ["blockray", "blockray-base"];

fn main() -> Result<(), ActionError> {
    let sh = &Shell::new()?;
    let XtaskArgs { command } = <XtaskArgs as clap::Parser>::parse();

    match command {
        XtaskCommand::Test => {
            cargo(sh)?.args(["test", "--workspace"]).run()?;
            check_no_std(sh)?;
        }
        XtaskCommand::TestMore => {
            cargo(sh)?
                .args(["test", "--workspace", "--all-features"])
                .run()?;
            // To test with limited features, we need to run commands separately for each
            // package, as otherwise they will enable dependencies' features.
            for package in NO_STD_PACKAGES {
                cargo(sh)?
                    .args(["test", "--package", package, "--no-default-features"])
                    .run()?;
            }
        }
        XtaskCommand::Lint => {
            cargo(sh)?
                .args(["clippy", "--workspace", "--all-targets", "--all-features"])
                .run()?;
            check_no_std(sh)?;
            cargo(sh)?.args(["doc", "--workspace", "--no-deps"]).run()?;
        }
    }
    Ok(())
}

/// Builds the libraries with default features disabled. That build is more easily broken
/// by accident than the others, such as by calling a float method without the `libm`
/// polyfill in scope.
fn check_no_std(sh: &Shell) -> Result<(), ActionError> {
    for package in NO_STD_PACKAGES {
        cargo(sh)?
            .args(["build", "--package", package, "--no-default-features"])
            .run()?;
    }
    Ok(())
}

/// Start a [`Cmd`] with the cargo command we should use.
fn cargo(sh: &Shell) -> Result<Cmd<'_>, ActionError> {
    let path = std::env::var("CARGO").context("CARGO environment variable not set")?;
    Ok(sh.cmd(path))
}
