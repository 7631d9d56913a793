//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Resolve `${variable}` tokens in build commands and task arguments.
#[derive(Parser, Debug)]
#[command(name = "stencil", version, about)]
pub struct Cli {
    /// Settings file (defaults to `.stencil.yaml` in the working directory)
    #[arg(long, global = true, env = "STENCIL_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve each TEXT argument and print one result per line
    Resolve(ResolveArgs),

    /// List the registered variables
    List(ListArgs),
}

/// Selection of the build task context.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildContextArgs {
    /// Build configuration to use instead of the active one
    #[arg(long, short = 'c')]
    pub configuration: Option<String>,

    /// Build target to pin; skips the target prompt
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Resolve without a build task context
    #[arg(long, conflicts_with_all = ["configuration", "target"])]
    pub no_build_context: bool,
}

/// Arguments of `stencil resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub context: BuildContextArgs,

    /// Fail if any token stays unresolved
    #[arg(long)]
    pub strict: bool,

    /// Report unresolved tokens and why on stderr
    #[arg(long)]
    pub explain: bool,

    /// Strings to resolve
    #[arg(required = true, value_name = "TEXT")]
    pub text: Vec<String>,
}

/// Arguments of `stencil list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub context: BuildContextArgs,
}
