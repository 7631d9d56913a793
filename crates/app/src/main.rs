//! Stencil - Main Entry Point
//!
//! Loads the project settings, registers the built-in variables and runs
//! the requested subcommand.

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stencil_application::variables::{
    BuildVariableContribution, StaticVariableContribution, WorkspaceVariableContribution,
    register_contributions,
};
use stencil_application::{
    ListVariables, ResolveArguments, ResolveArgumentsInput, VariableRegistry,
    VariableResolverService,
};
use stencil_domain::{
    BuildTaskContext, DomainResult, ResolutionContext, StencilSettings, WorkspaceContext,
};
use stencil_infrastructure::{
    InMemoryVariableRegistry, MakefileBuildManager, SettingsRepository, StaticBuildManager,
    TerminalSelectionPrompt,
};

use cli::{BuildContextArgs, Cli, Command, ListArgs, ResolveArgs};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STENCIL_LOG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the resolved text
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let (repository, workspace_root) = match &cli.settings {
        Some(path) => {
            let path = cwd.join(path);
            let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
            (SettingsRepository::new(path), root)
        }
        None => (SettingsRepository::in_directory(&cwd), cwd),
    };

    let settings = repository.load().await?;
    let registry = build_registry(&settings)?;

    match cli.command {
        Command::Resolve(args) => resolve(registry, &settings, &workspace_root, args).await,
        Command::List(args) => {
            list(registry, &settings, &workspace_root, &args)?;
            Ok(())
        }
    }
}

/// Creates the registry and registers every built-in contribution.
fn build_registry(
    settings: &StencilSettings,
) -> Result<Arc<dyn VariableRegistry>, Box<dyn std::error::Error>> {
    let registry: Arc<dyn VariableRegistry> = Arc::new(InMemoryVariableRegistry::new());

    let build_manager = StaticBuildManager::new(settings.targets.clone())
        .with_fallback(Arc::new(MakefileBuildManager::new()));
    let build = BuildVariableContribution::new(
        Arc::new(build_manager),
        Arc::new(TerminalSelectionPrompt::stdio()),
    );
    let statics = StaticVariableContribution::new(settings.variables.clone());

    register_contributions(
        registry.as_ref(),
        &[&build, &WorkspaceVariableContribution, &statics],
    )?;
    tracing::debug!(count = registry.variables().len(), "registered variables");
    Ok(registry)
}

/// Builds the resolution context for the selected configuration and target.
fn build_context(
    settings: &StencilSettings,
    workspace_root: &Path,
    args: &BuildContextArgs,
) -> DomainResult<ResolutionContext> {
    let mut context = ResolutionContext::new().with(WorkspaceContext::new(workspace_root));
    if args.no_build_context {
        return Ok(context);
    }

    match settings.select_configuration(args.configuration.as_deref())? {
        Some(configuration) => {
            let mut configuration = configuration.clone();
            configuration.directory = absolute_in(workspace_root, &configuration.directory);
            let mut task = BuildTaskContext::new(configuration);
            task.build_target.clone_from(&args.target);
            context.insert(task);
        }
        None if args.target.is_some() => {
            tracing::warn!("no build configuration defined, ignoring --target");
        }
        None => {}
    }
    Ok(context)
}

fn absolute_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

async fn resolve(
    registry: Arc<dyn VariableRegistry>,
    settings: &StencilSettings,
    workspace_root: &Path,
    args: ResolveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = build_context(settings, workspace_root, &args.context)?;
    let use_case = ResolveArguments::new(VariableResolverService::new(registry));
    let output = use_case
        .execute(ResolveArgumentsInput {
            arguments: args.text,
            context,
            strict: args.strict,
        })
        .await?;

    if args.explain {
        for result in &output.results {
            for unresolved in &result.unresolved {
                eprintln!("unresolved ${{{}}}: {}", unresolved.name, unresolved.reason);
            }
        }
    }
    for line in output.resolved() {
        println!("{line}");
    }
    Ok(())
}

fn list(
    registry: Arc<dyn VariableRegistry>,
    settings: &StencilSettings,
    workspace_root: &Path,
    args: &ListArgs,
) -> DomainResult<()> {
    let context = build_context(settings, workspace_root, &args.context)?;
    let output = ListVariables::new(registry).execute(Some(&context));

    let width = output
        .variables
        .iter()
        .map(|listing| listing.descriptor.name.len())
        .max()
        .unwrap_or_default();
    for listing in output.variables {
        let descriptor = listing.descriptor;
        let mut line = format!("{:width$}  {}", descriptor.name, descriptor.description);
        if let Some(contexts) = descriptor.contexts.filter(|c| !c.is_empty()) {
            let keys: Vec<&str> = contexts.iter().map(|key| key.as_str()).collect();
            line.push_str(&format!(" [requires {}]", keys.join(", ")));
        }
        if !listing.applicable {
            line.push_str(" (unavailable)");
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}
