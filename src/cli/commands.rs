//! Command dispatch: one handler per subcommand

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, OutputFormat, WorkflowIdArgs};
use crate::cli::{output, CliResult};
use crate::config::Settings;
use crate::domain::{EnvOverride, RuntimeHealth, StageSelection, VersionEntry, WorkflowRef};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Environment variable consulted for the deploy stage when `--stage` is absent.
pub const STAGE_ENV: &str = "ETLR_STAGE";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        completion(*shell);
        return Ok(());
    }

    let settings = Settings::load()?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings, cli.api_key.clone());
    run(&container, &cli.command)
}

/// Execute a command against the given services.
pub fn run(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::List { format } => list(container, *format),
        Commands::Get { ident, format } => get(container, ident, *format),
        Commands::Delete { ident, yes } => delete(container, ident, *yes),
        Commands::Deploy {
            file,
            id,
            name,
            stage,
            env,
        } => deploy(container, file.as_ref(), id, name, stage, env),
        Commands::Start { ident } => start(container, ident),
        Commands::Stop { ident } => stop(container, ident),
        Commands::Status { ident, format } => status(container, ident, *format),
        Commands::Versions { id, format } => versions(container, id, *format),
        Commands::GetVersion {
            id,
            version,
            format,
        } => get_version(container, id, *version, *format),
        Commands::Restore { id, version, yes } => restore(container, id, *version, *yes),
        Commands::Completion { shell } => {
            completion(*shell);
            Ok(())
        }
    }
}

fn completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn resolve(ident: &WorkflowIdArgs) -> CliResult<WorkflowRef> {
    Ok(WorkflowRef::resolve(
        ident.id.as_deref(),
        ident.name.as_deref(),
        ident.stage.as_deref(),
    )?)
}

fn confirm(container: &ServiceContainer, prompt: &str) -> CliResult<bool> {
    Ok(container
        .prompter
        .confirm(prompt)
        .map_err(|e| InfraError::io("read confirmation", e))?)
}

#[instrument(skip(container))]
fn list(container: &ServiceContainer, format: OutputFormat) -> CliResult<()> {
    let result = container.api()?.list_workflows()?;
    output::response(&result, format);
    Ok(())
}

#[instrument(skip(container))]
fn get(container: &ServiceContainer, ident: &WorkflowIdArgs, format: OutputFormat) -> CliResult<()> {
    let target = resolve(ident)?;
    let result = container.api()?.get_workflow(&target)?;
    output::response(&result, format);
    Ok(())
}

#[instrument(skip(container))]
fn delete(container: &ServiceContainer, ident: &WorkflowIdArgs, yes: bool) -> CliResult<()> {
    let target = resolve(ident)?;
    if !yes
        && !confirm(
            container,
            &format!("Are you sure you want to delete workflow '{}'?", target),
        )?
    {
        output::info("Aborted.");
        return Ok(());
    }

    let result = container.api()?.delete_workflow(&target)?;
    output::success("Workflow deleted");
    output::response(&result, OutputFormat::Json);
    Ok(())
}

/// Push-then-deploy from a file, or deploy an existing workflow directly.
#[instrument(skip(container, env))]
fn deploy(
    container: &ServiceContainer,
    file: Option<&PathBuf>,
    id: &Option<String>,
    name: &Option<String>,
    stage: &Option<String>,
    env: &[String],
) -> CliResult<()> {
    let stage = StageSelection::new(stage.clone(), container.env.var(STAGE_ENV));
    let has_identifier = [id, name]
        .iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()));

    if file.is_none() && has_identifier {
        let target = WorkflowRef::resolve(id.as_deref(), name.as_deref(), stage.override_stage())?;
        let label = match (name.as_deref(), stage.override_stage()) {
            (Some(name), Some(stage)) => Some(format!("{}/{}", name, stage)),
            _ => None,
        };
        let service = container.workflow_service()?;
        return finish_deploy(|| service.deploy(&target), label);
    }

    let overrides = EnvOverride::parse_all(env)?;
    let service = container.workflow_service()?;
    let path = service.locate(file.map(PathBuf::as_path))?;
    let plan = service.prepare(&path, stage, &overrides)?;

    let summary = output::env_summary(&plan.env);
    if !summary.is_empty() {
        output::info(&summary);
    }
    match plan.stage_override() {
        Some(stage) => output::info(&format!("Pushing workflow (stage override: {})...", stage)),
        None => output::info("Pushing workflow..."),
    }

    let pushed = service.push(&plan)?;
    if pushed.created {
        output::success("Workflow created");
    } else {
        output::success("Workflow updated");
    }

    finish_deploy(|| service.deploy(&pushed.target), pushed.label())
}

fn finish_deploy<F>(deploy: F, label: Option<String>) -> CliResult<()>
where
    F: FnOnce() -> crate::application::ApplicationResult<serde_json::Value>,
{
    let identifier = label.map(|l| format!(" {}", l)).unwrap_or_default();
    output::info(&format!("Deploying workflow{}...", identifier));
    let result = deploy()?;
    output::success("Workflow deployed and running");
    output::response(&result, OutputFormat::Json);
    Ok(())
}

#[instrument(skip(container))]
fn start(container: &ServiceContainer, ident: &WorkflowIdArgs) -> CliResult<()> {
    let target = resolve(ident)?;
    let result = container.api()?.deploy_workflow(&target)?;
    output::success("Workflow started");
    output::response(&result, OutputFormat::Json);
    Ok(())
}

#[instrument(skip(container))]
fn stop(container: &ServiceContainer, ident: &WorkflowIdArgs) -> CliResult<()> {
    let target = resolve(ident)?;
    let result = container.api()?.stop_workflow(&target)?;
    output::success("Workflow stopped");
    output::response(&result, OutputFormat::Json);
    Ok(())
}

#[instrument(skip(container))]
fn status(
    container: &ServiceContainer,
    ident: &WorkflowIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let target = resolve(ident)?;
    let result = container.api()?.get_status(&target)?;
    if let Some(health) = RuntimeHealth::from_response(&result) {
        output::info(&output::health_summary(&health));
    }
    output::response(&result, format);
    Ok(())
}

#[instrument(skip(container))]
fn versions(container: &ServiceContainer, id: &str, format: OutputFormat) -> CliResult<()> {
    let result = container.api()?.list_versions(id)?;
    if let Some(entries) = VersionEntry::list_from_response(&result) {
        output::info(&output::version_list(&entries));
    }
    output::response(&result, format);
    Ok(())
}

#[instrument(skip(container))]
fn get_version(
    container: &ServiceContainer,
    id: &str,
    version: u32,
    format: OutputFormat,
) -> CliResult<()> {
    let result = container.api()?.get_version(id, version)?;
    output::response(&result, format);
    Ok(())
}

#[instrument(skip(container))]
fn restore(container: &ServiceContainer, id: &str, version: u32, yes: bool) -> CliResult<()> {
    if !yes
        && !confirm(
            container,
            &format!(
                "Are you sure you want to restore workflow to version {}?",
                version
            ),
        )?
    {
        output::info("Aborted.");
        return Ok(());
    }

    let result = container.api()?.restore_version(id, version)?;
    output::success(&format!("Workflow restored to version {}", version));
    if let Some(new_version) = result
        .get("workflow")
        .and_then(|w| w.get("version"))
        .filter(|v| output::is_truthy(v))
    {
        output::info(&format!("New version created: {}", output::plain(new_version)));
    }
    output::response(&result, OutputFormat::Json);
    Ok(())
}
