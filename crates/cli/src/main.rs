//! `trigger` command line interface.
//!
//! Fires push and pull-request events against the workflows configured
//! under `.trigger-kit/` and reports run progress on stdout.

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, WrapErr};
use colored::Colorize;
use std::path::PathBuf;
use tk_core::config::loader::load_config;
use tk_core::engine::WorkflowEngine;
use tk_core::init::{generate_trigger_kit_structure, InitOptions};
use tk_core::state::manager::RunManager;
use tk_core::steps::StepManager;
use tk_protocol::event_models::TriggerEvent;
use tk_protocol::ipc::Event;
use tk_protocol::run_models::RunStatus;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trigger", version, about = "Event-triggered task runner")]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a .trigger-kit directory with starter templates.
    Init {
        /// Target directory.
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing .trigger-kit directory.
        #[arg(long)]
        force: bool,

        /// Generate only the build-and-deploy workflow.
        #[arg(long)]
        minimal: bool,
    },

    /// List configured workflows.
    List {
        /// Project directory containing .trigger-kit.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Validate the .trigger-kit configuration.
    Validate {
        /// Project directory containing .trigger-kit.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Fire an event and run every workflow whose trigger matches.
    Fire {
        /// Event kind to fire.
        #[arg(value_enum)]
        event: FireEvent,

        /// Branch the event happened on. Defaults to the configured
        /// default branch.
        #[arg(short, long)]
        branch: Option<String>,

        /// Only consider the named workflow.
        #[arg(short, long)]
        workflow: Option<String>,

        /// Project directory containing .trigger-kit.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Emit run events as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum FireEvent {
    Push,
    PullRequest,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init {
            path,
            force,
            minimal,
        } => init(path, force, minimal).await,
        Commands::List { dir } => list(dir),
        Commands::Validate { dir } => validate(dir),
        Commands::Fire {
            event,
            branch,
            workflow,
            dir,
            json,
        } => fire(event, branch, workflow, dir, json).await,
    }
}

async fn init(path: PathBuf, force: bool, minimal: bool) -> color_eyre::Result<()> {
    let options = InitOptions {
        target_dir: path.clone(),
        force,
        minimal,
    };

    generate_trigger_kit_structure(options)
        .await
        .wrap_err("failed to initialize .trigger-kit")?;

    println!(
        "{} initialized .trigger-kit in {}",
        "✓".green(),
        path.display()
    );
    Ok(())
}

fn list(dir: PathBuf) -> color_eyre::Result<()> {
    let config = load_config(&dir).wrap_err("failed to load configuration")?;

    if config.workflows.is_empty() {
        println!("no workflows configured");
        return Ok(());
    }

    for workflow in &config.workflows {
        let mut triggers = Vec::new();
        if let Some(push) = &workflow.on.push {
            triggers.push(format!("push [{}]", push.branches.join(", ")));
        }
        if let Some(pr) = &workflow.on.pull_request {
            triggers.push(format!("pull-request [{}]", pr.branches.join(", ")));
        }

        println!(
            "{}  {} step(s)  on: {}",
            workflow.name.bold(),
            workflow.steps.len(),
            if triggers.is_empty() {
                "never".to_string()
            } else {
                triggers.join(", ")
            }
        );
    }

    Ok(())
}

fn validate(dir: PathBuf) -> color_eyre::Result<()> {
    let config = load_config(&dir).wrap_err("configuration is invalid")?;

    println!(
        "{} configuration valid: {} workflow(s), default branch '{}'",
        "✓".green(),
        config.workflows.len(),
        config.global.default_branch
    );
    Ok(())
}

async fn fire(
    event: FireEvent,
    branch: Option<String>,
    workflow_name: Option<String>,
    dir: PathBuf,
    json: bool,
) -> color_eyre::Result<()> {
    let config = load_config(&dir).wrap_err("failed to load configuration")?;

    let branch = branch.unwrap_or_else(|| config.global.default_branch.clone());
    let event = match event {
        FireEvent::Push => TriggerEvent::push(branch),
        FireEvent::PullRequest => TriggerEvent::pull_request(branch),
    };

    let workflows: Vec<_> = match &workflow_name {
        Some(name) => match config.find_workflow(name) {
            Some(workflow) => vec![workflow.clone()],
            None => bail!("workflow '{name}' not found"),
        },
        None => config.workflows.clone(),
    };

    let engine = WorkflowEngine::new(StepManager::new());
    let (events_tx, mut events_rx) = mpsc::channel::<Event>(256);
    let manager = RunManager::new(engine, events_tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            print_event(&event, json);
        }
    });

    let mut handles = Vec::new();
    for workflow in &workflows {
        if let Some((run_id, handle)) = manager.submit(workflow, &event, &dir).await {
            if !json {
                println!(
                    "triggered workflow '{}' (run {run_id})",
                    workflow.name.bold()
                );
            }
            handles.push(handle);
        }
    }

    if handles.is_empty() {
        println!(
            "no workflow matched {} on branch '{}'",
            event.kind, event.branch
        );
        return Ok(());
    }

    for handle in handles {
        let _ = handle.await;
    }

    let failed = manager
        .all_runs()
        .await
        .iter()
        .any(|run| run.status == RunStatus::Failed);

    // Dropping the manager closes the event channel and ends the printer.
    drop(manager);
    let _ = printer.await;

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn print_event(event: &Event, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
        return;
    }

    match event {
        Event::RunStarted {
            run_id,
            workflow_name,
        } => println!("run {run_id} started ({workflow_name})"),
        Event::StepStarted { step_name, .. } => {
            println!("  {} {step_name}", "->".cyan());
        }
        Event::StepCompleted { step_name, .. } => {
            println!("  {} {step_name}", "ok".green());
        }
        Event::RunLogChunk { content, .. } => println!("     {content}"),
        Event::RunStatusUpdate { .. } => {}
        Event::RunCompleted { run_id } => {
            println!("run {run_id} {}", "succeeded".green().bold());
        }
        Event::RunError { run_id, error } => {
            println!("run {run_id} {}: {error}", "failed".red().bold());
        }
    }
}
