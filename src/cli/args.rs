//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

/// ETLR - Workflow automation tool.
///
/// Manage workflows, deployments, and monitoring through the ETLR platform.
///
/// Authentication (in priority order):
///   1. --api-key flag
///   2. ETLR_API_KEY environment variable
///   3. api_key in the global config file
#[derive(Parser, Debug)]
#[command(name = "etlr")]
#[command(author, version, verbatim_doc_comment)]
pub struct Cli {
    /// API key for authentication (reads from ETLR_API_KEY if not provided)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for API responses.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
}

/// Workflow identifier: either --id, or --name together with --stage.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkflowIdArgs {
    /// Workflow ID
    #[arg(long = "id")]
    pub id: Option<String>,

    /// Workflow name (requires --stage)
    #[arg(long)]
    pub name: Option<String>,

    /// Workflow stage (prod/dev)
    #[arg(long)]
    pub stage: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all workflows
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Get workflow details
    Get {
        #[command(flatten)]
        ident: WorkflowIdArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Delete a workflow
    Delete {
        #[command(flatten)]
        ident: WorkflowIdArgs,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Deploy a workflow by pushing and starting it
    ///
    /// Without a file or identifier, looks for workflow.yaml in the current
    /// directory. Stage priority: --stage flag, then ETLR_STAGE, then the
    /// stage in the YAML file.
    Deploy {
        /// Workflow YAML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Workflow ID (alternative to file)
        #[arg(long = "id")]
        id: Option<String>,
        /// Workflow name (alternative to file)
        #[arg(long)]
        name: Option<String>,
        /// Deployment stage, overrides YAML (reads from ETLR_STAGE if not provided)
        #[arg(long)]
        stage: Option<String>,
        /// Environment variables in KEY=VALUE format
        #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
    },

    /// Start a workflow that has already been pushed
    Start {
        #[command(flatten)]
        ident: WorkflowIdArgs,
    },

    /// Stop a running workflow
    Stop {
        #[command(flatten)]
        ident: WorkflowIdArgs,
    },

    /// Get workflow deployment status
    Status {
        #[command(flatten)]
        ident: WorkflowIdArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List all versions of a workflow
    Versions {
        /// Workflow ID
        #[arg(long = "id")]
        id: String,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Get details of a specific workflow version
    GetVersion {
        /// Workflow ID
        #[arg(long = "id")]
        id: String,
        /// Version number
        #[arg(long = "version")]
        version: u32,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Restore a workflow to a specific version
    ///
    /// This creates a new version with the content from the specified version.
    Restore {
        /// Workflow ID
        #[arg(long = "id")]
        id: String,
        /// Version number to restore
        #[arg(long = "version")]
        version: u32,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
