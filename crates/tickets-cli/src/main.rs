#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tickets_core::config::{DATA_DIR_ENV, resolve_config};
use tickets_core::{JsonFileRepository, TicketService};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "tickets",
    author,
    version,
    about = "tickets: manage support tickets stored in a local JSON file",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding tickets.json. Overrides TICKETS_DATA_DIR and config.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Create a new ticket",
        long_about = "Create a new ticket in the OPEN state.",
        after_help = "EXAMPLES:\n    # Create a ticket\n    tickets create --title \"Fix bug\" --description \"App crashes\" --priority high\n\n    # With tags\n    tickets create -t \"Login fails\" -d \"500 on submit\" -p critical --tags auth,backend\n\n    # Emit machine-readable output\n    tickets create -t \"Fix bug\" -d \"App crashes\" -p high --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Read",
        about = "List tickets",
        long_about = "List tickets in creation order, optionally filtered by status, priority, or tags.",
        after_help = "EXAMPLES:\n    # List everything\n    tickets list\n\n    # Open high-priority tickets tagged bug or ui\n    tickets list --status open --priority high --tags bug,ui\n\n    # Emit machine-readable output\n    tickets list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one ticket",
        long_about = "Show full details for a single ticket by ID.",
        after_help = "EXAMPLES:\n    # Show a ticket\n    tickets show 3f2a...\n\n    # Emit machine-readable output\n    tickets show 3f2a... --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Change a ticket's status",
        long_about = "Set the status of a ticket to OPEN, IN_PROGRESS, RESOLVED or CLOSED.",
        after_help = "EXAMPLES:\n    # Start work\n    tickets update 3f2a... --status in_progress\n\n    # Close it\n    tickets update 3f2a... -s closed"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Metadata",
        about = "Add tags to a ticket",
        after_help = "EXAMPLES:\n    # Add tags\n    tickets tag 3f2a... bug urgent"
    )]
    Tag(cmd::tag::TagArgs),

    #[command(
        next_help_heading = "Metadata",
        about = "Remove tags from a ticket",
        after_help = "EXAMPLES:\n    # Remove a tag\n    tickets untag 3f2a... urgent"
    )]
    Untag(cmd::tag::UntagArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete a ticket",
        long_about = "Remove a ticket from the store permanently."
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    tickets completions bash\n\n    # Generate zsh completions\n    tickets completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TICKETS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "tickets=debug,tickets_core=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("TICKETS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Resolve configuration and open the store it points at.
fn open_service(cli: &Cli) -> Result<(cmd::Service, OutputMode), CliError> {
    let project_root = env::current_dir()
        .context("failed to resolve the working directory")
        .map_err(|err| CliError::from_anyhow(&err))?;
    let env_data_dir = env::var_os(DATA_DIR_ENV).map(PathBuf::from);

    let config = resolve_config(
        &project_root,
        cli.data_dir.as_deref(),
        env_data_dir.as_deref(),
    )
    .map_err(|err| CliError::config(&err))?;

    let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    debug!(store = %config.store_path.display(), ?output, "resolved configuration");

    let service = TicketService::new(JsonFileRepository::with_file(config.store_path));
    Ok((service, output))
}

fn run(command: Commands, service: &mut cmd::Service, output: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Create(ref args) => cmd::create::run_create(args, service, output),
        Commands::List(ref args) => cmd::list::run_list(args, service, output),
        Commands::Show(ref args) => cmd::show::run_show(args, service, output),
        Commands::Update(ref args) => cmd::update::run_update(args, service, output),
        Commands::Tag(ref args) => cmd::tag::run_tag(args, service, output),
        Commands::Untag(ref args) => cmd::tag::run_untag(args, service, output),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, service, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

/// Help and version exit 0; usage errors exit 1 like every other failure.
fn parse_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return parse_exit_code(&err);
        }
    };
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let (mut service, output) = match open_service(&cli) {
        Ok(opened) => opened,
        Err(error) => {
            let mode = resolve_output_mode(cli.format, cli.json, None);
            // stderr is the last resort; nothing left to report a failure to.
            let _ = render_error(mode, &error);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &mut service, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            let _ = render_error(output, &CliError::from_anyhow(&err));
            ExitCode::FAILURE
        }
    }
}
