//! Command-line runtime for graft.
//!
//! The runtime splits configuration flags from the command, loads layered
//! configuration, installs telemetry, and runs the `add` or `update`
//! scenario against an Angular CLI workspace. Each step prints one report
//! line to stdout; errors go to stderr with a failing exit code. The entry
//! points accept arbitrary writers so tests can capture output.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;

mod cli;
mod config;
mod errors;
mod provider;
mod session;
mod telemetry;
mod workspace;

use cli::{Cli, CliCommand};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
use provider::{FsSourceProvider, SourceProvider};
use session::Session;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `graft_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &["--config-path", "--log-filter", "--log-format"];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with(args, &mut io, &OrthoConfigLoader, &FsSourceProvider)
}

/// Runs the CLI with substitutable configuration and document storage.
pub(crate) fn run_with<I, W, E, L, P>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    provider: &P,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    P: SourceProvider,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli_arguments = prepare_cli_arguments(&args, &split);

    let result = Cli::try_parse_from(cli_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| {
            telemetry::initialise(&config)?;
            execute(cli, provider, &mut *io.stdout)
        });

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error))
            if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            let _ = write!(io.stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let program = args.first().into_iter();
    let command = args.get(split.command_start..).unwrap_or_default();
    program.chain(command).cloned().collect()
}

fn execute<P, W>(cli: Cli, provider: &P, stdout: &mut W) -> Result<ExitCode, AppError>
where
    P: SourceProvider,
    W: Write,
{
    let Cli {
        root,
        project,
        command,
    } = cli;
    let session = Session::open(provider, &root, project.as_deref())?;
    let workspace = session.workspace();
    info!(
        project = workspace.project(),
        source_dir = %workspace.source_dir(),
        "patching workspace project"
    );

    let reports = match command {
        CliCommand::Add(args) => session.add(&args.into_recipe())?,
        CliCommand::Update(args) => session.update(&args.into_recipe())?,
    };
    for report in &reports {
        writeln!(stdout, "{report}").map_err(AppError::Report)?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests;
