//! CLI entrypoint for graft.
//!
//! The binary delegates to [`graft_cli::run`], which loads configuration,
//! parses the command line, and patches the workspace on disk.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    graft_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
