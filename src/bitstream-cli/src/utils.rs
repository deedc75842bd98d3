use std::{
    fs,
    io::{self, IsTerminal, Read, Write},
    path::Path,
    process,
};

use clap::CommandFactory;
use eyre::Context;

use crate::cli::{Cli, HYPHEN};

/// Obtains a buffered reader over the contents of stdin.
///
/// This function will terminate the process and print the running
/// command's help if stdin is connected to a terminal.
fn stdin_reader() -> io::BufReader<io::StdinLock<'static>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let _ = Cli::command().print_help();
        process::exit(2);
    }

    io::BufReader::new(stdin.lock())
}

/// Reads the whole input from a file, or from stdin for "-".
pub fn read_input(input: &Path) -> eyre::Result<Vec<u8>> {
    if input.as_os_str() == HYPHEN {
        let mut buf = Vec::new();
        stdin_reader().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    fs::read(input).with_context(|| format!("failed to open '{}'", input.display()))
}

/// Writes `data` to a file, or to stdout for "-".
pub fn write_output(output: &Path, data: &[u8]) -> eyre::Result<()> {
    if output.as_os_str() == HYPHEN {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()?;
        return Ok(());
    }

    fs::write(output, data).with_context(|| format!("failed to write '{}'", output.display()))
}
