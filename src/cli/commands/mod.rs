//! CLI command implementations

pub mod feedback;
pub mod init;
pub mod process;
pub mod reverse;
pub mod validate;

use anyhow::Context;
use std::io::{Read, Write};

/// Read command input from a file, or from stdin for `None` or `-`
pub(crate) fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {path}")),
    }
}

/// Write command output to a file, or to stdout for `None` or `-`
pub(crate) fn write_output(path: Option<&str>, content: &str) -> anyhow::Result<()> {
    match path {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
            Ok(())
        }
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {path}")),
    }
}
