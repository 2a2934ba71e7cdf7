use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    portmap_cli::main_entry()
}
