//! cathedral - export, enrich and lint Cathedral reference content

use std::process::ExitCode;

fn main() -> ExitCode {
    match cathedral_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
