//! # splice-detect
//!
//! Compare a forged image against its original and write the spliced regions.
//!
//! ```bash
//! splice-detect forged.jpg original.jpg
//! splice-detect forged.png original.png --threshold 30 --panel panel.png --report report.json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
