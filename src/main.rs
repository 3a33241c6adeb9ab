use astartes::core::error::ConsoleError;
use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match astartes::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConsoleError::Load(e)) => {
            println!("{} {}", "Error reading file:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
