// src/main.rs

use clap::Parser;
use std::process::ExitCode;

use tabledesk::cli::{self, Cli};
use tabledesk::settings::{io::load_settings_from_file, AppSettings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings_from_file::<AppSettings>() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Ignoring unreadable settings file: {}", e);
            AppSettings::default()
        }
    };

    match cli::run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
