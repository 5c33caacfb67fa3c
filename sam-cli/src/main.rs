#![doc = include_str!("../README.md")]

mod cli;
mod config;
mod console;
mod exit_code;
mod logging;
mod publish;
mod region;

use crate::cli::{Cli, SamSubcommand};
use crate::logging::setup_logging;
use crate::publish::run_publish_command;
use clap::Parser;

// Suppress warnings due to the `unused_crate_dependencies` lint not handling integration tests well.
#[cfg(test)]
use assert_cmd as _;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let exit_code = match cli.command {
        SamSubcommand::Publish(command) => run_publish_command(&command.into_args()).await,
    };

    std::process::exit(exit_code);
}
