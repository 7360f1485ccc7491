//! CLI for the member portal

pub mod serve;

use clap::{Parser, Subcommand};

/// Member Portal - profile pages, activation and password flows
#[derive(Parser)]
#[command(name = "member-portal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
