mod findup;
mod massage;
mod sh;
mod sweep;
mod verify;

use clap::{Parser, Subcommand};

/// xtask command-line interface
#[derive(Parser)]
#[command(name = "xtask", version, about = "cellmul auxiliary tasks")]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands
#[derive(Subcommand)]
enum Command {
    /// Fix, lint, format, check and test packages
    Massage(massage::MassageArgs),
    /// Run `cellmul` over the shapes in a sweep file and verify every product
    Sweep(sweep::SweepArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Massage(args) => massage::run(args),
        Command::Sweep(args) => sweep::run(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
