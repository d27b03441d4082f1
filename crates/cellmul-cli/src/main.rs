mod args;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use engine::{render, Engine, EngineConfigBuilder};
use foundation::Product;

use crate::args::Cli;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run(cli: Cli) -> Result<()> {
    let product = Product::from_dims(cli.rows_a, cli.cols_a, cli.cols_b)
        .context("invalid matrix dimensions")?;
    let config = EngineConfigBuilder::default()
        .max_workers(cli.max_workers)
        .gate(cli.gate)
        .work_delay(cli.work_delay())
        .build()
        .context("invalid engine configuration")?;

    println!("Current max workers allotment = {}", config.max_workers);

    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("filling {} and {} from {} seed {}", product.a(), product.b(), cli.rng, seed);
    let mut source = cli.rng.source(seed);

    let outcome = Engine::new(config)
        .run(product, source.as_mut())
        .context("matrix multiplication aborted")?;

    print!("{}", render::report(&outcome.a, &outcome.b, &outcome.result));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
