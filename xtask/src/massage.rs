use anyhow::Result;
use clap::Args;

/// Massage packages: cargo fix, clippy, fmt, check, test, then the `cellmul` sweep
#[derive(Args, Debug)]
pub struct MassageArgs {
    #[command(flatten)]
    workspace: clap_cargo::Workspace,

    /// Enable verbose output (show warnings)
    #[arg(long = "verbose")]
    pub verbose: bool,
}

fn target_flags(workspace: &clap_cargo::Workspace) -> String {
    if workspace.workspace || workspace.package.is_empty() {
        "--workspace".to_string()
    } else {
        workspace
            .package
            .iter()
            .map(|p| format!("-p {p}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn run(args: MassageArgs) -> Result<()> {
    let target_flags = target_flags(&args.workspace);
    let sweep_flags = if args.verbose { "--verbose" } else { "" };

    let script = format!(
        r#"
set -e

echo [1/6] Running cargo fix...
cargo fix --allow-dirty --allow-staged --quiet {target_flags}

echo [2/6] Running cargo clippy --fix...
cargo clippy --fix --allow-dirty --allow-staged --quiet {target_flags}

echo [3/6] Running cargo fmt...
cargo fmt --all --quiet

echo [4/6] Running cargo check...
cargo check --quiet --all-features {target_flags}

echo [5/6] Running cargo test...
RUST_BACKTRACE=1 cargo nextest run --no-tests pass {target_flags}

echo [6/6] Running sweep...
cargo run --quiet -p xtask -- sweep {sweep_flags}
"#
    );

    let opts = crate::sh::ShOptions {
        quiet: !args.verbose,
        ..Default::default()
    };
    crate::sh!(options(opts), script)?;
    Ok(())
}
