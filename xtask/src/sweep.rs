use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::sh::{ShOptions, StreamMode};

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Path to YAML config (defaults to `<workspace>/sweep.yaml`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use this `cellmul` binary instead of building one
    #[arg(long)]
    pub binary: Option<PathBuf>,

    /// Only run entries with these names (repeatable)
    #[arg(short = 'n', long = "name")]
    pub names: Vec<String>,

    /// Print commands and their output as they run
    #[arg(long)]
    pub verbose: bool,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum OneOrMany<T> {
    /// `gate: spin`
    One(T),
    /// `gate: [condvar, spin]` runs once per value
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    fn values(&self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v.clone()],
            OneOrMany::Many(vs) => vs.clone(),
        }
    }
}

#[derive(serde::Deserialize, Debug, Default)]
struct Defaults {
    max_workers: Option<OneOrMany<usize>>,
    gate: Option<OneOrMany<String>>,
    rng: Option<String>,
    seed: Option<u64>,
    work_delay_ms: Option<u64>,
}

#[derive(serde::Deserialize, Debug)]
struct SweepEntry {
    name: Option<String>,
    /// `[rows_a, cols_a, cols_b]`
    dims: [usize; 3],
    max_workers: Option<OneOrMany<usize>>,
    gate: Option<OneOrMany<String>>,
    rng: Option<String>,
    seed: Option<u64>,
    work_delay_ms: Option<u64>,
}

#[derive(serde::Deserialize, Debug)]
struct SweepConfig {
    #[serde(default)]
    defaults: Defaults,
    entries: Vec<SweepEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    name: String,
    dims: [usize; 3],
    args: String,
}

fn load_config(path: &Path) -> Result<SweepConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn expand(cfg: &SweepConfig, only: &[String]) -> Vec<Step> {
    let d = &cfg.defaults;
    let mut steps = Vec::new();

    for (i, entry) in cfg.entries.iter().enumerate() {
        let name = entry.name.clone().unwrap_or_else(|| format!("entry-{}", i + 1));
        if !only.is_empty() && !only.contains(&name) {
            continue;
        }

        let workers = entry
            .max_workers
            .as_ref()
            .or(d.max_workers.as_ref())
            .map(OneOrMany::values)
            .unwrap_or_else(|| vec![foundation::DEFAULT_MAX_WORKERS]);
        let gates = entry
            .gate
            .as_ref()
            .or(d.gate.as_ref())
            .map(OneOrMany::values)
            .unwrap_or_else(|| vec!["condvar".to_string()]);
        let rng = entry.rng.as_ref().or(d.rng.as_ref());
        let seed = entry.seed.or(d.seed);
        let delay = entry.work_delay_ms.or(d.work_delay_ms);

        let [rows_a, cols_a, cols_b] = entry.dims;
        for &max in &workers {
            for gate in &gates {
                let mut args =
                    format!("{rows_a} {cols_a} {cols_b} --max-workers {max} --gate {gate}");
                if let Some(rng) = rng {
                    args.push_str(&format!(" --rng {rng}"));
                }
                if let Some(seed) = seed {
                    args.push_str(&format!(" --seed {seed}"));
                }
                if let Some(delay) = delay {
                    args.push_str(&format!(" --work-delay-ms {delay}"));
                }
                steps.push(Step {
                    name: format!("{name} [{rows_a}x{cols_a} * {cols_a}x{cols_b}] ({gate}, {max})"),
                    dims: entry.dims,
                    args,
                });
            }
        }
    }
    steps
}

fn build_binary(workspace: &Path) -> Result<PathBuf> {
    let opts = ShOptions {
        cwd: Some(workspace.to_path_buf()),
        stdout: StreamMode::Null,
        ..Default::default()
    };
    crate::sh!(options(opts), "cargo build --quiet --release -p cellmul-cli")?;
    Ok(workspace.join("target").join("release").join("cellmul"))
}

pub fn run(args: SweepArgs) -> Result<()> {
    let workspace = crate::findup::workspace_root()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| workspace.join("sweep.yaml"));
    let cfg = load_config(&config_path)?;

    let steps = expand(&cfg, &args.names);
    if steps.is_empty() {
        bail!("no sweep entries selected");
    }
    let binary = match args.binary {
        Some(path) => path,
        None => build_binary(&workspace)?,
    };

    for (i, step) in steps.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, steps.len(), step.name);
        let cmd = format!("{} {}", binary.display(), step.args);
        if args.verbose {
            println!("{}", cmd);
        }
        let out = crate::sh!(options(ShOptions::captured()), &cmd)?;
        debug_assert!(out.status.success());
        if args.verbose {
            print!("{}", out.stdout);
            if !out.stderr.is_empty() {
                eprint!("{}", out.stderr);
            }
        }
        let printout = crate::verify::parse_printout(&out.stdout)
            .with_context(|| format!("parsing output of `{cmd}`"))?;
        crate::verify::check(&printout, step.dims).with_context(|| step.name.clone())?;
    }

    println!("[sweep] {} run(s) verified", steps.len());
    Ok(())
}
