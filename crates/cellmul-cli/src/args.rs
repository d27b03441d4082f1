use std::time::Duration;

use clap::{ArgAction, Parser};
use foundation::DEFAULT_MAX_WORKERS;
use gate::GateKind;
use rng::RngKind;

/// Multiply two random integer matrices, one worker thread per output cell.
///
/// A is ROWS_A x COLS_A and B is COLS_A x COLS_B.
#[derive(Parser, Debug)]
#[command(name = "cellmul", version)]
pub struct Cli {
    /// Rows of matrix A
    #[arg(value_name = "ROWS_A", value_parser = positive)]
    pub rows_a: usize,

    /// Columns of A, which are also the rows of B
    #[arg(value_name = "COLS_A", value_parser = positive)]
    pub cols_a: usize,

    /// Columns of matrix B
    #[arg(value_name = "COLS_B", value_parser = positive)]
    pub cols_b: usize,

    /// Maximum number of workers active at once
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS, value_parser = positive)]
    pub max_workers: usize,

    /// Admission gate implementation
    #[arg(long, value_enum, default_value_t = GateKind::Condvar)]
    pub gate: GateKind,

    /// Generator used to fill A and B
    #[arg(long, value_enum, default_value_t = RngKind::Lcg)]
    pub rng: RngKind,

    /// Seed for the generator (defaults to the current time in seconds)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds each worker keeps its slot after writing its cell
    #[arg(long, default_value_t = 0)]
    pub work_delay_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn work_delay(&self) -> Duration {
        Duration::from_millis(self.work_delay_ms)
    }
}

/// Accepts plain decimal digits only, greater than zero.
fn positive(s: &str) -> Result<usize, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{s}` is not a number"));
    }
    match s.parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cellmul").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["2", "3", "4"]).unwrap();
        assert_eq!((cli.rows_a, cli.cols_a, cli.cols_b), (2, 3, 4));
        assert_eq!(cli.max_workers, 5);
        assert_eq!(cli.gate, GateKind::Condvar);
        assert_eq!(cli.rng, RngKind::Lcg);
        assert_eq!(cli.seed, None);
        assert!(cli.work_delay().is_zero());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_options() {
        let cli = parse(&[
            "3", "3", "3", "--max-workers", "1", "--gate", "spin", "--rng", "chacha", "--seed",
            "9", "--work-delay-ms", "250", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.max_workers, 1);
        assert_eq!(cli.gate, GateKind::Spin);
        assert_eq!(cli.rng, RngKind::Chacha);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.work_delay(), Duration::from_millis(250));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = parse(&["2", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["2", "3", "4", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_non_numeric_and_zero_rejected() {
        for bad in [["2", "x", "4"], ["2", "3", "0"], ["2", "3.5", "4"]] {
            let err = parse(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{bad:?}");
        }
        let err = parse(&["2", "2", "2", "--max-workers", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
