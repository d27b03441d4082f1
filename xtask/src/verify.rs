//! Independent check of a `cellmul` printout: parse the three matrices back
//! out of stdout and recompute the product serially.

use anyhow::{anyhow, bail, Context, Result};
use foundation::{Element, Matrix, Shape};

/// Lines after `header` up to the next blank line.
fn section<'a>(stdout: &'a str, header: &str) -> Result<String> {
    let mut lines = stdout.lines().skip_while(|l| l.trim() != header);
    if lines.next().is_none() {
        bail!("`{header}` not found in output");
    }
    Ok(lines
        .take_while(|l| !l.trim().is_empty())
        .collect::<Vec<&'a str>>()
        .join("\n"))
}

/// Parses `{{1,2},\n{3,4}}`.
pub fn parse_wolfram(text: &str) -> Result<Matrix> {
    let flat: String = text.split_whitespace().collect();
    let inner = flat
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .ok_or_else(|| anyhow!("not a nested brace matrix: {flat:?}"))?;
    let rows = inner
        .split("},{")
        .map(|row| {
            row.split(',')
                .map(|v| {
                    v.parse::<Element>()
                        .with_context(|| format!("bad cell {v:?}"))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Matrix::from_rows(rows)?)
}

pub struct Printout {
    pub a: Matrix,
    pub b: Matrix,
    pub result: Matrix,
}

pub fn parse_printout(stdout: &str) -> Result<Printout> {
    Ok(Printout {
        a: parse_wolfram(&section(stdout, "matrix A:")?).context("matrix A")?,
        b: parse_wolfram(&section(stdout, "matrix B:")?).context("matrix B")?,
        result: parse_wolfram(&section(stdout, "result matrix:")?).context("result matrix")?,
    })
}

fn serial_product(a: &Matrix, b: &Matrix) -> Matrix {
    let mut c = Matrix::zeroed(Shape::new(a.rows(), b.cols()));
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let sum = (0..a.cols())
                .filter_map(|k| Some(a.get(i, k)? * b.get(k, j)?))
                .sum();
            c.set(i, j, sum);
        }
    }
    c
}

/// Checks shapes against `dims` and the printed result against a serial product.
pub fn check(printout: &Printout, dims: [usize; 3]) -> Result<()> {
    let [rows_a, cols_a, cols_b] = dims;
    let Printout { a, b, result } = printout;
    if a.shape() != Shape::new(rows_a, cols_a) || b.shape() != Shape::new(cols_a, cols_b) {
        bail!("printed shapes {} and {} do not match {dims:?}", a.shape(), b.shape());
    }
    let expected = serial_product(a, b);
    if *result != expected {
        bail!(
            "result mismatch\nexpected:\n{}\nprinted:\n{}",
            engine::render::wolfram(&expected),
            engine::render::wolfram(result)
        );
    }
    Ok(())
}
