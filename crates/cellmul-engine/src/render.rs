//! Text rendering in the nested-brace form Wolfram Alpha accepts:
//! `{{1,2},` / `{3,4}}`, one row per line.

use core::fmt;

use foundation::Matrix;

pub struct Wolfram<'a>(pub &'a Matrix);

impl fmt::Display for Wolfram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        f.write_str("{")?;
        for (r, row) in m.rows_iter().enumerate() {
            f.write_str("{")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("}")?;
            if r + 1 == m.rows() {
                f.write_str("}")?;
            } else {
                f.write_str(",\n")?;
            }
        }
        Ok(())
    }
}

pub fn wolfram(m: &Matrix) -> String {
    Wolfram(m).to_string()
}

/// The three-matrix block printed after a run.
pub fn report(a: &Matrix, b: &Matrix, result: &Matrix) -> String {
    format!(
        "\nmatrix A:\n{}\n\nmatrix B:\n{}\n\nresult matrix:\n{}\n\n",
        Wolfram(a),
        Wolfram(b),
        Wolfram(result)
    )
}
