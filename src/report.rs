//! Plain-text rendering of the training set and the classified queries.

use std::fmt::Display;
use std::io::{self, Write};

use crate::common_types::LabeledPoint;

pub const TRAIN_HEADER: &str = "TRAIN (features + label):";
pub const TEST_HEADER: &str = "TEST (features + predicted label):";

/// Writes both sections. Each row lists the features, then the label, every value
/// followed by a single space.
pub fn write_report<W, F>(
    out: &mut W,
    train: &[LabeledPoint<F>],
    results: &[LabeledPoint<F>],
) -> io::Result<()>
where
    W: Write,
    F: Display,
{
    writeln!(out, "{}", TRAIN_HEADER)?;
    write_rows(out, train)?;

    writeln!(out)?;
    writeln!(out, "{}", TEST_HEADER)?;
    write_rows(out, results)?;
    out.flush()
}

fn write_rows<W: Write, F: Display>(out: &mut W, rows: &[LabeledPoint<F>]) -> io::Result<()> {
    for row in rows {
        for v in &row.features {
            write!(out, "{} ", v)?;
        }
        writeln!(out, "{} ", row.label)?;
    }
    Ok(())
}
