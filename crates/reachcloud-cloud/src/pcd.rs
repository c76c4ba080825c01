//! PCD v0.7 ASCII serialization of pose samples.
//!
//! The layout is fixed; consumers depend on exact line order and field
//! names:
//!
//! ```text
//! VERSION 0.7
//! FIELDS x y z normal_x normal_y normal_z curvature
//! SIZE 4 4 4 4 4 4 4
//! TYPE F F F F F F F
//! COUNT 1 1 1 1 1 1 1
//! WIDTH <N>
//! HEIGHT 1
//! VIEWPOINT 0 0 0 1 0 0 0
//! POINTS <N>
//! DATA ascii
//! <x> <y> <z> <nx> <ny> <nz> 0        (one line per sample)
//! ```
//!
//! Numbers use `f64` `Display`: the shortest decimal representation that
//! round-trips the exact value. The writer never flushes or closes the
//! sink (its lifecycle belongs to the caller), and a failed write leaves
//! the record truncated; output is not atomic.

use std::io::Write;

use crate::sample::PoseSample;

/// Number of header lines before the data section.
pub const HEADER_LINES: usize = 10;

/// Serialize `samples` as a complete PCD v0.7 ASCII record.
///
/// One data line per sample in sequence order. The trailing `0` per line
/// is the curvature placeholder required by the `normal_curvature` field
/// layout; it carries no sampled meaning.
///
/// # Errors
///
/// Forwards the first sink write failure; the record is left truncated.
pub fn write_ascii<W: Write>(samples: &[PoseSample], sink: &mut W) -> std::io::Result<()> {
    let count = samples.len();
    writeln!(sink, "VERSION 0.7")?;
    writeln!(sink, "FIELDS x y z normal_x normal_y normal_z curvature")?;
    writeln!(sink, "SIZE 4 4 4 4 4 4 4")?;
    writeln!(sink, "TYPE F F F F F F F")?;
    writeln!(sink, "COUNT 1 1 1 1 1 1 1")?;
    writeln!(sink, "WIDTH {count}")?;
    writeln!(sink, "HEIGHT 1")?;
    writeln!(sink, "VIEWPOINT 0 0 0 1 0 0 0")?;
    writeln!(sink, "POINTS {count}")?;
    writeln!(sink, "DATA ascii")?;

    for sample in samples {
        writeln!(
            sink,
            "{} {} {} {} {} {} 0",
            sample.position.x,
            sample.position.y,
            sample.position.z,
            sample.normal.x,
            sample.normal.y,
            sample.normal.z,
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
