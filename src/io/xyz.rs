use super::error::Error;
use crate::model::atom::Atom;
use std::io::Write;

/// Appends one XYZ frame: atom count, a single-line comment, then one line per atom.
///
/// Frames written back to back to the same sink form a multi-frame trajectory.
///
/// # Arguments
///
/// * `writer` - Destination for the frame.
/// * `atoms` - Atoms to write, in index order.
/// * `comment` - Comment line; line breaks are replaced with spaces.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn write_frame<W: Write>(mut writer: W, atoms: &[Atom], comment: &str) -> Result<(), Error> {
    writeln!(writer, "{}", atoms.len())?;
    writeln!(writer, "{}", comment.replace(['\n', '\r'], " "))?;
    for atom in atoms {
        writeln!(
            writer,
            "{:<3} {:>14.6} {:>14.6} {:>14.6}",
            atom.symbol(),
            atom.position.x,
            atom.position.y,
            atom.position.z
        )?;
    }
    Ok(())
}
