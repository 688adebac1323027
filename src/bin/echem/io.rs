use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use emergent_chem::PeriodicTable;
use emergent_chem::io::{default_table, read_element_table};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// The element table at `path`, or the embedded one.
pub fn load_table(path: Option<&Path>) -> Result<Arc<PeriodicTable>> {
    match path {
        Some(path) => {
            let table = read_element_table(path)
                .with_context(|| format!("Failed to load element table: {}", path.display()))?;
            Ok(Arc::new(table))
        }
        None => Ok(default_table()),
    }
}
