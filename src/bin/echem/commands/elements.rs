use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::ElementsArgs;
use crate::display::print_element_table;
use crate::io::load_table;

pub fn run_elements(args: ElementsArgs) -> Result<()> {
    let table = load_table(args.elements.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_element_table(&mut out, &table).context("Failed to write element listing")?;
    out.flush()?;
    Ok(())
}
