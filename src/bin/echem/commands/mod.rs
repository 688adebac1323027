mod elements;
mod run;

use elements::run_elements;
use run::run_simulation;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Run(args) => run_simulation(args, ctx),
        Command::Elements(args) => run_elements(args),
    }
}
