use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use emergent_chem::io::{Format, Scenario, preset, read_scenario, sdf, xyz};
use emergent_chem::{Simulation, SimulationParams, get_default_parameters, load_parameters};

use crate::cli::RunArgs;
use crate::display::{
    Context as DisplayContext, Progress, print_energy_report, print_molecules, print_reactions,
    print_run_summary,
};
use crate::io::{create_output, load_table, read_text};

const TOTAL_STAGES: u8 = 3;
const DEFAULT_PRESET: &str = "demo";
const PROGRESS_INTERVAL: u64 = 50;
const REACTION_ROWS: usize = 12;

pub fn run_simulation(args: RunArgs, ctx: DisplayContext) -> Result<()> {
    if !args.engine.dt.is_finite() || args.engine.dt <= 0.0 {
        bail!("--dt must be a positive number of femtoseconds, got {}", args.engine.dt);
    }
    if args.output.every == 0 {
        bail!("--every must be at least 1");
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STAGES);

    progress.stage("Building scenario");
    let table = load_table(args.source.elements.as_deref())?;
    let params = load_params(args.engine.params.as_deref())?;
    let mut scenario = load_scenario(&args)?;
    if let Some(temperature) = args.engine.temperature {
        scenario.temperature = Some(temperature);
    }

    let mut sim = Simulation::new(table, params).context("Invalid simulation parameters")?;
    scenario.apply(&mut sim).context("Failed to build the initial state")?;

    let scenario_details = vec![
        format!(
            "Scenario '{}' with {} atoms",
            scenario.name.as_deref().unwrap_or("unnamed"),
            sim.atoms().len()
        ),
        format!("Setpoint {:.1} K", sim.temperature()),
        format!("{} initial bonds", sim.bond_count()),
    ];
    progress.complete_stage("Building scenario", &scenario_details);

    let steps = args.engine.steps;
    progress.counted_stage("Integrating", steps);
    let frames = integrate(&mut sim, &args, &progress)?;

    let mut integration_details = vec![format!(
        "{} steps of {} fs ({:.1} fs simulated)",
        sim.step_count(),
        args.engine.dt,
        sim.time()
    )];
    if let Some(path) = &args.output.output {
        integration_details.push(format!(
            "{} {} frames → {}",
            frames,
            Format::Xyz,
            path.display()
        ));
    }
    progress.complete_stage("Integrating", &integration_details);

    progress.stage("Writing snapshot");
    let mut snapshot_details = Vec::new();
    if let Some(path) = &args.output.sdf {
        let title = format!("{} at {:.1} fs", scenario.name.as_deref().unwrap_or("snapshot"), sim.time());
        let mut writer = create_output(path)?;
        sdf::write(&mut writer, sim.atoms(), &title)
            .with_context(|| format!("Failed to write {} snapshot", Format::Sdf))?;
        writer.flush()?;
        snapshot_details.push(format!("{} → {}", Format::Sdf, path.display()));
    } else {
        snapshot_details.push("No snapshot requested".to_string());
    }
    progress.complete_stage("Writing snapshot", &snapshot_details);

    progress.finish();

    if ctx.interactive {
        print_energy_report(&sim);
        print_molecules(&sim);
        print_reactions(sim.reaction_log(), REACTION_ROWS);
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print_run_summary(&mut out, &sim)?;
    }

    Ok(())
}

/// Advances the simulation, writing trajectory frames as it goes. Returns the frame count.
fn integrate(sim: &mut Simulation, args: &RunArgs, progress: &Progress) -> Result<u64> {
    let mut trajectory = args.output.output.as_deref().map(create_output).transpose()?;
    let every = args.output.every;
    let mut frames = 0;

    let mut write_frame = |sim: &Simulation, frames: &mut u64| -> Result<()> {
        if let Some(writer) = trajectory.as_mut() {
            let comment = format!(
                "step={} time={:.3} fs T={:.2} K",
                sim.step_count(),
                sim.time(),
                sim.instantaneous_temperature()
            );
            xyz::write_frame(&mut *writer, sim.atoms(), &comment)
                .with_context(|| format!("Failed to write {} frame", Format::Xyz))?;
            *frames += 1;
        }
        Ok(())
    };

    write_frame(&*sim, &mut frames)?;
    for step in 1..=args.engine.steps {
        sim.step(args.engine.dt).context("Integration failed")?;
        if step % every == 0 {
            write_frame(&*sim, &mut frames)?;
        }
        if step % PROGRESS_INTERVAL == 0 || step == args.engine.steps {
            progress.advance(
                step,
                &format!("{} bonds · {:.0} K", sim.bond_count(), sim.instantaneous_temperature()),
            );
        }
    }

    if let Some(mut writer) = trajectory {
        writer.flush()?;
    }
    Ok(frames)
}

fn load_params(path: Option<&Path>) -> Result<SimulationParams> {
    match path {
        Some(path) => {
            let text = read_text(path)?;
            load_parameters(Some(text.as_str()))
                .with_context(|| format!("Failed to load parameters: {}", path.display()))
        }
        None => Ok(get_default_parameters().clone()),
    }
}

fn load_scenario(args: &RunArgs) -> Result<Scenario> {
    if let Some(path) = &args.source.scenario {
        return read_scenario(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()));
    }
    let name = args.source.preset.as_deref().unwrap_or(DEFAULT_PRESET);
    Ok(preset(name)?)
}
