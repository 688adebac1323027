use std::io::{self, Write};

use anyhow::Error;
use emergent_chem::io::PRESET_NAMES;
use emergent_chem::{IoError, SimError};

use super::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Vec<String> {
    let mut hints = Vec::new();

    if let Some(io_err) = err.downcast_ref::<IoError>() {
        io_hints(io_err, &mut hints);
    } else if let Some(sim_err) = err.downcast_ref::<SimError>() {
        sim_hints(sim_err, &mut hints);
    } else if let Some(std_err) = err.downcast_ref::<std::io::Error>() {
        std_io_hints(std_err, &mut hints);
    }

    hints
}

fn io_hints(err: &IoError, hints: &mut Vec<String>) {
    match err {
        IoError::Io { source } => std_io_hints(source, hints),
        IoError::ElementTable(_) => {
            hints.push("The element table must be a JSON object keyed by symbol".into());
            hints.push("Omit --elements to use the embedded table".into());
        }
        IoError::Scenario(_) => {
            hints.push("Scenarios list atoms as [[atom]] tables with element and position".into());
            hints.push("Positions are three numbers in Å, e.g. position = [0.0, 1.0, 0.0]".into());
        }
        IoError::UnknownElement(name) => {
            hints.push(format!("'{}' is not in the loaded element table", name));
            hints.push("Run `echem elements` to list the known elements".into());
        }
        IoError::UnknownPreset { .. } => {
            hints.push(format!("Available presets: {}", PRESET_NAMES.join(", ")));
        }
        IoError::InvalidAtom { .. } => {
            hints.push("Coordinates must be finite numbers".into());
        }
        IoError::Simulation(inner) => sim_hints(inner, hints),
    }
}

fn sim_hints(err: &SimError, hints: &mut Vec<String>) {
    match err {
        SimError::ParameterParse(_) => {
            hints.push("Parameter files use [force_field], [bonding] and [integrator] tables".into());
            hints.push("Missing keys fall back to their defaults".into());
        }
        SimError::InvalidParameter { name, .. } => {
            hints.push(format!("Check the value of '{}' in the parameter file", name));
        }
        SimError::UnknownElement(z) => {
            hints.push(format!("Atomic number {} is missing from the element table", z));
            hints.push("Run `echem elements` to list the known elements".into());
        }
        SimError::InvalidTimestep(_) => {
            hints.push("Pass a positive --dt in fs; 0.5 to 2.0 is typical".into());
        }
    }
}

fn std_io_hints(err: &std::io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::NotFound => {
            hints.push("File or directory not found".into());
            hints.push("Check the path spelling and ensure the file exists".into());
        }
        ErrorKind::PermissionDenied => {
            hints.push("Permission denied accessing the file".into());
            hints.push("Check file permissions with `ls -la`".into());
        }
        ErrorKind::WriteZero | ErrorKind::StorageFull => {
            hints.push("Failed to write data; check available disk space".into());
        }
        ErrorKind::BrokenPipe => {
            hints.push("The output consumer terminated early".into());
        }
        _ => {
            hints.push("Check file path, permissions, and disk space".into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn preset_errors_list_the_presets() {
        let err = Error::new(IoError::UnknownPreset {
            name: "benzene".into(),
            available: PRESET_NAMES.join(", "),
        });
        let hints = collect_hints(&err);
        assert!(hints.iter().any(|h| h.contains("water")));
    }

    #[test]
    fn hints_see_through_context() {
        let result: Result<(), SimError> = Err(SimError::InvalidTimestep(-1.0));
        let err = result.context("Integration failed").unwrap_err();
        let hints = collect_hints(&err);
        assert!(hints.iter().any(|h| h.contains("--dt")));
    }

    #[test]
    fn nested_simulation_errors_get_simulation_hints() {
        let err = Error::new(IoError::Simulation(SimError::UnknownElement(120)));
        let hints = collect_hints(&err);
        assert!(hints.iter().any(|h| h.contains("120")));
    }

    #[test]
    fn missing_files_get_io_hints() {
        let err = Error::new(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!collect_hints(&err).is_empty());
    }
}
