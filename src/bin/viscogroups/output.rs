use std::io::{self, Write};

use viscogroups::{Error, Report, ResolutionError, TableError};

pub fn print_report(report: &Report) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if report.smiles != report.input {
        writeln!(stdout, "# {} -> {}", report.input, report.smiles)?;
    }
    for group in &report.groups {
        writeln!(stdout, "{}", group)?;
    }
    for atom in &report.classification.unclassified {
        writeln!(stdout, "# unclassified {}", atom)?;
    }
    Ok(())
}

pub fn print_error(err: &anyhow::Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error: {}", err);
    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "  caused by: {}", cause);
    }
    if let Some(hint) = hint_for(err) {
        let _ = writeln!(stderr, "  hint: {}", hint);
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| match cause.downcast_ref::<Error>()? {
        Error::Table(TableError::Io { .. }) => {
            Some("point --table (or group_table in the settings file) at the coefficient CSV")
        }
        Error::Resolution(ResolutionError::NoResolver(_)) => {
            Some("pass --aliases with a cas,smiles table or --online, or give the SMILES directly")
        }
        Error::Resolution(ResolutionError::Http { .. }) => {
            Some("the structure resolver is unreachable; pass --aliases for offline lookup")
        }
        _ => None,
    })
}
