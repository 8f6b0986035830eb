pub mod ask;
pub mod completions;
pub mod convert;
pub mod inspect;

use std::path::{Path, PathBuf};

use form_forge_core::{ConvertError, InputKind};
use form_forge_dsl::Recovery;

use crate::diagnostic::render_recoveries;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode an input file as UTF-8 text with any byte-order mark removed.
///
/// Recovery spans are relative to the text returned here.
pub fn read_text(path: &Path, input: InputKind) -> Result<String, CliError> {
    let bytes = read_input(path)?;
    let text = String::from_utf8(bytes).map_err(|e| CliError::Encoding {
        file: path.to_path_buf(),
        source: ConvertError::invalid_encoding(input, &e.utf8_error()),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Report the lines a parser skipped or repaired in `file`.
///
/// With `detailed`, each recovery is shown; otherwise a one-line summary.
/// JSON mode stays silent here and callers embed recoveries in their output.
pub fn report_recoveries(
    recoveries: &[Recovery],
    source: &str,
    file: &Path,
    detailed: bool,
    output: &OutputContext,
) {
    if recoveries.is_empty() || output.quiet {
        return;
    }
    let filename = file.display().to_string();

    match output.mode {
        OutputMode::Human if detailed => {
            for report in render_recoveries(recoveries, source, &filename) {
                eprintln!("{report:?}");
            }
        }
        OutputMode::Plain if detailed => {
            for recovery in recoveries {
                eprintln!("{filename}\t{}\t{}", recovery.line, recovery.kind);
            }
        }
        OutputMode::Json => {}
        _ => output.warn(&format!(
            "{filename}: {} line(s) skipped or repaired (rerun with -v for details)",
            recoveries.len()
        )),
    }
}

/// Recoveries as JSON objects for `--format json` output.
pub fn recoveries_json(recoveries: &[Recovery]) -> Vec<serde_json::Value> {
    recoveries
        .iter()
        .map(|r| {
            serde_json::json!({
                "line": r.line,
                "start": r.span.start,
                "end": r.span.end,
                "message": r.kind.to_string(),
            })
        })
        .collect()
}

/// Discover definition files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files matching `**/*.dfm`).
pub fn discover_definition_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = format!("{}/**/*.dfm", path.display());
            let entries = glob::glob(&pattern).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoDefinitionFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        return Err(CliError::NoDefinitionFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    Ok(files)
}
