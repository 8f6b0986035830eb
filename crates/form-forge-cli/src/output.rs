use std::path::Path;

use console::Term;
use form_forge_core::types::FormDocument;
use form_forge_gen::Conversion;

use crate::cli::GlobalOpts;
use crate::commands::recoveries_json;
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    fn from_format(format: &str) -> Self {
        match format {
            "json" => Self::Json,
            "plain" => Self::Plain,
            _ => Self::Human,
        }
    }
}

/// Output context derived from global flags.
///
/// The form document, inspection listings and answers go to stdout.
/// Status, warnings and errors go to stderr, so `convert` can be piped
/// into another tool in every mode. `--quiet` silences stderr chatter but
/// never the document itself.
pub struct OutputContext {
    pub mode: OutputMode,
    pub verbose: u8,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    pub fn from_global(global: &GlobalOpts) -> Self {
        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode: OutputMode::from_format(&global.format),
            verbose: global.verbose,
            quiet: global.quiet,
            use_color,
        }
    }

    /// Serializes a form document for this mode.
    ///
    /// Plain mode is line-oriented, so the document is always compact there.
    pub fn document_text(&self, document: &FormDocument, pretty: bool) -> Result<String, CliError> {
        let rendered = if pretty && self.mode != OutputMode::Plain {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        rendered.map_err(|e| CliError::Other(format!("failed to serialize form document: {e}")))
    }

    /// Writes a form document to `destination`, or to stdout when there is none.
    pub fn emit_document(
        &self,
        document: &FormDocument,
        pretty: bool,
        destination: Option<&Path>,
    ) -> Result<(), CliError> {
        let text = self.document_text(document, pretty)?;
        match destination {
            Some(path) => std::fs::write(path, format!("{text}\n")).map_err(|e| CliError::Io {
                path: path.to_path_buf(),
                source: e,
            }),
            None => {
                println!("{text}");
                Ok(())
            }
        }
    }

    /// Reports what a conversion produced.
    ///
    /// In JSON mode the summary object goes to stdout, but only when the
    /// document itself went to a file.
    pub fn conversion_summary(&self, conversion: &Conversion, written_to: Option<&Path>) {
        let report = &conversion.report;
        let document = &conversion.document;

        if report.unresolved_lookups > 0 {
            self.warn(&format!(
                "{} lookup field(s) have no entity in the metadata",
                report.unresolved_lookups
            ));
        }

        match self.mode {
            OutputMode::Json => {
                if written_to.is_some() {
                    self.print_json(&conversion_summary_json(conversion, written_to));
                }
            }
            OutputMode::Plain => {
                if !self.quiet {
                    eprintln!(
                        "converted\t{}\t{}\t{}\t{}",
                        document.id,
                        report.fields_generated,
                        document.validations.len(),
                        report.components_found
                    );
                }
            }
            OutputMode::Human => {
                let target = written_to.map_or(String::new(), |p| format!(" -> {}", p.display()));
                self.success(&format!(
                    "{}: {} field(s), {} validation(s) from {} component(s){target}",
                    document.id,
                    report.fields_generated,
                    document.validations.len(),
                    report.components_found,
                ));
                self.detail(&format!("metadata shape: {}", report.metadata_shape));
                self.detail(&format!(
                    "skipped components: {}, implicit validations: {}, explicit validations: {}",
                    report.components_skipped,
                    report.implicit_validations,
                    report.explicit_validations
                ));
            }
        }
    }

    /// Prints an assistant answer to stdout.
    pub fn print_answer(&self, assistant: &str, question: &str, answer: &str) {
        match self.mode {
            OutputMode::Json => self.print_json(&serde_json::json!({
                "assistant": assistant,
                "question": question,
                "answer": answer,
            })),
            OutputMode::Human | OutputMode::Plain => println!("{answer}"),
        }
    }

    /// Print a success message to stderr (human mode only, not in quiet mode).
    pub fn success(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        if self.use_color {
            let style = console::Style::new().green().bold();
            eprintln!("{} {}", style.apply_to("ok"), msg);
        } else {
            eprintln!("ok {msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human if self.use_color => {
                let style = console::Style::new().yellow().bold();
                eprintln!("{} {}", style.apply_to("warning:"), msg);
            }
            OutputMode::Human => eprintln!("warning: {msg}"),
            OutputMode::Json => eprintln!("{}", serde_json::json!({ "warning": msg })),
            OutputMode::Plain => eprintln!("warning\t{msg}"),
        }
    }

    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human if self.use_color => {
                let style = console::Style::new().red().bold();
                eprintln!("{} {}", style.apply_to("error:"), err);
            }
            OutputMode::Human => eprintln!("error: {err}"),
            OutputMode::Json => eprintln!("{}", err.to_json()),
            OutputMode::Plain => eprintln!("error\t{err}"),
        }
    }

    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Print a status message to stderr (human mode only, not in quiet mode).
    pub fn status(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("{msg}");
    }

    /// Print a dimmed detail line to stderr when `-v` is given.
    pub fn detail(&self, msg: &str) {
        if self.verbose == 0 || self.quiet || self.mode != OutputMode::Human {
            return;
        }
        if self.use_color {
            eprintln!("  {}", console::Style::new().dim().apply_to(msg));
        } else {
            eprintln!("  {msg}");
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && self.mode == OutputMode::Human && Term::stderr().is_term()
    }
}

/// The machine-readable record of one conversion.
pub fn conversion_summary_json(
    conversion: &Conversion,
    written_to: Option<&Path>,
) -> serde_json::Value {
    serde_json::json!({
        "form": conversion.document.id,
        "output": written_to.map(|p| p.display().to_string()),
        "report": conversion.report,
        "definitionRecoveries": recoveries_json(&conversion.definition_recoveries),
        "metadataRecoveries": recoveries_json(&conversion.metadata_recoveries),
    })
}
