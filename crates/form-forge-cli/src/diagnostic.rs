use form_forge_dsl::{Recovery, RecoveryKind};
use miette::{Diagnostic, NamedSource, SourceSpan};

/// A parser recovery rendered with miette source highlighting.
///
/// Recoveries are warnings: the conversion still produced a document.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(severity(Warning))]
pub struct RecoveryDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

fn label_and_help(kind: &RecoveryKind) -> (&'static str, Option<String>) {
    match kind {
        RecoveryKind::MalformedLine => (
            "skipped",
            Some("Expected 'object', 'inherited', 'inline', 'end' or 'Name = value'.".to_string()),
        ),
        RecoveryKind::UnmatchedEnd => (
            "nothing to close",
            Some("Remove the extra 'end' or add the missing declaration.".to_string()),
        ),
        RecoveryKind::UnterminatedSpan { name } => (
            "opened here",
            Some(format!("Add an 'end' line to close '{name}'.")),
        ),
        RecoveryKind::UnterminatedProperty { key } => (
            "value starts here",
            Some(format!(
                "Close the '{key}' value with the matching ')', '>' or '}}'."
            )),
        ),
        RecoveryKind::DuplicateComponent { name } => (
            "already declared above",
            Some(format!("Rename one of the '{name}' components; the first is kept.")),
        ),
        RecoveryKind::ShortRow { section, .. } => (
            "too few columns",
            Some(format!("Add the missing '|'-separated columns to this [{section}] row.")),
        ),
        RecoveryKind::RowOutsideSection => (
            "no section",
            Some("Put a [fields], [validations] or [entities] header above this row.".to_string()),
        ),
        RecoveryKind::UnknownSection { .. } => (
            "unknown header",
            Some("Known sections are [fields], [validations] and [entities].".to_string()),
        ),
        RecoveryKind::UnrecognizedShape => (
            "metadata starts here",
            Some(
                "Use [fields]/[validations]/[entities] sections or Operators/Types declarations."
                    .to_string(),
            ),
        ),
        _ => ("here", None),
    }
}

/// Convert a `Recovery` into a miette `RecoveryDiagnostic`.
pub fn recovery_to_diagnostic(
    recovery: &Recovery,
    source: &str,
    filename: &str,
) -> RecoveryDiagnostic {
    let (label, suggestion) = label_and_help(&recovery.kind);
    let start = recovery.span.start.min(source.len());
    let end = recovery.span.end.clamp(start, source.len());

    RecoveryDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span: (start, end - start).into(),
        message: format!("line {}: {}", recovery.line, recovery.kind),
        label: label.to_string(),
        suggestion,
    }
}

/// Render all recoveries for a file using miette.
pub fn render_recoveries(
    recoveries: &[Recovery],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    recoveries
        .iter()
        .map(|r| miette::Report::new(recovery_to_diagnostic(r, source, filename)))
        .collect()
}
