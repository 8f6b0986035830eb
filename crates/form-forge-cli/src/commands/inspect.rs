use std::path::Path;

use form_forge_core::{map_widget_class, InputKind};
use form_forge_dsl::{parse_definition, parse_metadata, ParsedDefinition, ParsedMetadata};
use form_forge_gen::assembler::FALLBACK_FORM_ID;
use form_forge_gen::{component_label, resolve_form_id};

use crate::cli::{GlobalOpts, InspectArgs};
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::{discover_definition_files, read_text, recoveries_json, report_recoveries};

/// Run the `inspect` command: list components and their canonical types.
pub async fn run(
    args: InspectArgs,
    _global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let files = discover_definition_files(&args.paths)?;
    let detailed = args.diagnostics || output.verbose > 0;

    let mut results: Vec<serde_json::Value> = Vec::new();
    let mut total_components = 0usize;
    let mut total_recoveries = 0usize;

    for file in &files {
        let source = read_text(file, InputKind::Definition)?;
        let parsed = parse_definition(&source);
        total_components += parsed.components.len();
        total_recoveries += parsed.recoveries.len();

        report_recoveries(&parsed.recoveries, &source, file, detailed, output);

        match output.mode {
            OutputMode::Human => print_human(file, &parsed),
            OutputMode::Plain => print_plain(file, &parsed),
            OutputMode::Json => results.push(definition_json(file, &parsed)),
        }
    }

    let metadata = match &args.metadata {
        Some(path) => {
            let source = read_text(path, InputKind::Metadata)?;
            let parsed = parse_metadata(&source);
            total_recoveries += parsed.recoveries.len();
            report_recoveries(&parsed.recoveries, &source, path, detailed, output);
            Some((path.as_path(), parsed))
        }
        None => None,
    };

    match output.mode {
        OutputMode::Human => {
            if let Some((path, meta)) = &metadata {
                println!("{}", metadata_line(path, meta));
            }
            let summary = format!(
                "{total_components} component(s) in {} file(s), {total_recoveries} recovered line(s)",
                files.len()
            );
            if total_recoveries > 0 {
                output.warn(&summary);
            } else {
                output.success(&summary);
            }
        }
        OutputMode::Plain => {
            if let Some((path, meta)) = &metadata {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    path.display(),
                    meta.shape,
                    meta.fields().len(),
                    meta.validations().len(),
                    meta.entities().len()
                );
            }
        }
        OutputMode::Json => {
            let summary = serde_json::json!({
                "files": files.len(),
                "components": total_components,
                "recoveries": total_recoveries,
                "definitions": results,
                "metadata": metadata.as_ref().map(|(path, meta)| metadata_json(path, meta)),
            });
            output.print_json(&summary);
        }
    }

    Ok(())
}

fn form_name(parsed: &ParsedDefinition) -> String {
    let id = resolve_form_id(&parsed.form, "");
    if id == FALLBACK_FORM_ID {
        "(no form header)".to_string()
    } else {
        id
    }
}

fn print_human(file: &Path, parsed: &ParsedDefinition) {
    println!(
        "{} .... form {}, {} component(s)",
        file.display(),
        form_name(parsed),
        parsed.components.len()
    );
    for component in &parsed.components {
        let canonical = map_widget_class(&component.declared_type);
        let marker = if canonical.produces_field() { " " } else { "-" };
        println!(
            "  {marker} {:<24} {:<24} {:<10} {}",
            component.name,
            component.declared_type,
            canonical.as_str(),
            component_label(component)
        );
    }
}

fn print_plain(file: &Path, parsed: &ParsedDefinition) {
    for component in &parsed.components {
        println!(
            "{}\t{}\t{}\t{}",
            file.display(),
            component.name,
            component.declared_type,
            map_widget_class(&component.declared_type)
        );
    }
}

fn definition_json(file: &Path, parsed: &ParsedDefinition) -> serde_json::Value {
    let components: Vec<serde_json::Value> = parsed
        .components
        .iter()
        .map(|c| {
            let canonical = map_widget_class(&c.declared_type);
            serde_json::json!({
                "name": c.name,
                "class": c.declared_type,
                "type": canonical.as_str(),
                "producesField": canonical.produces_field(),
                "label": component_label(c),
                "properties": c.properties.len(),
            })
        })
        .collect();

    serde_json::json!({
        "file": file.display().to_string(),
        "form": parsed.form.name,
        "caption": parsed.form.caption(),
        "components": components,
        "recoveries": recoveries_json(&parsed.recoveries),
    })
}

fn metadata_line(path: &Path, meta: &ParsedMetadata) -> String {
    format!(
        "{} .... {} metadata: {} field(s), {} validation(s), {} entit(y/ies), {} operator(s)",
        path.display(),
        meta.shape,
        meta.fields().len(),
        meta.validations().len(),
        meta.entities().len(),
        meta.operators().len()
    )
}

fn metadata_json(path: &Path, meta: &ParsedMetadata) -> serde_json::Value {
    serde_json::json!({
        "file": path.display().to_string(),
        "shape": meta.shape.as_str(),
        "fields": meta.fields().len(),
        "validations": meta.validations().len(),
        "entities": meta.entities().len(),
        "operators": meta.operators().len(),
        "recoveries": recoveries_json(&meta.recoveries),
    })
}
