use form_forge_core::InputKind;

use crate::cli::{ConvertArgs, GlobalOpts};
use crate::config::load_config;
use crate::error::CliError;
use crate::output::OutputContext;

use super::{read_text, report_recoveries};

/// Run the `convert` command: definition + metadata in, form document out.
pub async fn run(
    args: ConvertArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;

    let definition = read_text(&args.definition, InputKind::Definition)?;
    let metadata = match &args.metadata {
        Some(path) => read_text(path, InputKind::Metadata)?,
        None => String::new(),
    };
    let form_id = args
        .form_id
        .clone()
        .unwrap_or_else(|| config.convert.form_id.clone());

    let conversion = form_forge_gen::convert(&definition, &metadata, &form_id);

    let detailed = output.verbose > 0;
    report_recoveries(
        &conversion.definition_recoveries,
        &definition,
        &args.definition,
        detailed,
        output,
    );
    if let Some(path) = &args.metadata {
        report_recoveries(
            &conversion.metadata_recoveries,
            &metadata,
            path,
            detailed,
            output,
        );
    }

    let pretty = config.convert.pretty && !args.compact;
    output.emit_document(&conversion.document, pretty, args.output.as_deref())?;
    output.conversion_summary(&conversion, args.output.as_deref());
    Ok(())
}
