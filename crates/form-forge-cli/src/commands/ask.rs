use std::path::Path;

use console::Term;
use form_forge_ai::{answer_or_message, Assistant, ChatCompletionsAssistant, OfflineAssistant};
use form_forge_core::types::FormDocument;
use form_forge_core::InputKind;

use crate::cli::{AskArgs, GlobalOpts, Provider};
use crate::config::{load_config, resolve_assistant, AssistantParams, CliConfig};
use crate::error::CliError;
use crate::output::OutputContext;
use crate::progress;

use super::read_text;

/// Run the `ask` command.
///
/// Assistant failures are printed as the answer and never fail the
/// command.
pub async fn run(
    args: AskArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let params = resolve_assistant(&config, &args);
    let context = load_context(&args, &config)?;
    let assistant = build_assistant(params, &config, output);

    if let Some(question) = &args.question {
        ask_once(assistant.as_ref(), question, context.as_ref(), output).await;
        return Ok(());
    }

    if !Term::stderr().is_term() {
        return Err(CliError::Other(
            "no question given and the terminal is not interactive".to_string(),
        ));
    }

    output.status("Ask about the form; an empty line or 'exit' ends the session.");
    loop {
        let question: String = dialoguer::Input::new()
            .with_prompt("ask")
            .allow_empty(true)
            .interact_text()
            .map_err(|_| CliError::Cancelled)?;
        let question = question.trim();
        if question.is_empty() || question.eq_ignore_ascii_case("exit") {
            break;
        }
        ask_once(assistant.as_ref(), question, context.as_ref(), output).await;
    }
    Ok(())
}

async fn ask_once(
    assistant: &dyn Assistant,
    question: &str,
    context: Option<&FormDocument>,
    output: &OutputContext,
) {
    let spinner = if output.show_progress() {
        Some(progress::create_spinner(&format!(
            "Asking the {} assistant...",
            assistant.name()
        )))
    } else {
        None
    };

    let answer = answer_or_message(assistant, question, context).await;

    if let Some(sp) = &spinner {
        progress::clear_spinner(sp);
    }

    output.print_answer(assistant.name(), question, &answer);
}

/// Pick the assistant for `params`.
///
/// A chat-completions provider without an API key falls back to the
/// offline assistant with a warning.
fn build_assistant(
    params: AssistantParams,
    config: &CliConfig,
    output: &OutputContext,
) -> Box<dyn Assistant> {
    match params.provider {
        Provider::Offline => Box::new(OfflineAssistant),
        Provider::Openai if params.settings.api_key.is_none() => {
            output.warn(&format!(
                "{} is not set; answering with the offline assistant",
                config.assistant.api_key_env
            ));
            Box::new(OfflineAssistant)
        }
        Provider::Openai => match ChatCompletionsAssistant::new(params.settings) {
            Ok(assistant) => Box::new(assistant),
            Err(err) => {
                output.warn(&format!("{}; answering offline", err.user_message()));
                Box::new(OfflineAssistant)
            }
        },
    }
}

/// Load the form the answers are grounded in.
///
/// A `.json` context is read as a form document; anything else is
/// converted as a definition file with the optional `--metadata`.
fn load_context(args: &AskArgs, config: &CliConfig) -> Result<Option<FormDocument>, CliError> {
    let Some(path) = &args.context else {
        return Ok(None);
    };

    if is_json(path) {
        let text = read_text(path, InputKind::Context)?;
        let document = serde_json::from_str(&text).map_err(|e| CliError::InvalidContext {
            path: path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(document));
    }

    let definition = read_text(path, InputKind::Definition)?;
    let metadata = match &args.metadata {
        Some(meta) => read_text(meta, InputKind::Metadata)?,
        None => String::new(),
    };
    let conversion = form_forge_gen::convert(&definition, &metadata, &config.convert.form_id);
    Ok(Some(conversion.document))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
