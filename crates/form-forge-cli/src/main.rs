mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init(&cli.global);
    let output = output::OutputContext::from_global(&cli.global);

    let result = match cli.command {
        cli::Commands::Convert(args) => commands::convert::run(args, &cli.global, &output).await,
        cli::Commands::Inspect(args) => commands::inspect::run(args, &cli.global, &output).await,
        cli::Commands::Ask(args) => commands::ask::run(args, &cli.global, &output).await,
        cli::Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
