//! plugconf CLI entry point.

use clap::Parser;

use plugconf::cli::commands::{self, RunContext};
use plugconf::cli::{Cli, Commands};
use plugconf::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let ctx = match RunContext::prepare(cli.settings.as_deref(), &cli.run) {
        Ok(ctx) => ctx,
        Err(err) => plugconf::cli::handle_error(err, cli.json),
    };

    // Guard must outlive every command so buffered file logs are flushed
    let logger = match LoggerImpl::init(&ctx.settings.logging) {
        Ok(logger) => logger,
        Err(err) => plugconf::cli::handle_error(err, cli.json),
    };

    tracing::debug!(
        document = %ctx.settings.document.display(),
        start_time = ctx.run.start_time,
        end_time = ctx.run.end_time,
        file_logging = logger.has_file_output(),
        "starting plugconf"
    );

    let result = match &cli.command {
        Commands::Show => commands::show::execute(&ctx, cli.json),
        Commands::Get { path } => commands::get::execute(&ctx, path, cli.json),
        Commands::Plugins(command) => commands::plugins::execute(&ctx, command, cli.json),
    };

    if let Err(err) = result {
        plugconf::cli::handle_error(err, cli.json);
    }
}
