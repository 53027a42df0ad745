use clap::Parser;

use lotwatch::cli::{self, CheckCommand, Cli, Commands, StoreCommand};
use lotwatch::cli::output;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => cli::run::execute(args).await.map(|_| ()),
        Commands::Check(CheckCommand::Config(arg)) => cli::check::execute_config(&arg.config),
        Commands::Check(CheckCommand::Telegram(arg)) => {
            cli::check::execute_telegram(&arg.config).await
        }
        Commands::Store(StoreCommand::Stats(args)) => cli::store::execute_stats(args),
    };

    if let Err(e) = result {
        output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
