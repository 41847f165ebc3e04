use clap::Parser;
use fitgate::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Owner(command) => cli::owner::run(command).await,
        Command::Key(command) => cli::key::run(command).await,
        Command::Invoke(args) => cli::invoke::run(args).await,
        Command::Popularity(args) => cli::report::popularity(args).await,
        Command::Stats(args) => cli::report::stats(args).await,
        Command::Audit(args) => cli::report::audit(args).await,
        Command::Migrate => cli::migrate::run().await,
    }
}
