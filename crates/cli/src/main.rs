use clap::Parser;
use vertiscope_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = vertiscope_core::logging::init_logging("cli", cli.verbose);
    vertiscope_cli::run(cli).await
}
