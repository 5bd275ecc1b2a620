use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{fetch::FetchArgs, show::ShowArgs};

mod fetch;
mod parsers;
mod show;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch travel times for every pair of places and write the artifact
    Fetch {
        #[command(flatten)]
        args: FetchArgs,
    },
    /// Print the matrix stored in an artifact
    Show {
        #[command(flatten)]
        args: ShowArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Fetch { args } => fetch::run(args).await?,
        Commands::Show { args } => show::run(args)?,
    }

    Ok(())
}
