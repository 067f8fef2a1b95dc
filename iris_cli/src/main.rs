use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{get_matrix::GetMatrixArgs, solve::SolveArgs};

mod get_matrix;
mod matrix_args;
mod parsers;
mod solve;

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
    /// Builds the travel matrix of a request and solves it with every requested algorithm
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Builds the travel matrix of a request without solving it
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: GetMatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args).await?,
        Commands::Matrix { args } => get_matrix::run(args).await?,
    }

    Ok(())
}
