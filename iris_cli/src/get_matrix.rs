use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use indicatif::ProgressBar;
use iris_optimizer::json::types::JsonRouteRequest;
use serde::Serialize;
use tracing::info;

use crate::matrix_args::MatrixArgs;

#[derive(Args)]
pub struct GetMatrixArgs {
    /// The route request, a JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Writes the matrix into this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    matrix: MatrixArgs,
}

#[derive(Serialize)]
struct MatrixOutput<'a> {
    locations: Vec<&'a str>,
    matrix: Vec<&'a [u64]>,
}

pub async fn run(args: GetMatrixArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let content: JsonRouteRequest = serde_json::from_reader(BufReader::new(f))?;

    let bar = ProgressBar::new(0);
    let client = args.matrix.create_client(&bar)?;
    let request = content.build_request(&client).await?;
    bar.finish_and_clear();

    let output = MatrixOutput {
        locations: request.locations().iter().map(|l| l.id()).collect(),
        matrix: request.matrix().rows().collect(),
    };

    match args.output {
        Some(path) => {
            serde_json::to_writer(File::create(&path)?, &output)?;
            info!("Matrix written to {:?}", path);
        }
        None => println!("{}", serde_json::to_string(&output)?),
    }

    Ok(())
}
