use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use indicatif::ProgressBar;
use iris_optimizer::{
    json::types::{JsonRouteRequest, JsonRouteResponse},
    solver::{
        christofides::graph::Symmetrization,
        exact::exact_solver_gateway::{ExactSolverParams, FirstSolutionStrategy},
        ls::two_opt::TwoOptParams,
        solve_request::{AlgorithmOutcome, AlgorithmResult},
        solver::RouteSolver,
        solver_params::SolverParams,
    },
};
use tracing::info;

use crate::{matrix_args::MatrixArgs, parsers};

#[derive(Args)]
pub struct SolveArgs {
    /// The route request, a JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Writes the results as JSON into this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Algorithms to run, overrides the ones of the request (greedy2opt, christofides2opt, exact)
    #[arg(short, long = "algorithm")]
    algorithms: Vec<String>,

    #[command(flatten)]
    matrix: MatrixArgs,

    /// Stops 2-opt after this many passes
    #[arg(long)]
    max_two_opt_passes: Option<usize>,

    #[arg(long, value_parser = parsers::parse_symmetrization, default_value = "upper")]
    symmetrization: Symmetrization,

    /// Time limit of the exact solver (e.g., "10s", "PT1M")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "10s")]
    time_limit: jiff::SignedDuration,

    #[arg(long, value_parser = parsers::parse_first_solution_strategy, default_value = "path_cheapest_arc")]
    first_solution: FirstSolutionStrategy,
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let content: JsonRouteRequest = serde_json::from_reader(BufReader::new(f))?;

    let bar = ProgressBar::new(0);
    let client = args.matrix.create_client(&bar)?;
    let request = content.build_request(&client).await?;
    bar.finish_and_clear();

    let algorithms = if args.algorithms.is_empty() {
        content.algorithms
    } else {
        args.algorithms
    };

    let solver = RouteSolver::new(SolverParams {
        two_opt: TwoOptParams {
            max_passes: args.max_two_opt_passes,
        },
        symmetrization: args.symmetrization,
        exact: ExactSolverParams {
            first_solution_strategy: args.first_solution,
            time_limit: args.time_limit,
            ..ExactSolverParams::default()
        },
    });

    let results = request.solve_all(&solver, &algorithms);

    println!("{}", results_table(&results));

    if let Some(output) = args.output {
        let response = JsonRouteResponse {
            locations: request
                .locations()
                .iter()
                .map(|location| location.id().to_owned())
                .collect(),
            results,
        };

        serde_json::to_writer_pretty(File::create(&output)?, &response)?;
        info!("Results written to {:?}", output);
    }

    Ok(())
}

fn results_table(results: &[AlgorithmResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Algorithm", "Total cost", "Unreachable legs", "Route"]);

    for result in results {
        match &result.outcome {
            AlgorithmOutcome::Solved {
                route,
                total_cost,
                unreachable_legs,
            } => table.add_row(vec![
                result.algorithm.clone(),
                total_cost.to_string(),
                unreachable_legs.to_string(),
                route.join(" -> "),
            ]),
            AlgorithmOutcome::Failed { error } => table.add_row(vec![
                result.algorithm.clone(),
                String::from("-"),
                String::from("-"),
                error.clone(),
            ]),
        };
    }

    table
}
