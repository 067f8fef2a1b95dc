use std::time::Duration;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use iris_matrix_providers::{
    matrix_builder::{DEFAULT_BATCH_SIZE, MatrixBuilderParams},
    travel_matrix_client::TravelMatrixClient,
};

use crate::parsers;

#[derive(Args)]
pub struct MatrixArgs {
    /// Maximum number of origins, and of destinations, per matrix request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Minimum delay between two matrix requests
    #[arg(long, value_parser = parsers::parse_duration, default_value = "1s")]
    request_delay: jiff::SignedDuration,
}

impl MatrixArgs {
    /// A client reporting block progress on `bar`.
    pub fn create_client(&self, bar: &ProgressBar) -> anyhow::Result<TravelMatrixClient> {
        let mut client = TravelMatrixClient::from_env(MatrixBuilderParams {
            batch_size: self.batch_size,
            request_delay: Duration::try_from(self.request_delay)?,
        })?;

        bar.set_style(
            ProgressStyle::default_bar()
                .template("matrix [{bar:40}] {pos}/{len} blocks ({elapsed})")?,
        );

        let bar = bar.clone();
        client.on_block_completed(move |progress| {
            bar.set_length(progress.total as u64);
            bar.set_position(progress.completed as u64);
        });

        Ok(client)
    }
}
