use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("No locations to route")]
    EmptyProblem,

    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Matrix has {matrix} locations but {locations} were given")]
    MatrixSizeMismatch { locations: usize, matrix: usize },

    #[error("Depot {depot} is out of range for {num_locations} locations")]
    DepotOutOfRange { depot: usize, num_locations: usize },

    #[error("Matrix is asymmetric between {from} and {to}")]
    AsymmetricMatrix { from: usize, to: usize },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Unknown algorithm: {0}")]
    UnknownStrategy(String),
}
