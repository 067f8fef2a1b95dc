use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Nearest-neighbor construction refined by 2-opt
    #[serde(rename = "greedy2opt")]
    GreedyTwoOpt,
    /// Christofides construction refined by 2-opt
    #[serde(rename = "christofides2opt")]
    ChristofidesTwoOpt,
    #[serde(rename = "exact", alias = "ortools")]
    ExactSolver,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::GreedyTwoOpt,
        Strategy::ChristofidesTwoOpt,
        Strategy::ExactSolver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::GreedyTwoOpt => "greedy2opt",
            Strategy::ChristofidesTwoOpt => "christofides2opt",
            Strategy::ExactSolver => "exact",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy2opt" => Ok(Strategy::GreedyTwoOpt),
            "christofides2opt" => Ok(Strategy::ChristofidesTwoOpt),
            "exact" | "ortools" => Ok(Strategy::ExactSolver),
            _ => Err(SolveError::UnknownStrategy(s.to_owned())),
        }
    }
}
