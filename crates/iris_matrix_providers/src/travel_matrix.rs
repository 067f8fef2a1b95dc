use serde::{Deserialize, Serialize};

/// Cost reported for pairs the provider could not route between.
pub const UNREACHABLE_COST: u64 = 9_999_999;

/// TravelMatrix holds the travel costs between every pair of points.
/// Stored as a flat row-major vector: `index = from * num_locations + to`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TravelMatrix {
    pub costs: Vec<u64>,
    pub num_locations: usize,
}

impl TravelMatrix {
    /// Every off-diagonal cell starts unreachable, the diagonal is zero.
    pub fn unreachable(num_locations: usize) -> Self {
        let mut costs = vec![UNREACHABLE_COST; num_locations * num_locations];
        for i in 0..num_locations {
            costs[i * num_locations + i] = 0;
        }

        Self {
            costs,
            num_locations,
        }
    }

    pub fn from_rows(rows: Vec<Vec<u64>>) -> Self {
        let num_locations = rows.len();
        Self {
            costs: rows.into_iter().flatten().collect(),
            num_locations,
        }
    }

    #[inline(always)]
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.costs[from * self.num_locations + to]
    }

    #[inline(always)]
    pub fn set(&mut self, from: usize, to: usize, cost: u64) {
        self.costs[from * self.num_locations + to] = cost;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.costs.chunks(self.num_locations.max(1))
    }
}
