use iris_matrix_providers::travel_matrix::TravelMatrix;

use crate::error::SolveError;

pub use iris_matrix_providers::travel_matrix::UNREACHABLE_COST;

pub type Cost = u64;

/// This matrix use a flat structure to store the travel costs between locations.
/// To find the index for a pair of locations, use the formula:
/// `index = from * num_locations + to`.
///
/// Costs are directional, `cost(a, b)` and `cost(b, a)` may differ.
/// Pairs that cannot be travelled hold [`UNREACHABLE_COST`], larger costs are
/// clamped to it so route sums cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    costs: Vec<Cost>,
    num_locations: usize,
    is_symmetric: bool,
}

fn is_flat_matrix_symmetric(matrix: &[Cost], num_locations: usize) -> bool {
    for i in 0..num_locations {
        for j in (i + 1)..num_locations {
            if matrix[i * num_locations + j] != matrix[j * num_locations + i] {
                return false;
            }
        }
    }
    true
}

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<Cost>>) -> Result<Self, SolveError> {
        let num_locations = rows.len();

        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != num_locations)
        {
            return Err(SolveError::NonSquareMatrix {
                row,
                len: values.len(),
                expected: num_locations,
            });
        }

        let costs: Vec<Cost> = rows.into_iter().flatten().collect();
        Ok(Self::from_flat(costs, num_locations))
    }

    pub fn from_travel_matrix(matrix: TravelMatrix) -> Result<Self, SolveError> {
        let num_locations = matrix.num_locations;
        if matrix.costs.len() != num_locations * num_locations {
            return Err(SolveError::NonSquareMatrix {
                row: 0,
                len: matrix.costs.len(),
                expected: num_locations * num_locations,
            });
        }

        Ok(Self::from_flat(matrix.costs, num_locations))
    }

    fn from_flat(mut costs: Vec<Cost>, num_locations: usize) -> Self {
        for cost in costs.iter_mut() {
            *cost = (*cost).min(UNREACHABLE_COST);
        }

        let is_symmetric = is_flat_matrix_symmetric(&costs, num_locations);
        Self {
            costs,
            num_locations,
            is_symmetric,
        }
    }

    /// Rounded euclidean distances, multiplied by `scale` before rounding.
    pub fn from_euclidean(points: &[(f64, f64)], scale: f64) -> Self {
        let num_locations = points.len();
        let mut costs = vec![0; num_locations * num_locations];

        for (i, &(x1, y1)) in points.iter().enumerate() {
            for (j, &(x2, y2)) in points.iter().enumerate() {
                let distance = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
                costs[i * num_locations + j] =
                    ((distance * scale).round() as Cost).min(UNREACHABLE_COST);
            }
        }

        Self {
            costs,
            num_locations,
            is_symmetric: true,
        }
    }

    #[inline(always)]
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        if from == to {
            return 0;
        }

        self.costs[from * self.num_locations + to]
    }

    #[inline(always)]
    pub fn is_unreachable(&self, from: usize, to: usize) -> bool {
        self.cost(from, to) >= UNREACHABLE_COST
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        self.costs.chunks(self.num_locations.max(1))
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_empty(&self) -> bool {
        self.num_locations == 0
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn check_depot(&self, depot: usize) -> Result<(), SolveError> {
        if self.num_locations == 0 {
            return Err(SolveError::EmptyProblem);
        }

        if depot >= self.num_locations {
            return Err(SolveError::DepotOutOfRange {
                depot,
                num_locations: self.num_locations,
            });
        }

        Ok(())
    }
}
