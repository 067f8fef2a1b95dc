use crate::solver::{
    christofides::graph::Symmetrization, exact::exact_solver_gateway::ExactSolverParams,
    ls::two_opt::TwoOptParams,
};

#[derive(Clone, Debug, Default)]
pub struct SolverParams {
    pub two_opt: TwoOptParams,
    pub symmetrization: Symmetrization,
    pub exact: ExactSolverParams,
}
