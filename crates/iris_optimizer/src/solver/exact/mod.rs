pub mod branch_and_bound;
pub mod exact_solver_gateway;
