pub mod christofides;
pub mod construction;
pub mod exact;
pub mod ls;
pub mod route_evaluator;
pub mod solve_request;
pub mod solver;
pub mod solver_params;
pub mod strategy;
