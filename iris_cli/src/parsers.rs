use iris_optimizer::solver::{
    christofides::graph::Symmetrization, exact::exact_solver_gateway::FirstSolutionStrategy,
};
use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Accepts `"1h30m"` or `"PT10S"` style durations, or a plain number of seconds.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    if let Ok(duration) = input.parse::<SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    match input.parse::<i64>() {
        Ok(seconds) if seconds >= 0 => Ok(SignedDuration::from_secs(seconds)),
        _ => Err(format!("Invalid duration: {input}")),
    }
}

pub fn parse_first_solution_strategy(input: &str) -> Result<FirstSolutionStrategy, String> {
    match input {
        "path_cheapest_arc" | "path-cheapest-arc" => Ok(FirstSolutionStrategy::PathCheapestArc),
        "christofides" => Ok(FirstSolutionStrategy::Christofides),
        _ => Err(format!(
            "Invalid first solution strategy: {input}, expected path_cheapest_arc or christofides"
        )),
    }
}

pub fn parse_symmetrization(input: &str) -> Result<Symmetrization, String> {
    match input {
        "upper" => Ok(Symmetrization::Upper),
        "max" => Ok(Symmetrization::Max),
        "average" => Ok(Symmetrization::Average),
        "reject" => Ok(Symmetrization::Reject),
        _ => Err(format!(
            "Invalid symmetrization: {input}, expected upper, max, average or reject"
        )),
    }
}
