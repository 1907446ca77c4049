pub mod debug;
pub mod intervals;
pub mod parser;
pub mod problem;
pub mod solvers;

use problem::{Problem, ProblemError, TimeValue};
use solvers::SimulationConfig;

/// Chair taken by guest `target_friend` when they arrive, given each guest's
/// `(arrival, departure)`. Chairs are numbered from 0 and every arriving guest
/// takes the lowest-numbered free one. Returns -1 when the target is never
/// seated.
pub fn smallest_chair(
    times: &[(TimeValue, TimeValue)],
    target_friend: usize,
) -> Result<i32, ProblemError> {
    let problem = Problem::from_times(times);
    let chair = solvers::seat_target(&problem, target_friend, &SimulationConfig::default())?;
    Ok(chair.map(|c| usize::from(c) as i32).unwrap_or(-1))
}
