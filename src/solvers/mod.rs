pub mod chairpool;
pub mod events;
pub mod simulator;

use serde::Deserialize;

use crate::{
    debug::DebugInfo,
    problem::{ChairId, Problem, ProblemError, SeatingPlan},
};
use simulator::Simulator;

/// Order of events sharing a timestamp.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// By guest index only, whatever the kind of event.
    #[default]
    GuestIndex,
    /// Departures before arrivals, then by guest index.
    DeparturesFirst,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tie_break: TieBreak,
}

pub fn seat_target(
    problem: &Problem,
    target: usize,
    config: &SimulationConfig,
) -> Result<Option<ChairId>, ProblemError> {
    seat_target_debug(problem, target, config, |_| {})
}

pub fn seat_target_debug(
    problem: &Problem,
    target: usize,
    config: &SimulationConfig,
    on_step: impl FnMut(DebugInfo),
) -> Result<Option<ChairId>, ProblemError> {
    let _p = hprof::enter("seat_target");
    let target = problem.validate(target)?;
    Ok(Simulator::new(problem, config).run_until_seated(target, on_step))
}

pub fn seat_all(problem: &Problem, config: &SimulationConfig) -> Result<SeatingPlan, ProblemError> {
    seat_all_debug(problem, config, |_| {})
}

pub fn seat_all_debug(
    problem: &Problem,
    config: &SimulationConfig,
    on_step: impl FnMut(DebugInfo),
) -> Result<SeatingPlan, ProblemError> {
    let _p = hprof::enter("seat_all");
    problem.validate_intervals()?;
    let mut sim = Simulator::new(problem, config);
    let chairs = sim.run_to_end(on_step);
    Ok(SeatingPlan {
        chairs,
        peak_occupancy: sim.peak_occupied(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{sample_instances, GuestId};

    fn chair(times: &[(i32, i32)], target: usize) -> Option<usize> {
        seat_target(&Problem::from_times(times), target, &SimulationConfig::default())
            .unwrap()
            .map(usize::from)
    }

    #[test]
    fn samples() {
        assert_eq!(chair(&[(1, 4), (2, 3), (4, 6)], 1), Some(1));
        assert_eq!(chair(&[(3, 10), (1, 5), (2, 6)], 0), Some(2));
        assert_eq!(chair(&[(0, 5)], 0), Some(0));
    }

    #[test]
    fn chair_is_reused_after_departure() {
        assert_eq!(chair(&[(1, 4), (2, 3), (4, 6)], 2), Some(0));
        assert_eq!(chair(&[(1, 2), (3, 4), (5, 6)], 2), Some(0));
    }

    #[test]
    fn target_out_of_range_is_an_error() {
        let problem = Problem::from_times(&[(1, 4), (2, 3)]);
        assert_eq!(
            seat_target(&problem, 2, &SimulationConfig::default()),
            Err(ProblemError::IndexOutOfRange {
                target: 2,
                guests: 2
            })
        );
    }

    #[test]
    fn reversed_interval_is_an_error() {
        let problem = Problem::from_times(&[(1, 4), (6, 3)]);
        assert!(matches!(
            seat_target(&problem, 0, &SimulationConfig::default()),
            Err(ProblemError::InvalidInterval { .. })
        ));
        assert!(seat_all(&problem, &SimulationConfig::default()).is_err());
    }

    #[test]
    fn repeated_runs_agree() {
        let problem = Problem::from_times(&[(5, 9), (1, 5), (2, 6), (5, 7), (4, 5)]);
        let config = SimulationConfig::default();
        for target in 0..problem.len() {
            let first = seat_target(&problem, target, &config).unwrap();
            assert_eq!(seat_target(&problem, target, &config).unwrap(), first);
        }
    }

    #[test]
    fn full_plan_matches_single_target_runs() {
        for config in [
            SimulationConfig::default(),
            SimulationConfig {
                tie_break: TieBreak::DeparturesFirst,
            },
        ] {
            for instance in sample_instances() {
                let problem = &instance.problem;
                let plan = seat_all(problem, &config).unwrap();
                for (guest, chair) in plan.chairs.iter_enumerated() {
                    assert_eq!(
                        seat_target(problem, usize::from(guest), &config).unwrap(),
                        Some(*chair)
                    );
                }
                assert_eq!(problem.verify_seating(&plan), Ok(plan.peak_occupancy));
            }
        }
    }

    #[test]
    fn departures_first_uses_fewest_chairs() {
        let problem = Problem::from_times(&[(3, 5), (1, 3), (5, 8), (3, 4)]);
        let faithful = seat_all(&problem, &SimulationConfig::default()).unwrap();
        let variant = seat_all(
            &problem,
            &SimulationConfig {
                tie_break: TieBreak::DeparturesFirst,
            },
        )
        .unwrap();
        assert_eq!(variant.peak_occupancy, problem.peak_occupancy());
        assert!(faithful.peak_occupancy >= variant.peak_occupancy);
        assert_eq!(faithful.chairs[GuestId::from(0)], ChairId::from(1));
        assert_eq!(variant.chairs[GuestId::from(0)], ChairId::from(0));
    }

    #[test]
    fn debug_callback_sees_every_step() {
        let problem = Problem::from_times(&[(1, 4), (2, 3), (4, 6)]);
        let mut steps = Vec::new();
        let chair = seat_target_debug(&problem, 2, &SimulationConfig::default(), |d| {
            steps.push(d.step)
        })
        .unwrap();
        assert_eq!(chair, Some(ChairId::from(0)));
        // Guest 2 arrives after guest 0 leaves at t=4, which is the fifth event.
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn config_from_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"tie_break": "departures_first"}"#).unwrap();
        assert_eq!(config.tie_break, TieBreak::DeparturesFirst);
        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.tie_break, TieBreak::GuestIndex);
    }
}
