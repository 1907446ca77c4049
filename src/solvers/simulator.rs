use log::{debug, trace};
use typed_index_collections::TiVec;

use crate::{
    debug::{DebugInfo, SeatingAction},
    problem::{ChairId, GuestId, Problem},
};

use super::{
    chairpool::ChairPool,
    events::{EventKind, EventQueue},
    SimulationConfig,
};

pub struct Simulator<'a> {
    problem: &'a Problem,
    events: EventQueue,
    pool: ChairPool,
    seated: TiVec<GuestId, Option<ChairId>>,
    occupied: usize,
    peak_occupied: usize,
    step: usize,
}

impl<'a> Simulator<'a> {
    pub fn new(problem: &'a Problem, config: &SimulationConfig) -> Self {
        Simulator {
            problem,
            events: EventQueue::for_problem(problem, config.tie_break),
            pool: ChairPool::new(problem.len()),
            seated: problem.guests.iter().map(|_| None).collect(),
            occupied: 0,
            peak_occupied: 0,
            step: 0,
        }
    }

    pub fn free_chairs(&self) -> usize {
        self.pool.len()
    }

    pub fn occupied_chairs(&self) -> usize {
        self.occupied
    }

    pub fn peak_occupied(&self) -> usize {
        self.peak_occupied
    }

    pub fn chair_of(&self, guest: GuestId) -> Option<ChairId> {
        self.seated.get(guest).copied().flatten()
    }

    /// Processes the next event. A guest without a chair is arriving, a
    /// guest holding one is leaving; the event's own kind is not consulted.
    pub fn step(&mut self) -> Option<DebugInfo> {
        let event = self.events.pop()?;
        self.step += 1;

        let action = match self.seated[event.guest].take() {
            None => {
                // Each guest holds at most one chair, so N chairs never run out.
                let chair = self.pool.take().expect("more guests seated than chairs");
                self.seated[event.guest] = Some(chair);
                self.occupied += 1;
                self.peak_occupied = self.peak_occupied.max(self.occupied);
                SeatingAction::Seated {
                    time: event.time,
                    guest: event.guest,
                    chair,
                }
            }
            Some(chair) => {
                self.pool.release(chair);
                self.occupied -= 1;
                SeatingAction::Vacated {
                    time: event.time,
                    guest: event.guest,
                    chair,
                }
            }
        };

        if matches!(
            (event.kind, action),
            (EventKind::Arrival, SeatingAction::Vacated { .. })
                | (EventKind::Departure, SeatingAction::Seated { .. })
        ) {
            debug!("{} handled out of kind at t={}", event.guest, event.time);
        }
        debug_assert_eq!(self.pool.len() + self.occupied, self.pool.capacity());
        trace!("step {}: {} ({} free)", self.step, action, self.pool.len());

        Some(DebugInfo {
            step: self.step,
            free_chairs: self.pool.len(),
            action,
        })
    }

    /// Runs until `target` is seated and returns their chair, or `None` when
    /// the events run out first.
    pub fn run_until_seated(
        &mut self,
        target: GuestId,
        mut on_step: impl FnMut(DebugInfo),
    ) -> Option<ChairId> {
        while let Some(info) = self.step() {
            let action = info.action;
            on_step(info);
            if let SeatingAction::Seated { guest, chair, .. } = action {
                if guest == target {
                    debug!("{} seated on {} after {} steps", guest, chair, self.step);
                    return Some(chair);
                }
            }
        }
        debug!("{} never seated", target);
        None
    }

    /// Runs every event and returns the chair each guest was given.
    pub fn run_to_end(&mut self, mut on_step: impl FnMut(DebugInfo)) -> TiVec<GuestId, ChairId> {
        let mut assigned: TiVec<GuestId, Option<ChairId>> =
            self.problem.guests.iter().map(|_| None).collect();
        while let Some(info) = self.step() {
            if let SeatingAction::Seated { guest, chair, .. } = info.action {
                assigned[guest].get_or_insert(chair);
            }
            on_step(info);
        }
        assigned.into_iter().flatten().collect()
    }
}
