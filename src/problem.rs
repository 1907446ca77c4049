use typed_index_collections::TiVec;

use crate::intervals::{IntervalError, NonOverlappingIntervals};

pub type TimeValue = i32;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, derive_more::Display)]
#[display(fmt = "guest{}", _0)]
pub struct GuestId(u32);

impl From<GuestId> for usize {
    fn from(v: GuestId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for GuestId {
    fn from(x: usize) -> Self {
        GuestId(x as u32)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, derive_more::Display)]
#[display(fmt = "chair{}", _0)]
pub struct ChairId(u32);

impl From<ChairId> for usize {
    fn from(v: ChairId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for ChairId {
    fn from(x: usize) -> Self {
        ChairId(x as u32)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Guest {
    pub arrival: TimeValue,
    pub departure: TimeValue,
}

#[derive(Clone, Debug, Default)]
pub struct Problem {
    pub guests: TiVec<GuestId, Guest>,
}

#[derive(Clone, Debug)]
pub struct NamedProblem {
    pub name: String,
    pub problem: Problem,
    pub target: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum ProblemError {
    #[display(
        fmt = "{} leaves at {} but arrives at {}",
        guest,
        departure,
        arrival
    )]
    InvalidInterval {
        guest: GuestId,
        arrival: TimeValue,
        departure: TimeValue,
    },
    #[display(fmt = "target {} is out of range for {} guests", target, guests)]
    IndexOutOfRange { target: usize, guests: usize },
}

impl std::error::Error for ProblemError {}

/// Every guest gets a chair; indexed by guest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatingPlan {
    pub chairs: TiVec<GuestId, ChairId>,
    pub peak_occupancy: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum SeatingConflict {
    #[display(fmt = "plan seats {} guests, problem has {}", seated, guests)]
    WrongShape { seated: usize, guests: usize },
    #[display(fmt = "{} is seated on {} which does not exist", guest, chair)]
    NoSuchChair { guest: GuestId, chair: ChairId },
    #[display(fmt = "{} and {} share {} at the same time", _0, _1, _2)]
    Shared(GuestId, GuestId, ChairId),
}

impl std::error::Error for SeatingConflict {}

impl Problem {
    pub fn from_times(times: &[(TimeValue, TimeValue)]) -> Self {
        Problem {
            guests: times
                .iter()
                .map(|&(arrival, departure)| Guest { arrival, departure })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn chairs(&self) -> impl Iterator<Item = ChairId> {
        (0..self.guests.len()).map(ChairId::from)
    }

    pub fn validate_intervals(&self) -> Result<(), ProblemError> {
        if let Some((guest, g)) = self
            .guests
            .iter_enumerated()
            .find(|(_, g)| g.arrival >= g.departure)
        {
            return Err(ProblemError::InvalidInterval {
                guest,
                arrival: g.arrival,
                departure: g.departure,
            });
        }
        Ok(())
    }

    pub fn validate(&self, target: usize) -> Result<GuestId, ProblemError> {
        self.validate_intervals()?;
        if target >= self.guests.len() {
            return Err(ProblemError::IndexOutOfRange {
                target,
                guests: self.guests.len(),
            });
        }

        Ok(GuestId::from(target))
    }

    /// Checks that the plan is a valid seating and returns the number of
    /// distinct chairs it uses.
    pub fn verify_seating(&self, plan: &SeatingPlan) -> Result<usize, SeatingConflict> {
        let _p = hprof::enter("verify_seating");
        if plan.chairs.len() != self.guests.len() {
            return Err(SeatingConflict::WrongShape {
                seated: plan.chairs.len(),
                guests: self.guests.len(),
            });
        }

        let mut occupation: TiVec<ChairId, NonOverlappingIntervals> =
            self.chairs().map(|_| NonOverlappingIntervals::new()).collect();

        for (guest, chair) in plan.chairs.iter_enumerated() {
            let g = &self.guests[guest];
            let intervals = occupation
                .get_mut(*chair)
                .ok_or(SeatingConflict::NoSuchChair {
                    guest,
                    chair: *chair,
                })?;
            match intervals.try_insert(g.arrival, g.departure, guest) {
                Ok(()) => {}
                Err(IntervalError::Overlap(other)) => {
                    return Err(SeatingConflict::Shared(other, guest, *chair))
                }
                // Validated problems never contain empty intervals; such a
                // guest occupies nothing.
                Err(IntervalError::Empty(_, _)) => {}
            }
        }

        Ok(occupation.iter().filter(|i| !i.is_empty()).count())
    }

    /// Largest number of guests present at once, with departures at an
    /// instant counted before arrivals at the same instant.
    pub fn peak_occupancy(&self) -> usize {
        let mut events = self
            .guests
            .iter()
            .flat_map(|g| [(g.arrival, 1i32), (g.departure, -1i32)])
            .collect::<Vec<_>>();
        events.sort();

        let mut present = 0i32;
        let mut peak = 0i32;
        for (_, delta) in events {
            present += delta;
            peak = peak.max(present);
        }
        peak as usize
    }
}

pub fn sample_instances() -> Vec<NamedProblem> {
    let named = |name: &str, times: &[(TimeValue, TimeValue)], target: usize| NamedProblem {
        name: name.to_string(),
        problem: Problem::from_times(times),
        target,
    };

    vec![
        named("sample1", &[(1, 4), (2, 3), (4, 6)], 1),
        named("sample2", &[(3, 10), (1, 5), (2, 6)], 0),
        named("single", &[(0, 5)], 0),
        // Guest 0 arrives at the instant guest 1 leaves.
        named("shared_instant", &[(3, 5), (1, 3)], 0),
    ]
}
