use std::{cmp::Reverse, collections::BinaryHeap};

use crate::problem::{GuestId, Problem, TimeValue};

use super::TieBreak;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EventKind {
    Departure,
    Arrival,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Event {
    pub time: TimeValue,
    pub guest: GuestId,
    pub kind: EventKind,
}

type EventKey = (TimeValue, u8, GuestId);

/// Min-ordered queue of arrivals and departures.
///
/// With [`TieBreak::GuestIndex`] the kind of an event plays no part in the
/// ordering: equal timestamps are ordered by guest index alone, so an arrival
/// can be processed before a departure at the same instant.
pub struct EventQueue {
    tie_break: TieBreak,
    heap: BinaryHeap<Reverse<(EventKey, EventKind)>>,
}

impl EventQueue {
    pub fn new(tie_break: TieBreak) -> Self {
        EventQueue {
            tie_break,
            heap: BinaryHeap::new(),
        }
    }

    pub fn for_problem(problem: &Problem, tie_break: TieBreak) -> Self {
        let mut queue = EventQueue::new(tie_break);
        queue.heap.reserve(2 * problem.len());
        for (guest, g) in problem.guests.iter_enumerated() {
            queue.push(Event {
                time: g.departure,
                guest,
                kind: EventKind::Departure,
            });
            queue.push(Event {
                time: g.arrival,
                guest,
                kind: EventKind::Arrival,
            });
        }
        queue
    }

    fn rank(&self, kind: EventKind) -> u8 {
        match self.tie_break {
            TieBreak::GuestIndex => 0,
            TieBreak::DeparturesFirst => kind as u8,
        }
    }

    pub fn push(&mut self, event: Event) {
        let key = (event.time, self.rank(event.kind), event.guest);
        self.heap.push(Reverse((key, event.kind)));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap
            .pop()
            .map(|Reverse(((time, _, guest), kind))| Event { time, guest, kind })
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Iterator for EventQueue {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(times: &[(TimeValue, TimeValue)], tie_break: TieBreak) -> Vec<(TimeValue, usize, EventKind)> {
        EventQueue::for_problem(&Problem::from_times(times), tie_break)
            .map(|e| (e.time, usize::from(e.guest), e.kind))
            .collect()
    }

    #[test]
    fn ties_follow_guest_index() {
        use EventKind::*;
        assert_eq!(
            order(&[(3, 5), (1, 3)], TieBreak::GuestIndex),
            vec![(1, 1, Arrival), (3, 0, Arrival), (3, 1, Departure), (5, 0, Departure)]
        );
    }

    #[test]
    fn ties_with_departures_first() {
        use EventKind::*;
        assert_eq!(
            order(&[(3, 5), (1, 3)], TieBreak::DeparturesFirst),
            vec![(1, 1, Arrival), (3, 1, Departure), (3, 0, Arrival), (5, 0, Departure)]
        );
    }

    #[test]
    fn every_guest_has_two_events() {
        let queue = EventQueue::for_problem(
            &Problem::from_times(&[(1, 4), (2, 3), (4, 6)]),
            TieBreak::GuestIndex,
        );
        assert_eq!(queue.len(), 6);
        assert!(EventQueue::new(TieBreak::GuestIndex).is_empty());
    }
}
