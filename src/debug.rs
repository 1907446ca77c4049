use crate::problem::{ChairId, GuestId, TimeValue};

#[derive(Debug)]
pub struct DebugInfo {
    pub step: usize,
    pub free_chairs: usize,
    pub action: SeatingAction,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum SeatingAction {
    #[display(fmt = "t={} {} takes {}", time, guest, chair)]
    Seated {
        time: TimeValue,
        guest: GuestId,
        chair: ChairId,
    },
    #[display(fmt = "t={} {} leaves {}", time, guest, chair)]
    Vacated {
        time: TimeValue,
        guest: GuestId,
        chair: ChairId,
    },
}

impl SeatingAction {
    pub fn guest(&self) -> GuestId {
        match self {
            SeatingAction::Seated { guest, .. } | SeatingAction::Vacated { guest, .. } => *guest,
        }
    }

    pub fn chair(&self) -> ChairId {
        match self {
            SeatingAction::Seated { chair, .. } | SeatingAction::Vacated { chair, .. } => *chair,
        }
    }
}
