use crate::model::Entity;
use crate::mvi::Intent;

use super::state::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

/// Payload of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome<E: Entity> {
    /// Server representation after create or update.
    Saved(E),
    Deleted(E::Id),
}

/// Store intents. Every variant carries the ticket of the operation that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityIntent<E: Entity> {
    ListRequested { ticket: Ticket },
    ListLoaded { ticket: Ticket, entities: Vec<E> },
    EntityRequested { ticket: Ticket },
    EntityLoaded { ticket: Ticket, entity: E },
    WriteRequested { ticket: Ticket, kind: WriteKind },
    WriteSucceeded { ticket: Ticket, outcome: WriteOutcome<E> },
    /// The call failed or was cancelled; releases its track.
    Failed { ticket: Ticket },
    /// Clear `entity` and abandon any in-flight get-by-id.
    Reset { ticket: Ticket },
}

impl<E: Entity> Intent for EntityIntent<E> {}
