use crate::model::Entity;
use crate::mvi::State;

/// Monotonic operation number issued by the store.
pub type Ticket = u64;

/// Latest ticket per track. A completion only touches a track when it
/// carries that track's ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct InFlight {
    pub(crate) list: Option<Ticket>,
    pub(crate) fetch: Option<Ticket>,
    pub(crate) write: Option<Ticket>,
    /// Last operation allowed to replace `entity` (get, create, update, reset).
    pub(crate) entity_owner: Option<Ticket>,
}

/// Observable store snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityState<E: Entity> {
    pub entities: Vec<E>,
    pub entity: E,
    /// A list or get-by-id is in flight.
    pub loading: bool,
    /// A create, update or delete is in flight.
    pub updating: bool,
    /// The latest write succeeded and no operation has started since.
    pub update_success: bool,
    pub(crate) in_flight: InFlight,
}

impl<E: Entity> State for EntityState<E> {}

/// Coarse store status derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Idle,
    Loading,
    Updating,
}

impl<E: Entity> EntityState<E> {
    pub fn status(&self) -> StoreStatus {
        if self.updating {
            StoreStatus::Updating
        } else if self.loading {
            StoreStatus::Loading
        } else {
            StoreStatus::Idle
        }
    }

    /// Ticket of the get-by-id in flight, if any.
    pub(crate) fn fetch_ticket(&self) -> Option<Ticket> {
        self.in_flight.fetch
    }

    /// `ticket` has completed and `entity` is its payload.
    pub(crate) fn entity_settled_by(&self, ticket: Ticket) -> bool {
        self.in_flight.fetch != Some(ticket) && self.in_flight.entity_owner == Some(ticket)
    }

    /// Entry in `entities` with the given id.
    pub fn find(&self, id: E::Id) -> Option<&E> {
        self.entities.iter().find(|e| e.id() == Some(id))
    }
}
