use std::marker::PhantomData;

use crate::model::Entity;
use crate::mvi::Reducer;

use super::intent::{EntityIntent, WriteKind, WriteOutcome};
use super::state::{EntityState, InFlight, Ticket};

/// Pure transition function for [`EntityState`].
pub struct EntityReducer<E>(PhantomData<fn() -> E>);

impl<E: Entity> Reducer for EntityReducer<E> {
    type State = EntityState<E>;
    type Intent = EntityIntent<E>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let mut state = state;
        let flight = &mut state.in_flight;

        match intent {
            EntityIntent::ListRequested { ticket } => {
                flight.list = Some(ticket);
                state.update_success = false;
            }
            EntityIntent::ListLoaded { ticket, entities } => {
                if release(&mut flight.list, ticket) {
                    state.entities = entities;
                }
            }
            EntityIntent::EntityRequested { ticket } => {
                flight.fetch = Some(ticket);
                flight.entity_owner = Some(ticket);
                state.update_success = false;
            }
            EntityIntent::EntityLoaded { ticket, entity } => {
                release(&mut flight.fetch, ticket);
                if flight.entity_owner == Some(ticket) {
                    state.entity = entity;
                }
            }
            EntityIntent::WriteRequested { ticket, kind } => {
                flight.write = Some(ticket);
                if matches!(kind, WriteKind::Create | WriteKind::Update) {
                    flight.entity_owner = Some(ticket);
                }
                state.update_success = false;
            }
            EntityIntent::WriteSucceeded { ticket, outcome } => {
                if release(&mut flight.write, ticket) {
                    state.update_success = true;
                }
                match outcome {
                    WriteOutcome::Saved(entity) => {
                        if flight.entity_owner == Some(ticket) {
                            state.entity = entity;
                        }
                    }
                    WriteOutcome::Deleted(id) => {
                        if state.entity.id() == Some(id) {
                            state.entity = E::default();
                        }
                    }
                }
            }
            EntityIntent::Failed { ticket } => {
                release(&mut flight.list, ticket);
                release(&mut flight.fetch, ticket);
                release(&mut flight.write, ticket);
                // The held entity was never confirmed by this operation.
                release(&mut flight.entity_owner, ticket);
            }
            EntityIntent::Reset { ticket } => {
                flight.fetch = None;
                flight.entity_owner = Some(ticket);
                state.entity = E::default();
                state.update_success = false;
            }
        }

        refresh_flags(state)
    }
}

/// Clear `slot` if it holds `ticket`. Returns whether it did.
fn release(slot: &mut Option<Ticket>, ticket: Ticket) -> bool {
    if *slot == Some(ticket) {
        *slot = None;
        true
    } else {
        false
    }
}

fn refresh_flags<E: Entity>(mut state: EntityState<E>) -> EntityState<E> {
    let InFlight {
        list, fetch, write, ..
    } = state.in_flight;
    state.loading = list.is_some() || fetch.is_some();
    state.updating = write.is_some();
    state
}
