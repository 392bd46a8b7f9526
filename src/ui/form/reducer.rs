use crate::model::{SalesState, DESCRIPTION_MAX_LEN};
use crate::mvi::Reducer;

use super::intent::FormIntent;
use super::state::{FormField, FormState, DATE_INPUT_LEN};

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Seed { entity } => FormState {
                description: entity.description.unwrap_or_default(),
                state: entity.state,
                date: entity
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                focused: FormField::Description,
                seeded: true,
            },
            FormIntent::Clear => FormState::default(),
            FormIntent::FocusNext => FormState {
                focused: state.focused.next(),
                ..state
            },
            FormIntent::FocusPrev => FormState {
                focused: state.focused.prev(),
                ..state
            },
            FormIntent::Input(ch) => {
                let mut state = state;
                match state.focused {
                    FormField::Description => {
                        // One over the limit so validation can report it.
                        if !ch.is_control() && state.description.chars().count() <= DESCRIPTION_MAX_LEN {
                            state.description.push(ch);
                        }
                    }
                    FormField::Date => {
                        if (ch.is_ascii_digit() || ch == '-') && state.date.len() < DATE_INPUT_LEN {
                            state.date.push(ch);
                        }
                    }
                    FormField::State => {
                        if ch == ' ' {
                            state.state = SalesState::cycle(state.state, true);
                        }
                    }
                }
                state
            }
            FormIntent::Backspace => {
                let mut state = state;
                match state.focused {
                    FormField::Description => {
                        state.description.pop();
                    }
                    FormField::Date => {
                        state.date.pop();
                    }
                    FormField::State => state.state = None,
                }
                state
            }
            FormIntent::CycleState { forward } => FormState {
                state: SalesState::cycle(state.state, forward),
                ..state
            },
        }
    }
}
