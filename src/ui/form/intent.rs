use crate::model::Sales;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum FormIntent {
    /// Fill every field from `entity` and mark the form seeded.
    Seed { entity: Sales },
    Clear,
    FocusNext,
    FocusPrev,
    /// Typed character for the focused text field.
    Input(char),
    Backspace,
    CycleState { forward: bool },
}

impl Intent for FormIntent {}
