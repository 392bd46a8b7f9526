use crate::model::{PatchError, SalesPatch, SalesState};
use crate::mvi::State;

/// `YYYY-MM-DD`
pub const DATE_INPUT_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Description,
    State,
    Date,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Description, FormField::State, FormField::Date];

    pub fn next(self) -> Self {
        match self {
            FormField::Description => FormField::State,
            FormField::State => FormField::Date,
            FormField::Date => FormField::Description,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Description => FormField::Date,
            FormField::State => FormField::Description,
            FormField::Date => FormField::State,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Description => "Description",
            FormField::State => "State",
            FormField::Date => "Date",
        }
    }
}

/// In-progress editor input.
///
/// `seeded` is false until the form has been filled from the store's
/// entity; the app seeds it once per mount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub description: String,
    pub state: Option<SalesState>,
    pub date: String,
    pub focused: FormField,
    pub seeded: bool,
}

impl State for FormState {}

impl FormState {
    pub fn to_patch(&self) -> Result<SalesPatch, PatchError> {
        SalesPatch::parse(&self.description, self.state, &self.date)
    }
}
