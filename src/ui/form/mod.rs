//! Editor form (MVI).

mod intent;
mod reducer;
mod state;

pub use intent::FormIntent;
pub use reducer::FormReducer;
pub use state::{FormField, FormState, DATE_INPUT_LEN};
