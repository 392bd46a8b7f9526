//! Entity data contracts.
//!
//! [`Entity`] is what the REST client and the store are generic over; the
//! only implementation shipped here is [`Sales`].

mod patch;
mod sales;

pub use patch::{PatchError, SalesPatch, DESCRIPTION_MAX_LEN};
pub use sales::{Sales, SalesId, SalesState};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// A REST-backed business record.
///
/// `Default` must produce the empty shape used for a not-yet-created
/// record; the store resets to it.
pub trait Entity:
    Clone + Debug + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Copy + Debug + Display + Eq + Ord + Hash + FromStr + Send + Sync + 'static;

    /// Resource name used in REST paths and routes (e.g. `"sales"`).
    const RESOURCE: &'static str;

    /// Server-assigned identifier, absent until the entity is created.
    fn id(&self) -> Option<Self::Id>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
