use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Entity;

pub type SalesId = i64;

/// Delivery state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesState {
    InCharge,
    Shipped,
    Delivered,
}

impl SalesState {
    pub const ALL: [SalesState; 3] = [
        SalesState::InCharge,
        SalesState::Shipped,
        SalesState::Delivered,
    ];

    /// Wire value, also used as the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            SalesState::InCharge => "IN_CHARGE",
            SalesState::Shipped => "SHIPPED",
            SalesState::Delivered => "DELIVERED",
        }
    }

    /// Step through `unset → IN_CHARGE → SHIPPED → DELIVERED → unset`.
    pub fn cycle(current: Option<SalesState>, forward: bool) -> Option<SalesState> {
        let position = current.and_then(|state| Self::ALL.iter().position(|s| *s == state));
        let slots = Self::ALL.len() + 1;
        // Slot 0 is "unset", slots 1..=3 map onto ALL.
        let slot = position.map_or(0, |p| p + 1);
        let next = if forward {
            (slot + 1) % slots
        } else {
            (slot + slots - 1) % slots
        };
        next.checked_sub(1).map(|idx| Self::ALL[idx])
    }
}

impl fmt::Display for SalesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales record as exchanged with `/api/sales`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sales {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SalesId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SalesState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Entity for Sales {
    type Id = SalesId;

    const RESOURCE: &'static str = "sales";

    fn id(&self) -> Option<SalesId> {
        self.id
    }
}
