use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::model::{Sales, SalesId, SalesState};

/// In-memory `sales` table.
#[derive(Debug, Default)]
pub struct SalesRepository {
    inner: Mutex<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<SalesId, Sales>,
    last_id: SalesId,
}

impl SalesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding a few sample rows.
    pub fn with_demo_data() -> Self {
        let repo = Self::new();
        let rows = [
            ("Office chairs", SalesState::Delivered, (2024, 1, 15)),
            ("Standing desks", SalesState::Shipped, (2024, 2, 3)),
            ("Monitor arms", SalesState::InCharge, (2024, 3, 21)),
        ];
        for (description, state, (y, m, d)) in rows {
            repo.insert(Sales {
                id: None,
                description: Some(description.to_string()),
                state: Some(state),
                date: NaiveDate::from_ymd_opt(y, m, d),
            });
        }
        repo
    }

    /// All rows ordered by id.
    pub fn find_all(&self) -> Vec<Sales> {
        self.inner.lock().rows.values().cloned().collect()
    }

    pub fn find_by_id(&self, id: SalesId) -> Option<Sales> {
        self.inner.lock().rows.get(&id).cloned()
    }

    /// Store `sales` under a freshly assigned id and return the stored row.
    /// Ids are never reused, even after a delete.
    pub fn insert(&self, sales: Sales) -> Sales {
        let mut table = self.inner.lock();
        table.last_id += 1;
        let id = table.last_id;
        let stored = Sales {
            id: Some(id),
            ..sales
        };
        table.rows.insert(id, stored.clone());
        stored
    }

    /// Overwrite an existing row. `None` if `sales` has no id or the id
    /// is unknown.
    pub fn replace(&self, sales: Sales) -> Option<Sales> {
        let id = sales.id?;
        let mut table = self.inner.lock();
        let row = table.rows.get_mut(&id)?;
        *row = sales;
        Some(row.clone())
    }

    pub fn delete_by_id(&self, id: SalesId) -> bool {
        self.inner.lock().rows.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().rows.len()
    }
}
