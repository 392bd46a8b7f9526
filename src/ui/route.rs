//! View routes and the paths they map to.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::SalesId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/sales`
    List,
    /// `/sales/:id`
    Detail(SalesId),
    /// `/sales/new`
    New,
    /// `/sales/:id/edit`
    Edit(SalesId),
    /// `/sales/:id/delete`
    Delete(SalesId),
}

/// What a view asks the store for when it mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountAction {
    FetchAll,
    FetchOne(SalesId),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route '{0}'")]
pub struct UnknownRoute(pub String);

impl Route {
    pub fn parse(path: &str) -> Result<Self, UnknownRoute> {
        let unknown = || UnknownRoute(path.to_string());
        let trimmed = path.trim().trim_end_matches('/');
        let mut segments = trimmed.strip_prefix('/').ok_or_else(unknown)?.split('/');

        if segments.next() != Some("sales") {
            return Err(unknown());
        }

        let route = match (segments.next(), segments.next()) {
            (None, _) => Route::List,
            (Some("new"), None) => Route::New,
            (Some(id), action) => {
                let id = parse_id(id).ok_or_else(unknown)?;
                match action {
                    None => Route::Detail(id),
                    Some("edit") => Route::Edit(id),
                    Some("delete") => Route::Delete(id),
                    Some(_) => return Err(unknown()),
                }
            }
        };

        if segments.next().is_some() {
            return Err(unknown());
        }
        Ok(route)
    }

    pub fn is_editor(self) -> bool {
        matches!(self, Route::New | Route::Edit(_))
    }

    /// Views that go back to the list once a write succeeds.
    pub fn returns_on_success(self) -> bool {
        matches!(self, Route::New | Route::Edit(_) | Route::Delete(_))
    }

    pub fn mount_action(self) -> MountAction {
        match self {
            Route::List => MountAction::FetchAll,
            Route::New => MountAction::Reset,
            Route::Detail(id) | Route::Edit(id) | Route::Delete(id) => MountAction::FetchOne(id),
        }
    }

    /// Human title for the header.
    pub fn title(self) -> String {
        match self {
            Route::List => "Sales".to_string(),
            Route::Detail(id) => format!("Sales #{}", id),
            Route::New => "New sales".to_string(),
            Route::Edit(id) => format!("Edit sales #{}", id),
            Route::Delete(id) => format!("Delete sales #{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/sales"),
            Route::Detail(id) => write!(f, "/sales/{}", id),
            Route::New => write!(f, "/sales/new"),
            Route::Edit(id) => write!(f, "/sales/{}/edit", id),
            Route::Delete(id) => write!(f, "/sales/{}/delete", id),
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

/// Canonical positive id: digits only, no sign, no leading zero.
fn parse_id(segment: &str) -> Option<SalesId> {
    if segment.starts_with('0') || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
