use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkit_core::{DomainError, DomainResult, Entity, OrderId};

/// Minimal order: an identity and the time it was persisted.
///
/// Used as an empty-state fixture, so nothing is required at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: Option<OrderId>,
    created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Record identity and creation time on first persist.
    ///
    /// Persisting again with the same id keeps the original timestamp.
    pub fn mark_persisted(&mut self, id: OrderId, at: DateTime<Utc>) -> DomainResult<()> {
        match self.id {
            Some(existing) if existing != id => Err(DomainError::conflict(format!(
                "order already persisted as {existing}, cannot become {id}"
            ))),
            Some(_) => Ok(()),
            None => {
                self.id = Some(id);
                self.created_at = Some(at);
                Ok(())
            }
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Option<OrderId> {
        self.id
    }
}
