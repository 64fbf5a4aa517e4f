use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::core::Record;

/// A newsletter subscription. Created once on admission, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmailSubscription {
    pub id: Uuid,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub address: String,
}

impl Record for EmailSubscription {
    type Draft = NewSubscription;

    const KIND: &'static str = "EmailSubscription";

    fn from_draft(id: Uuid, draft: NewSubscription) -> Self {
        Self {
            id,
            address: draft.address,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }
}
