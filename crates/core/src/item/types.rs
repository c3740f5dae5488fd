use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identity of an item.
pub type ItemId = i64;

/// Whether a row is live or has been soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    /// Builds the lifecycle from a nullable `deleted_at` column.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    /// The value of the `deleted_at` column.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }
}

/// A persisted item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub completed: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl ItemRecord {
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Projects the row onto its wire representation.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id,
            completed: self.completed,
            description: self.description.clone(),
        }
    }

    /// Applies an update body.
    ///
    /// The completion flag is always overwritten. The description is only
    /// replaced when the body carries one.
    pub fn apply(&mut self, body: &ItemBody, now: DateTime<Utc>) {
        self.completed = body.completed;
        if let Some(description) = &body.description {
            self.description = Some(description.clone());
        }
        self.updated_at = now;
    }

    /// Marks the row as deleted.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.lifecycle = Lifecycle::Deleted { at };
        self.updated_at = at;
    }
}

/// A row that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub completed: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewItem {
    pub fn from_body(body: ItemBody, now: DateTime<Utc>) -> Self {
        Self {
            completed: body.completed,
            description: body.description,
            created_at: now,
        }
    }

    /// Turns the pending row into a live record with the given identity.
    pub fn into_record(self, id: ItemId) -> ItemRecord {
        ItemRecord {
            id,
            completed: self.completed,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
            lifecycle: Lifecycle::Active,
        }
    }
}

/// The wire representation of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating or updating an item.
///
/// Any `id` field sent by the caller is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBody {
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemBody {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            completed: false,
            description: Some(description.into()),
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}
