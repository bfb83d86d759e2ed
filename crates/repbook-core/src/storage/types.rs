//! Data types owned by the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata recorded when a store file is first created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version of the key-value layout (e.g., "1")
    pub format_version: String,

    /// Installation that created this store
    pub device_id: Uuid,

    /// When this store was created
    pub created_at: DateTime<Utc>,

    /// Last write timestamp (informational)
    pub last_modified: DateTime<Utc>,
}
