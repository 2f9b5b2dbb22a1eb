use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student entry. The `id` is assigned by the store at creation time and
/// never supplied by callers. `updated_at` stays absent until the record has
/// been updated at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub career: String,
    pub semester: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-supplied fields for a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub career: String,
    pub semester: u32,
}

/// Partial update. `None` means the field was not supplied and keeps its
/// current value; `Some(v)` overwrites it, so an explicit empty string stays
/// distinguishable from an omitted field. A patch with nothing supplied is
/// legal and still touches `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub career: Option<String>,
    pub semester: Option<u32>,
}
