use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Reserved owner principal for entities not attributed to an end user.
pub const SYSTEM_USER: &str = "system";

/// Current time as an RFC 3339 timestamp string (second precision, UTC).
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// ApiMeta — ownership and lifecycle metadata stamped on every owned document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    pub owner: String,
    #[serde(rename = "type")]
    pub type_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub creation_date: String,
    pub modified_date: String,
}

impl ApiMeta {
    /// Stamp fresh metadata: creation and modification dates are equal at
    /// creation time.
    pub fn stamp(owner: &str, type_field: &str, subtype: Option<&str>) -> Self {
        let now = timestamp();
        Self {
            owner: owner.to_string(),
            type_field: type_field.to_string(),
            subtype: subtype.map(str::to_string),
            creation_date: now.clone(),
            modified_date: now,
        }
    }

    /// Refresh the modification date after a content mutation.
    pub fn touch(&mut self) {
        self.modified_date = timestamp();
    }
}
