use serde::{Deserialize, Serialize};

/// Account metadata remembered for each credential registered through the
/// adapter. The legacy platform cannot enumerate its credentials, so this is
/// what a later `get` without an allow-list builds its candidate list from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub credential_id:     String,
    pub rp_display_name:   String,
    pub user_display_name: String,
    pub user_id:           String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name:      Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_image_uri: Option<String>,
}
