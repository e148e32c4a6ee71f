//! Raw posts returned by the scraping actors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Platform;

/// One item of a run's dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    /// Post body
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,

    /// Link to the original post
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,

    /// Publication time, when the actor reports one
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Source label written by the actor
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,

    /// Platform whose run produced this post (set locally after fetch)
    #[serde(skip)]
    pub platform: Option<Platform>,
}

/// Actors emit `null` for absent strings; read it as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
