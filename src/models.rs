// Request and response schemas for the GoShort! HTTP API.
//
// Every endpoint answers with the same envelope: `success`, `message`
// and an endpoint-specific payload flattened next to them. `Envelope`
// checks `success` before the payload is decoded, so a failed call never
// has to carry a well-formed payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Go servers encode empty slices and absent objects as `null`; treat
/// that the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    pub session: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BrowserStat {
    #[serde(rename = "browser")]
    pub browser_name: String,
    pub count: i64,
    #[serde(default)]
    pub country: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Analytics {
    #[serde(rename = "clicks", default)]
    pub click_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub browsers: Vec<BrowserStat>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Shortlink {
    pub id: i64,
    pub long_url: String,
    pub short_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analytics: Analytics,
}

#[derive(Deserialize, Debug)]
pub struct ShortenPayload {
    pub shortlink: Shortlink,
}

#[derive(Deserialize, Debug)]
pub struct ListPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub shortlinks: Vec<Shortlink>,
}

/// Raw response envelope, payload still undecoded.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Outcome of opening an envelope.
#[derive(Debug)]
pub enum Opened<T> {
    Accepted(T),
    Rejected(String),
}

impl Envelope {
    /// Decode the payload as `T`, unless the server reported failure.
    pub fn open<T: DeserializeOwned>(self) -> serde_json::Result<Opened<T>> {
        if !self.success {
            return Ok(Opened::Rejected(self.message));
        }
        let payload = serde_json::from_value(Value::Object(self.payload))?;
        Ok(Opened::Accepted(payload))
    }
}
