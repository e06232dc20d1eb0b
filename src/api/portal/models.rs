use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Bearer session obtained from the token endpoint.
///
/// Carries no expiry: the portal simply starts rejecting the token at some
/// point, and the caller logs in again. The issuing credentials are kept so
/// that callers can re-authenticate without re-threading them.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    client_id: String,
    client_secret: String,
}

impl Session {
    pub(crate) const fn new(
        access_token: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self { access_token, client_id, client_secret }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Client identifier the token was issued via.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Session {
    /// Token and secret stay out of logs.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Session").field("client_id", &self.client_id).finish_non_exhaustive()
    }
}

/// Calendar-date parameter of the portal endpoints.
///
/// The portal accepts the literal `today` in place of a date. It is forwarded
/// verbatim and resolved by the portal at request time, never client-side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum PortalDate {
    #[display("today")]
    Today,

    #[display("{_0}")]
    On(NaiveDate),
}

impl From<NaiveDate> for PortalDate {
    fn from(date: NaiveDate) -> Self {
        Self::On(date)
    }
}

/// A piece of plant equipment as the portal reports it.
///
/// Only the fields this crate acts on are typed; everything else the portal
/// includes lands in [`Component::extra`] untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    /// Equipment type, e.g. `Inverter`. Numeric wire values are normalized to
    /// their decimal string form.
    #[serde(rename = "type", deserialize_with = "deserialize_id")]
    pub component_type: String,

    /// Identifier under which cross-epoch channel data is addressed.
    #[serde(rename = "crossEpochId", default, deserialize_with = "deserialize_optional_id")]
    pub cross_epoch_id: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Component {
    #[must_use]
    pub fn is_inverter(&self) -> bool {
        self.component_type == "Inverter"
    }
}

/// One channel time series: samples for one channel on one date, positionally
/// aligned to the portal's time index for that date. `null` samples mark gaps.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelData {
    /// Channel name, e.g. `ProdPdc`.
    pub name: String,

    #[serde(deserialize_with = "deserialize_id")]
    pub date: String,

    #[serde(rename = "dataPoints", default)]
    pub data_points: Vec<Option<f64>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ChannelData {
    /// Key under which combined series are accumulated: `<channel>_<date>`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.name, self.date)
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        _ => Err(de::Error::custom("expected a string or a number")),
    }
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(_) => Err(de::Error::custom("expected a string or a number")),
    }
}
