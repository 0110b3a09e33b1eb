//! Serde helpers for fields whose stored representation predates the typed
//! records.
//!
//! Provider values were written verbatim with empty-string or null fallbacks,
//! so the readers here accept every form found in existing files while the
//! writers emit one canonical form.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;

/// Reads an optional epoch timestamp from a number, a numeric string, `""`,
/// or `null`.
pub fn timestamp<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(de)? {
    Value::Null => Ok(None),
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().map(|f| f as i64))
      .map(Some)
      .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {n}"))),
    Value::String(s) if s.trim().is_empty() => Ok(None),
    Value::String(s) => s
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| D::Error::custom(format!("invalid timestamp: {s:?}"))),
    other => Err(D::Error::custom(format!("expected a timestamp, found {other}"))),
  }
}

/// Reads a non-negative count, treating `null` as zero.
pub fn count<'de, D>(de: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<u64>::deserialize(de)?.unwrap_or(0))
}

/// Reads a string, treating `null` as empty.
pub fn text<'de, D>(de: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Image lists are stored as one `", "`-joined string.
pub fn serialize_image_list<S>(urls: &[String], ser: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  ser.serialize_str(&urls.join(", "))
}

/// Reads an image list from either the joined-string form or a JSON array.
pub fn deserialize_image_list<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Repr {
    Joined(String),
    List(Vec<String>),
    Missing(()),
  }

  Ok(match Repr::deserialize(de)? {
    Repr::Joined(s) => s
      .split(", ")
      .filter(|u| !u.is_empty())
      .map(str::to_owned)
      .collect(),
    Repr::List(urls) => urls,
    Repr::Missing(()) => Vec::new(),
  })
}
