//! Distribution profile types.
//!
//! These mirror the records of `linux_distros_full.json`. Only `id` is
//! required; every other field may be missing, `null` or mistyped and reads
//! as `None`/empty.

use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Stable identifier of a distribution (e.g. "ubuntu", "kali").
pub type DistroId = CompactString;

/// One Linux distribution profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistroRecord {
    pub id: DistroId,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_manager: Option<String>,

    /// "LTS", "Rolling", "Release", "Hybrid", ...
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_model: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    /// Smaller is more popular.
    #[serde(
        default,
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub popularity_rank: Option<u32>,

    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub benchmarks: Option<Benchmarks>,

    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub hardware_requirements: Option<HardwareRequirements>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pros: Vec<String>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub cons: Vec<String>,

    /// Feed fields this crate does not interpret (description, family, screenshots, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DistroRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<DistroId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Beginner score, `None` when no benchmarks are published.
    pub fn beginner_score(&self) -> Option<f64> {
        self.benchmarks.as_ref().and_then(|b| b.beginner_score)
    }

    /// Resource usage label ("low", "medium", "high", or anything the feed says).
    pub fn resource_usage(&self) -> Option<&str> {
        self.benchmarks
            .as_ref()
            .and_then(|b| b.resource_usage.as_deref())
    }

    /// Release model, treating a blank string as missing.
    pub fn release_model(&self) -> Option<&str> {
        self.release_model
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Published benchmark figures for a distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub beginner_score: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_user_score: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub stability_score: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub boot_time: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_usage: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Minimum and recommended hardware.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareRequirements {
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum: Option<HardwareSpec>,

    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended: Option<HardwareSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareSpec {
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ram: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage: Option<String>,
}

// ============================================================================
// Lenient fields
//
// A single mistyped value must not reject the whole feed, so every field but
// `id` falls back to its empty form instead of failing.
// ============================================================================

/// Accept a number or a numeric string; anything else reads as `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// A string, or empty for `null` and any other type.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// The string entries of an array; anything else reads as empty.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A nested object, or `None` when the value is not one.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
