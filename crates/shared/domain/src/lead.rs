//! Lead domain entity and related types.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Lead domain entity, as stored and as returned by list requests.
///
/// Keys are serialized with the store's column names (`object_type`,
/// `created_at`, ...), which is what lead listing clients consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Lead {
    /// Store-generated identifier
    pub id: i32,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    /// Selected object category
    pub object_type: Option<String>,
    /// Free-text category when none of the predefined ones fit
    pub object_type_other: Option<String>,
    pub area: Option<String>,
    pub rooms: Option<String>,
    /// Requested services, in the order they were selected
    pub services: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub deadline: Option<String>,
    pub budget: Option<String>,
    pub materials_interest: Option<String>,
    pub consultation_type: Option<String>,
    /// Store-generated insertion timestamp (ISO-8601 on the wire)
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Inbound lead form payload.
///
/// Decoding is deliberately lenient: unknown keys are ignored, missing or
/// `null` keys stay absent, and numbers are accepted wherever text is
/// expected (stored as their decimal text). Any other JSON type is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    /// Contact name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Contact phone
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub object_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub object_type_other: Option<String>,
    /// Object area, as text or a number
    #[serde(default, deserialize_with = "lenient_text")]
    pub area: Option<String>,
    /// Room count, as text or a number
    #[serde(default, deserialize_with = "lenient_text")]
    pub rooms: Option<String>,
    /// Requested services; absent or `null` means none
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deadline: Option<String>,
    /// Budget bracket, as text or a number
    #[serde(default, deserialize_with = "lenient_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub materials_interest: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub consultation_type: Option<String>,
}

impl LeadSubmission {
    /// Services to store; a missing list is stored as an empty one.
    pub fn services_or_default(&self) -> Vec<String> {
        self.services.clone().unwrap_or_default()
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedLead {
    pub lead_id: i32,
    pub created_at: DateTime<FixedOffset>,
}

impl SubmittedLead {
    /// Build from a freshly stored lead.
    ///
    /// Returns `None` if the store did not hand back a creation timestamp.
    pub fn from_stored(lead: &Lead) -> Option<Self> {
        lead.created_at.map(|created_at| Self {
            lead_id: lead.id,
            created_at,
        })
    }
}

// =============================================================================
// Lenient text decoding
// =============================================================================

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientTextVisitor)
}

struct LenientTextVisitor;

impl<'de> Visitor<'de> for LenientTextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}
