//! Domain DTOs for the users API.
//!
//! # Design
//! These types mirror the remote service's user schema but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two.

use serde::{Deserialize, Deserializer, Serialize};

/// A single user record as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// The remote service sends integer ids; they are kept as strings.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

/// Outcome of one workflow invocation, handed back to the trigger.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkflowOutcome {
    pub message: String,
    pub status: u16,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Unsigned(n) => n.to_string(),
        Id::Signed(n) => n.to_string(),
    })
}
