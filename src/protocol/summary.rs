//! Serializable protocol summaries for tooling.
//!
//! A summary is a read-only snapshot; it cannot be turned back into a
//! protocol, and minted keys appear only as their labels.

use serde::{Deserialize, Serialize};

use crate::descriptor::DescriptorKind;
use crate::error::ProtocolError;
use crate::member::{MemberKind, Scope};

use super::{Protocol, ProtocolId};

/// Snapshot of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub key: String,
    pub minted: bool,
    pub scope: Scope,
    pub kind: MemberKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<DescriptorKind>,
}

/// Snapshot of one protocol and its own members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSummary {
    pub id: ProtocolId,
    pub name: String,
    pub parents: Vec<String>,
    pub members: Vec<MemberSummary>,
}

impl ProtocolSummary {
    /// Serialize the summary to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ProtocolError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ProtocolError::internal(format!("serialize protocol summary: {e}")))
    }

    /// Deserialize a summary from JSON.
    pub fn from_json(s: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(s)
            .map_err(|e| ProtocolError::internal(format!("deserialize protocol summary: {e}")))
    }
}

impl Protocol {
    /// Returns a serializable snapshot of this protocol.
    #[must_use]
    pub fn summary(&self) -> ProtocolSummary {
        ProtocolSummary {
            id: self.id(),
            name: self.name().to_string(),
            parents: self.parents().iter().map(|p| p.name().to_string()).collect(),
            members: self
                .members()
                .iter()
                .map(|m| MemberSummary {
                    key: m.key().label(),
                    minted: m.key().is_minted(),
                    scope: m.scope(),
                    kind: m.kind(),
                    body: m.descriptor().map(|d| d.kind()),
                })
                .collect(),
        }
    }
}
