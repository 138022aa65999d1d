//! Reference-data lookup tables published by the registry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GleifError;

/// One of the fixed reference-data resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    /// ISO country codes and names.
    Countries,
    /// ISO 3166-2 region/subdivision codes.
    Regions,
    /// Legal form types (Corporation, LLC, Ltd, ...).
    EntityLegalForms,
    /// Jurisdictions for entity registration.
    Jurisdictions,
    /// Business register authorities.
    RegistrationAuthorities,
    /// LEI registration agents.
    RegistrationAgents,
    /// Organizational role types.
    OfficialOrganizationalRoles,
}

impl ReferenceKind {
    /// Every kind, in the order snapshots are taken.
    pub const ALL: [Self; 7] = [
        Self::Countries,
        Self::Regions,
        Self::EntityLegalForms,
        Self::Jurisdictions,
        Self::RegistrationAuthorities,
        Self::RegistrationAgents,
        Self::OfficialOrganizationalRoles,
    ];

    /// Resource path below the API root; also the snapshot file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Regions => "regions",
            Self::EntityLegalForms => "entity-legal-forms",
            Self::Jurisdictions => "jurisdictions",
            Self::RegistrationAuthorities => "registration-authorities",
            Self::RegistrationAgents => "registration-agents",
            Self::OfficialOrganizationalRoles => "official-organizational-roles",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Countries => "ISO country codes and names",
            Self::Regions => "ISO 3166-2 region/subdivision codes",
            Self::EntityLegalForms => "Legal entity form types (e.g., Corporation, LLC, Ltd)",
            Self::Jurisdictions => "Jurisdictions for entity registration",
            Self::RegistrationAuthorities => "Business register authorities",
            Self::RegistrationAgents => "LEI registration agents",
            Self::OfficialOrganizationalRoles => "Organizational role types",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceKind {
    type Err = GleifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                GleifError::invalid_arg(format!(
                    "unknown data type '{s}', available types: {}",
                    names.join(", ")
                ))
            })
    }
}

/// All items of one reference resource, flattened to `{id, ...attributes}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    /// Resource description.
    pub description: String,
    /// Number of items.
    pub count: usize,
    /// Flattened items in server order.
    pub items: Vec<serde_json::Value>,
}

/// A reference resource that could not be snapshotted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFailure {
    /// Resource kind.
    pub kind: ReferenceKind,
    /// What went wrong.
    pub error: GleifError,
}

/// Outcome of snapshotting every reference resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceReport {
    /// Successful snapshots.
    pub snapshots: Vec<ReferenceSnapshot>,
    /// Resources that failed.
    pub failures: Vec<ReferenceFailure>,
}
