//! Domain vocabulary for split sheet sessions.
//!
//! The settings layer stores the allowed values as ordered string lists so
//! deployments can rename or extend them. This module provides the typed
//! counterparts of the default lists:
//!
//! - [`ContributorRole`] - What a contributor did on the song
//! - [`RightsType`] - Which rights a split covers (master, publishing, both)
//! - [`ProAffiliation`] - Performing-rights organization of a contributor
//! - [`StorageKey`] - Logical local-storage keys used by persistence

use serde::{Deserialize, Serialize};

// =============================================================================
// Contributor Role
// =============================================================================

/// Role of a contributor on a recording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContributorRole {
    /// Main performing artist
    Artist,
    /// Producer (beats, arrangement, recording direction)
    Producer,
    /// Songwriter or lyricist
    Writer,
    /// Recording, mixing or mastering engineer
    Engineer,
    /// Featured artist
    Featured,
    /// Any other contribution
    Other,
}

impl ContributorRole {
    /// All roles in display order.
    pub const ALL: [ContributorRole; 6] = [
        Self::Artist,
        Self::Producer,
        Self::Writer,
        Self::Engineer,
        Self::Featured,
        Self::Other,
    ];

    /// Parse a role from its label or a common alias.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase();
        match normalized.as_str() {
            "ARTIST" | "PERFORMER" | "MAIN ARTIST" => Some(Self::Artist),
            "PRODUCER" | "PROD" => Some(Self::Producer),
            "WRITER" | "SONGWRITER" | "LYRICIST" | "COMPOSER" => Some(Self::Writer),
            "ENGINEER" | "MIX ENGINEER" | "MASTERING ENGINEER" => Some(Self::Engineer),
            "FEATURED" | "FEAT" | "FEATURED ARTIST" => Some(Self::Featured),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Artist => "Artist",
            Self::Producer => "Producer",
            Self::Writer => "Writer",
            Self::Engineer => "Engineer",
            Self::Featured => "Featured",
            Self::Other => "Other",
        }
    }
}

// =============================================================================
// Rights Type
// =============================================================================

/// Which rights an ownership split applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RightsType {
    /// Sound recording (master) rights
    Master,
    /// Composition (publishing) rights
    Publishing,
    /// Master and publishing
    Both,
}

impl RightsType {
    /// All rights types in display order.
    pub const ALL: [RightsType; 3] = [Self::Master, Self::Publishing, Self::Both];

    /// Parse a rights type from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase();
        match normalized.as_str() {
            "MASTER" | "MASTERS" | "SOUND RECORDING" => Some(Self::Master),
            "PUBLISHING" | "COMPOSITION" => Some(Self::Publishing),
            "BOTH" | "ALL" => Some(Self::Both),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Master => "Master",
            Self::Publishing => "Publishing",
            Self::Both => "Both",
        }
    }

    pub fn covers_master(&self) -> bool {
        matches!(self, Self::Master | Self::Both)
    }

    pub fn covers_publishing(&self) -> bool {
        matches!(self, Self::Publishing | Self::Both)
    }
}

// =============================================================================
// PRO Affiliation
// =============================================================================

/// Performing-rights organization a contributor is registered with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProAffiliation {
    #[serde(rename = "ASCAP")]
    Ascap,
    #[serde(rename = "BMI")]
    Bmi,
    #[serde(rename = "SESAC")]
    Sesac,
    #[serde(rename = "GMR")]
    Gmr,
    /// Any other society, or none
    Other,
}

impl ProAffiliation {
    /// All affiliations in display order.
    pub const ALL: [ProAffiliation; 5] = [
        Self::Ascap,
        Self::Bmi,
        Self::Sesac,
        Self::Gmr,
        Self::Other,
    ];

    /// Parse an affiliation from its acronym or full name.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase();
        match normalized.as_str() {
            "ASCAP" | "AMERICAN SOCIETY OF COMPOSERS, AUTHORS AND PUBLISHERS" => Some(Self::Ascap),
            "BMI" | "BROADCAST MUSIC, INC." | "BROADCAST MUSIC INC" => Some(Self::Bmi),
            "SESAC" => Some(Self::Sesac),
            "GMR" | "GLOBAL MUSIC RIGHTS" => Some(Self::Gmr),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascap => "ASCAP",
            Self::Bmi => "BMI",
            Self::Sesac => "SESAC",
            Self::Gmr => "GMR",
            Self::Other => "Other",
        }
    }
}

// =============================================================================
// Storage Keys
// =============================================================================

/// Logical local-storage keys.
///
/// The underlying key names are configurable (see
/// [`crate::settings::StorageKeyNames`]); these are the stable logical
/// identifiers persistence code asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Identifier of this device
    DeviceId,
    /// Split sheet session currently being edited
    ActiveSession,
    /// Edits not yet synced to the backend
    PendingChanges,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [Self::DeviceId, Self::ActiveSession, Self::PendingChanges];

    /// Logical name, as used in settings files.
    pub fn logical_name(&self) -> &'static str {
        match self {
            Self::DeviceId => "deviceId",
            Self::ActiveSession => "activeSession",
            Self::PendingChanges => "pendingChanges",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels_round_trip() {
        for role in ContributorRole::ALL {
            assert_eq!(ContributorRole::from_label(role.label()), Some(role));
        }
    }

    #[test]
    fn test_role_aliases() {
        assert_eq!(ContributorRole::from_label(" feat "), Some(ContributorRole::Featured));
        assert_eq!(ContributorRole::from_label("songwriter"), Some(ContributorRole::Writer));
        assert_eq!(ContributorRole::from_label("drummer"), None);
    }

    #[test]
    fn test_rights_coverage() {
        assert!(RightsType::Both.covers_master());
        assert!(RightsType::Both.covers_publishing());
        assert!(RightsType::Master.covers_master());
        assert!(!RightsType::Master.covers_publishing());
        assert!(!RightsType::Publishing.covers_master());
    }

    #[test]
    fn test_pro_affiliation_parsing() {
        assert_eq!(ProAffiliation::from_label("ascap"), Some(ProAffiliation::Ascap));
        assert_eq!(ProAffiliation::from_label("Global Music Rights"), Some(ProAffiliation::Gmr));
        assert_eq!(ProAffiliation::from_label("SACEM"), None);
    }

    #[test]
    fn test_pro_affiliation_serde_uses_acronyms() {
        let json = serde_json::to_string(&ProAffiliation::Sesac).unwrap();
        assert_eq!(json, "\"SESAC\"");
        let parsed: ProAffiliation = serde_json::from_str("\"BMI\"").unwrap();
        assert_eq!(parsed, ProAffiliation::Bmi);
    }

    #[test]
    fn test_storage_key_logical_names() {
        let names: Vec<_> = StorageKey::ALL.iter().map(|k| k.logical_name()).collect();
        assert_eq!(names, vec!["deviceId", "activeSession", "pendingChanges"]);
    }
}
