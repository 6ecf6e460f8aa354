//! Entity kinds — the host record types that emit lifecycle events.
//!
//! The engine never stores these records itself; it only needs to know
//! which kind of record an event refers to so triggers can discriminate.

use serde::{Deserialize, Serialize};

/// A domain record kind tracked by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A security audit.
    Audit,
    /// A project under audit.
    Project,
    /// A conception (design) analysis.
    Conception,
    /// A risk analysis entry.
    Risk,
    /// A recommendation issued by an auditor.
    Recommandation,
    /// A finding ("constat").
    Constat,
    /// A remediation action plan.
    PlanAction,
}

impl EntityKind {
    /// Stable snake_case name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Project => "project",
            Self::Conception => "conception",
            Self::Risk => "risk",
            Self::Recommandation => "recommandation",
            Self::Constat => "constat",
            Self::PlanAction => "plan_action",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EntityKind; 7] = [
        EntityKind::Audit,
        EntityKind::Project,
        EntityKind::Conception,
        EntityKind::Risk,
        EntityKind::Recommandation,
        EntityKind::Constat,
        EntityKind::PlanAction,
    ];

    #[test]
    fn should_roundtrip_through_serde_json() {
        for kind in ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let parsed: EntityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn should_serialize_as_snake_case_string() {
        let json = serde_json::to_string(&EntityKind::PlanAction).unwrap();
        assert_eq!(json, "\"plan_action\"");
    }

    #[test]
    fn should_match_display_and_serde_representation() {
        for kind in ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
