use serde::{Deserialize, Serialize};

/// The fixed set of roles a user record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operations,
    Employment,
    Manager,
    User,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Operations,
        Role::Employment,
        Role::Manager,
        Role::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operations => "operations",
            Role::Employment => "employment",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "operations" => Some(Role::Operations),
            "employment" => Some(Role::Employment),
            "manager" => Some(Role::Manager),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical permission keys. One key per gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    JobCreate,
    JobEdit,
    JobDelete,
    JobAssign,
    JobUnassign,
    CandidateView,
    CandidateCreate,
    CandidateEdit,
    CandidateDelete,
    CandidateAdvance,
    CandidateRevert,
    PhotoUpload,
}

/// Older deployments stored verb-first keys; accept them on input, never
/// emit them.
const LEGACY_ALIASES: &[(&str, Ability)] = &[
    ("create_job", Ability::JobCreate),
    ("edit_job", Ability::JobEdit),
    ("delete_job", Ability::JobDelete),
    ("assign_job", Ability::JobAssign),
    ("unassign_job", Ability::JobUnassign),
    ("view_candidates", Ability::CandidateView),
    ("create_candidate", Ability::CandidateCreate),
    ("edit_candidate", Ability::CandidateEdit),
    ("delete_candidate", Ability::CandidateDelete),
    ("advance_candidate", Ability::CandidateAdvance),
    ("revert_candidate", Ability::CandidateRevert),
    ("upload_photo", Ability::PhotoUpload),
];

impl Ability {
    pub const ALL: [Ability; 12] = [
        Ability::JobCreate,
        Ability::JobEdit,
        Ability::JobDelete,
        Ability::JobAssign,
        Ability::JobUnassign,
        Ability::CandidateView,
        Ability::CandidateCreate,
        Ability::CandidateEdit,
        Ability::CandidateDelete,
        Ability::CandidateAdvance,
        Ability::CandidateRevert,
        Ability::PhotoUpload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::JobCreate => "job_create",
            Ability::JobEdit => "job_edit",
            Ability::JobDelete => "job_delete",
            Ability::JobAssign => "job_assign",
            Ability::JobUnassign => "job_unassign",
            Ability::CandidateView => "candidate_view",
            Ability::CandidateCreate => "candidate_create",
            Ability::CandidateEdit => "candidate_edit",
            Ability::CandidateDelete => "candidate_delete",
            Ability::CandidateAdvance => "candidate_advance",
            Ability::CandidateRevert => "candidate_revert",
            Ability::PhotoUpload => "photo_upload",
        }
    }

    /// Accepts canonical keys and legacy aliases, case-insensitively.
    pub fn parse(raw: &str) -> Option<Ability> {
        let key = raw.trim().to_ascii_lowercase();
        if let Some(ability) = Ability::ALL.iter().find(|a| a.as_str() == key) {
            return Some(*ability);
        }
        LEGACY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, ability)| *ability)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authorization decision, free of IO. The admin role holds every
/// ability regardless of the stored grants.
pub fn is_allowed(role: Role, ability: Ability, grants: &[Ability]) -> bool {
    role.is_admin() || grants.contains(&ability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("  Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("OPERATIONS"), Some(Role::Operations));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn ability_parse_accepts_canonical_keys() {
        for ability in Ability::ALL {
            assert_eq!(Ability::parse(ability.as_str()), Some(ability));
        }
    }

    #[test]
    fn ability_parse_accepts_legacy_aliases() {
        assert_eq!(Ability::parse("create_job"), Some(Ability::JobCreate));
        assert_eq!(Ability::parse("View_Candidates"), Some(Ability::CandidateView));
        assert_eq!(Ability::parse("job_publish"), None);
    }

    #[test]
    fn admin_bypasses_grants() {
        for ability in Ability::ALL {
            assert!(is_allowed(Role::Admin, ability, &[]));
        }
    }

    #[test]
    fn non_admin_requires_a_grant() {
        let grants = [Ability::JobCreate, Ability::JobEdit];
        assert!(is_allowed(Role::Operations, Ability::JobCreate, &grants));
        assert!(!is_allowed(Role::Operations, Ability::JobDelete, &grants));
        assert!(!is_allowed(Role::User, Ability::CandidateView, &[]));
    }
}
