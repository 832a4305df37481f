//! Project role vocabulary and permission rules.
//!
//! `OWNER` is never stored: the owner is the `projects.owner_id` user and is
//! synthesized whenever a role is reported. Only `EDITOR` and `VIEWER` live
//! in `project_members.role` (the CHECK constraint mirrors
//! [`STORED_MEMBER_ROLES`]).

use validator::ValidationError;

use crate::types::DbId;
use crate::validation::error;

pub const ROLE_OWNER: &str = "OWNER";
pub const ROLE_EDITOR: &str = "EDITOR";
pub const ROLE_VIEWER: &str = "VIEWER";

/// Roles that may be persisted as a membership row.
pub const STORED_MEMBER_ROLES: &[&str] = &[ROLE_EDITOR, ROLE_VIEWER];

/// Identity-provider role that unlocks waitlist administration.
pub const IDENTITY_ROLE_STAFF: &str = "staff";

/// Returns `true` if `role` may be stored on a membership row.
pub fn is_member_role(role: &str) -> bool {
    STORED_MEMBER_ROLES.contains(&role)
}

/// `validator` hook: role must be `EDITOR` or `VIEWER`.
pub fn validate_member_role(role: &str) -> Result<(), ValidationError> {
    if is_member_role(role) {
        Ok(())
    } else {
        Err(error("invalid_role", "Role must be one of: EDITOR, VIEWER"))
    }
}

/// The caller's effective role on a project, or `None` without access.
pub fn effective_role<'a>(
    owner_id: DbId,
    caller_id: DbId,
    membership_role: Option<&'a str>,
) -> Option<&'a str> {
    if owner_id == caller_id {
        Some(ROLE_OWNER)
    } else {
        membership_role
    }
}

/// Owner and every member may read a project and post updates.
///
/// VIEWER members are not blocked from writing updates here; the
/// distinction is only enforced for share-link management.
pub fn can_contribute(role: Option<&str>) -> bool {
    role.is_some()
}

/// Share links may be managed by the owner or an editor.
pub fn can_manage_share_links(role: Option<&str>) -> bool {
    matches!(role, Some(ROLE_OWNER) | Some(ROLE_EDITOR))
}

/// Membership, clients, archival and deletion are owner-only.
pub fn is_owner(role: Option<&str>) -> bool {
    role == Some(ROLE_OWNER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_role_is_synthesized() {
        assert_eq!(effective_role(1, 1, None), Some(ROLE_OWNER));
        assert_eq!(effective_role(1, 1, Some(ROLE_VIEWER)), Some(ROLE_OWNER));
    }

    #[test]
    fn member_role_passes_through() {
        assert_eq!(effective_role(1, 2, Some(ROLE_EDITOR)), Some(ROLE_EDITOR));
        assert_eq!(effective_role(1, 2, None), None);
    }

    #[test]
    fn owner_is_not_a_storable_role() {
        assert!(!is_member_role(ROLE_OWNER));
        assert!(is_member_role(ROLE_EDITOR));
        assert!(is_member_role(ROLE_VIEWER));
        assert!(!is_member_role("editor"));
        assert!(validate_member_role(ROLE_OWNER).is_err());
        assert!(validate_member_role(ROLE_VIEWER).is_ok());
    }

    #[test]
    fn share_link_management_excludes_viewers() {
        assert!(can_manage_share_links(Some(ROLE_OWNER)));
        assert!(can_manage_share_links(Some(ROLE_EDITOR)));
        assert!(!can_manage_share_links(Some(ROLE_VIEWER)));
        assert!(!can_manage_share_links(None));
    }

    #[test]
    fn any_member_can_contribute() {
        assert!(can_contribute(Some(ROLE_VIEWER)));
        assert!(!can_contribute(None));
        assert!(is_owner(Some(ROLE_OWNER)));
        assert!(!is_owner(Some(ROLE_EDITOR)));
    }
}
