//! # Team Membership Policy
//!
//! Which team members count as active staff is decided by the surrounding
//! practice system (HR records, login status). Compliance is computed only
//! over active staff, so the decision is a pluggable [`MembershipPolicy`].

use std::fmt;

use crate::model::TeamMember;

/// Employment statuses that mark a member as no longer on staff.
const INACTIVE_EMPLOYMENT_STATUSES: [&str; 4] = ["inactive", "terminated", "former", "left"];

/// Decides whether a team member is part of the active staff.
pub trait MembershipPolicy: Send + Sync + fmt::Debug {
    /// Whether `member` is active.
    fn is_active(&self, member: &TeamMember) -> bool;
}

/// Membership policy used when the practice system supplies no other.
///
/// A member is active unless `is_active` is explicitly `false` or the
/// employment status is one of `inactive`, `terminated`, `former`, `left`
/// (case-insensitive). Members without either field are active.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMembershipPolicy;

impl MembershipPolicy for DefaultMembershipPolicy {
    fn is_active(&self, member: &TeamMember) -> bool {
        if member.is_active == Some(false) {
            return false;
        }
        match member.employment_status.as_deref() {
            Some(status) => {
                let status = status.trim();
                !INACTIVE_EMPLOYMENT_STATUSES
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(status))
            }
            None => true,
        }
    }
}

/// Counts every member as active. Useful when the caller has already
/// filtered the member list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllMembersActive;

impl MembershipPolicy for AllMembersActive {
    fn is_active(&self, _member: &TeamMember) -> bool {
        true
    }
}

impl<P: MembershipPolicy + ?Sized> MembershipPolicy for &P {
    fn is_active(&self, member: &TeamMember) -> bool {
        (**self).is_active(member)
    }
}

impl<P: MembershipPolicy + ?Sized> MembershipPolicy for Box<P> {
    fn is_active(&self, member: &TeamMember) -> bool {
        (**self).is_active(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_core::TeamMemberId;

    fn member() -> TeamMember {
        TeamMember::new(TeamMemberId::new("m-1").unwrap(), "Anna", "Schmidt")
    }

    #[test]
    fn bare_member_is_active() {
        assert!(DefaultMembershipPolicy.is_active(&member()));
    }

    #[test]
    fn explicit_flag_wins() {
        let mut m = member();
        m.is_active = Some(false);
        assert!(!DefaultMembershipPolicy.is_active(&m));
        m.is_active = Some(true);
        assert!(DefaultMembershipPolicy.is_active(&m));
    }

    #[test]
    fn employment_status_is_case_insensitive() {
        let mut m = member();
        m.employment_status = Some("Terminated".into());
        assert!(!DefaultMembershipPolicy.is_active(&m));
        m.employment_status = Some(" LEFT ".into());
        assert!(!DefaultMembershipPolicy.is_active(&m));
        m.employment_status = Some("part_time".into());
        assert!(DefaultMembershipPolicy.is_active(&m));
    }

    #[test]
    fn inactive_status_overrides_active_flag() {
        let mut m = member();
        m.is_active = Some(true);
        m.employment_status = Some("former".into());
        assert!(!DefaultMembershipPolicy.is_active(&m));
    }

    #[test]
    fn permissive_policy_and_boxing() {
        let mut m = member();
        m.is_active = Some(false);
        assert!(AllMembersActive.is_active(&m));
        let boxed: Box<dyn MembershipPolicy> = Box::new(DefaultMembershipPolicy);
        assert!(!boxed.is_active(&m));
    }
}
