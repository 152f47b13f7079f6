//! Ownership of user-created records.
//!
//! Memorials and gallery photos belong to one user. Owner-only operations
//! treat a non-owner the same as a missing record, so there is no
//! separate forbidden path here.

use super::UserId;

/// A record with a single owning user.
pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// True when `viewer` is present and owns the record.
    fn is_owned_by(&self, viewer: Option<&UserId>) -> bool {
        viewer.is_some_and(|v| self.is_owner(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Keepsake(UserId);

    impl OwnedByUser for Keepsake {
        fn owner_id(&self) -> &UserId {
            &self.0
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn owner_matches_by_id() {
        let keepsake = Keepsake(user("maria"));
        assert!(keepsake.is_owner(&user("maria")));
        assert!(!keepsake.is_owner(&user("juan")));
    }

    #[test]
    fn anonymous_viewer_owns_nothing() {
        let keepsake = Keepsake(user("maria"));
        assert!(!keepsake.is_owned_by(None));
        assert!(keepsake.is_owned_by(Some(&user("maria"))));
    }
}
