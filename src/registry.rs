// 📒 Friend Registry - ordered, append-only collection of friends
//
// Insertion order is display order. Friends are never removed or renamed;
// the only mutation after insertion is a balance delta.

use crate::error::{LedgerError, LedgerResult};
use crate::friend::{Friend, FriendId};
use tracing::debug;

/// Avatar service the seed friends point at
pub const SEED_IMAGE_BASE: &str = "https://i.pravatar.cc/48";

// ============================================================================
// FRIEND REGISTRY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FriendRegistry {
    friends: Vec<Friend>,
}

impl FriendRegistry {
    /// Empty registry
    pub fn new() -> Self {
        FriendRegistry {
            friends: Vec::new(),
        }
    }

    /// Registry holding the three startup friends
    pub fn seeded() -> Self {
        let mut registry = FriendRegistry::new();
        registry.register_seed_friends();
        registry
    }

    fn register_seed_friends(&mut self) {
        for (id, name, balance) in [
            ("118836", "Clark", -7),
            ("933372", "Sarah", 20),
            ("499476", "Anthony", 0),
        ] {
            let image = format!("{}?u={}", SEED_IMAGE_BASE, id);
            self.friends
                .push(Friend::with_id(FriendId::from(id), name, &image, balance));
        }
    }

    /// Add a new friend with a fresh id and a zero balance
    ///
    /// Both `name` and `image` must be present. Duplicate names are fine;
    /// only ids are unique. The stored image is decorated with the id so
    /// every friend gets a distinct avatar URL.
    pub fn add(&mut self, name: &str, image: &str) -> LedgerResult<Friend> {
        let name = name.trim();
        let image = image.trim();

        if name.is_empty() {
            return Err(LedgerError::validation("name", "Friend name is required"));
        }
        if image.is_empty() {
            return Err(LedgerError::validation("image", "Image URL is required"));
        }

        let mut id = FriendId::generate();
        while self.get(&id).is_some() {
            id = FriendId::generate();
        }

        let image = format!("{}?={}", image, id);
        let friend = Friend::with_id(id, name, &image, 0);
        self.friends.push(friend.clone());

        debug!(id = %friend.id, name = %friend.name, "friend registered");
        Ok(friend)
    }

    /// All friends in insertion order
    pub fn list(&self) -> &[Friend] {
        &self.friends
    }

    pub fn get(&self, id: &FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    /// Add `delta` to the friend's balance
    ///
    /// Unknown ids and balances that would leave the i64 range both fail
    /// with the registry untouched.
    pub fn apply_balance_delta(&mut self, id: &FriendId, delta: i64) -> LedgerResult<&Friend> {
        let friend = self
            .friends
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        friend.balance = friend
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::validation("bill", "amount too large"))?;
        Ok(friend)
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_friends() {
        let registry = FriendRegistry::seeded();
        let friends = registry.list();

        assert_eq!(friends.len(), 3);

        let summary: Vec<(&str, &str, i64)> = friends
            .iter()
            .map(|f| (f.id.as_str(), f.name.as_str(), f.balance))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("118836", "Clark", -7),
                ("933372", "Sarah", 20),
                ("499476", "Anthony", 0),
            ]
        );
        assert_eq!(friends[0].image, "https://i.pravatar.cc/48?u=118836");
    }

    #[test]
    fn test_add_appends_with_zero_balance_and_fresh_id() {
        let mut registry = FriendRegistry::seeded();

        let friend = registry.add("Dana", "https://i.pravatar.cc/48").unwrap();

        assert_eq!(friend.balance, 0);
        assert_eq!(friend.name, "Dana");
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.list().last(), Some(&friend));

        let clashes = registry
            .list()
            .iter()
            .filter(|f| f.id == friend.id)
            .count();
        assert_eq!(clashes, 1);
    }

    #[test]
    fn test_add_decorates_image_with_id() {
        let mut registry = FriendRegistry::new();

        let friend = registry.add("Dana", "https://i.pravatar.cc/48").unwrap();

        assert_eq!(
            friend.image,
            format!("https://i.pravatar.cc/48?={}", friend.id)
        );
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let mut registry = FriendRegistry::new();

        let first = registry.add("Sam", "img").unwrap();
        let second = registry.add("Sam", "img").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_rejects_missing_name_or_image() {
        let mut registry = FriendRegistry::seeded();

        let result = registry.add("", "https://i.pravatar.cc/48");
        assert!(matches!(
            result,
            Err(LedgerError::Validation { ref field, .. }) if field == "name"
        ));

        let result = registry.add("   ", "https://i.pravatar.cc/48");
        assert!(result.is_err());

        let result = registry.add("Dana", "");
        assert!(matches!(
            result,
            Err(LedgerError::Validation { ref field, .. }) if field == "image"
        ));

        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_apply_balance_delta() {
        let mut registry = FriendRegistry::seeded();
        let sarah = FriendId::from("933372");

        let updated = registry.apply_balance_delta(&sarah, 60).unwrap();
        assert_eq!(updated.balance, 80);

        registry.apply_balance_delta(&sarah, -100).unwrap();
        assert_eq!(registry.get(&sarah).unwrap().balance, -20);
    }

    #[test]
    fn test_apply_balance_delta_unknown_id_fails() {
        let mut registry = FriendRegistry::seeded();
        let before = registry.clone();

        let result = registry.apply_balance_delta(&FriendId::from("nobody"), 10);

        assert_eq!(result.unwrap_err(), LedgerError::NotFound(FriendId::from("nobody")));
        assert_eq!(registry.list(), before.list());
    }

    #[test]
    fn test_apply_balance_delta_out_of_range_fails() {
        let mut registry = FriendRegistry::seeded();
        let before = registry.clone();
        let sarah = FriendId::from("933372");
        let clark = FriendId::from("118836");

        let over = registry.apply_balance_delta(&sarah, i64::MAX).unwrap_err();
        assert_eq!(over, LedgerError::validation("bill", "amount too large"));

        let under = registry.apply_balance_delta(&clark, i64::MIN);
        assert!(matches!(under, Err(LedgerError::Validation { ref field, .. }) if field == "bill"));

        assert_eq!(registry.list(), before.list());

        // right up to the edge is still fine
        let anthony = FriendId::from("499476");
        assert_eq!(registry.apply_balance_delta(&anthony, i64::MAX).unwrap().balance, i64::MAX);
    }
}
