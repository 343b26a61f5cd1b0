// Selection Controller - at most one highlighted friend
//
// States: Unselected | Selected(id). The only transition is `toggle`;
// `clear` forces Unselected. Holds the id, never the friend itself, so
// readers always look the live record up in the registry.

use crate::friend::{Friend, FriendId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<FriendId>,
}

impl SelectionController {
    pub fn new() -> Self {
        SelectionController { selected: None }
    }

    /// Select `friend`, or deselect it if it is already the selection
    ///
    /// Returns the new selection.
    pub fn toggle(&mut self, friend: &Friend) -> Option<&FriendId> {
        if self.selected.as_ref() == Some(&friend.id) {
            self.selected = None;
        } else {
            self.selected = Some(friend.id.clone());
        }
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&FriendId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friend(id: &str, name: &str) -> Friend {
        Friend::with_id(FriendId::from(id), name, "img", 0)
    }

    #[test]
    fn test_starts_unselected() {
        assert_eq!(SelectionController::new().selected(), None);
    }

    #[test]
    fn test_toggle_twice_returns_to_unselected() {
        let mut selection = SelectionController::new();
        let clark = friend("118836", "Clark");

        assert_eq!(selection.toggle(&clark), Some(&clark.id));
        assert_eq!(selection.toggle(&clark), None);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_toggle_other_friend_switches_selection() {
        let mut selection = SelectionController::new();
        let clark = friend("118836", "Clark");
        let sarah = friend("933372", "Sarah");

        selection.toggle(&clark);
        let now = selection.toggle(&sarah).cloned();

        assert_eq!(now, Some(sarah.id.clone()));
        assert!(selection.is_selected(&sarah.id));
        assert!(!selection.is_selected(&clark.id));
    }

    #[test]
    fn test_toggle_compares_identity_not_values() {
        let mut selection = SelectionController::new();
        let before = friend("933372", "Sarah");
        let mut after = before.clone();
        after.balance = 80;

        selection.toggle(&before);
        // same id, stale copy: still deselects
        assert_eq!(selection.toggle(&after), None);
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionController::new();
        selection.toggle(&friend("1", "A"));

        selection.clear();
        assert_eq!(selection.selected(), None);

        selection.clear();
        assert_eq!(selection.selected(), None);
    }
}
