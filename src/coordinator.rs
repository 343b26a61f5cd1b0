// 🧭 Coordinator - the one owner of ledger state
//
// Wires registry, selection and splitter together and is the only entry
// point the presentation layer mutates through. Every call runs to
// completion; errors come back as values and never poison the state.
//
// Panel visibility (add-friend form, split form) belongs to the
// presentation layer. The coordinator only tells it when the add-friend
// panel has to close, through `Handled::close_add_friend`.

use crate::error::{LedgerError, LedgerResult};
use crate::friend::{Friend, FriendId};
use crate::registry::FriendRegistry;
use crate::selection::SelectionController;
use crate::splitter::{Payer, SplitRequest};
use tracing::{debug, info, warn};

// ============================================================================
// RESULTS
// ============================================================================

/// Value of a successful operation plus what the presentation layer must do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled<T> {
    pub value: T,
    /// The add-friend panel must be closed
    pub close_add_friend: bool,
}

impl<T> Handled<T> {
    fn closing_add_friend(value: T) -> Self {
        Handled {
            value,
            close_add_friend: true,
        }
    }

    fn plain(value: T) -> Self {
        Handled {
            value,
            close_add_friend: false,
        }
    }
}

/// What a split did to the selected friend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub friend_id: FriendId,
    pub delta: i64,
    pub new_balance: i64,
}

// ============================================================================
// COORDINATOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    registry: FriendRegistry,
    selection: SelectionController,
}

impl Coordinator {
    pub fn new(registry: FriendRegistry) -> Self {
        Coordinator {
            registry,
            selection: SelectionController::new(),
        }
    }

    /// Fresh session over the startup friends
    pub fn seeded() -> Self {
        Coordinator::new(FriendRegistry::seeded())
    }

    // ========================================================================
    // READS (re-fetched by the UI after every mutation)
    // ========================================================================

    pub fn friends(&self) -> &[Friend] {
        self.registry.list()
    }

    pub fn selected_id(&self) -> Option<&FriendId> {
        self.selection.selected()
    }

    /// The live record of the selected friend, looked up by id
    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection
            .selected()
            .and_then(|id| self.registry.get(id))
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selection.is_selected(id)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Entering the add-friend flow drops any selection
    pub fn begin_add_friend(&mut self) {
        if self.selection.selected().is_some() {
            debug!("selection cleared for add-friend flow");
        }
        self.selection.clear();
    }

    /// Register a new friend; on success the add-friend panel closes
    ///
    /// Selection is left as it is.
    pub fn handle_add_friend(&mut self, name: &str, image: &str) -> LedgerResult<Handled<Friend>> {
        match self.registry.add(name, image) {
            Ok(friend) => {
                info!(id = %friend.id, name = %friend.name, "friend added");
                Ok(Handled::closing_add_friend(friend))
            }
            Err(e) => {
                warn!(error = %e, "add friend rejected");
                Err(e)
            }
        }
    }

    /// Toggle selection of `id`; the add-friend panel always closes
    ///
    /// Returns the selection after the toggle.
    pub fn handle_select(&mut self, id: &FriendId) -> LedgerResult<Handled<Option<FriendId>>> {
        let friend = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        let selected = self.selection.toggle(friend).cloned();
        debug!(friend = %id, selected = ?selected, "selection toggled");

        Ok(Handled::closing_add_friend(selected))
    }

    /// Split a bill with the selected friend and book the delta
    ///
    /// Fails with `NoSelection` before looking at the amounts. The
    /// selection stays in place afterwards.
    pub fn handle_split(
        &mut self,
        bill_total: i64,
        user_expense: i64,
        payer: Payer,
    ) -> LedgerResult<Handled<SplitOutcome>> {
        if self.selection.selected().is_none() {
            warn!("split attempted with no friend selected");
            return Err(LedgerError::NoSelection);
        }

        let request = SplitRequest::new(bill_total, user_expense, payer).map_err(|e| {
            warn!(error = %e, "split rejected");
            e
        })?;

        self.apply_split(&request)
    }

    /// Book an already validated split against the selected friend
    fn apply_split(&mut self, request: &SplitRequest) -> LedgerResult<Handled<SplitOutcome>> {
        let id = self
            .selection
            .selected()
            .cloned()
            .ok_or(LedgerError::NoSelection)?;

        let delta = request.delta();
        let friend = self
            .registry
            .apply_balance_delta(&id, delta)
            .map_err(|e| {
                warn!(friend = %id, delta, error = %e, "split not booked");
                e
            })?;

        info!(
            friend = %friend.name,
            bill = request.bill_total(),
            user_expense = request.user_expense(),
            payer = ?request.payer(),
            delta,
            balance = friend.balance,
            "bill split"
        );

        Ok(Handled::plain(SplitOutcome {
            friend_id: id,
            delta,
            new_balance: friend.balance,
        }))
    }
}

// ============================================================================
// TESTS
// ============================================================================
