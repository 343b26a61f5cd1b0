// 👥 Friend Entity - Stable identity + running balance
//
// "The id is IDENTITY (never changes), the balance is a VALUE (moves with every split)"
//
// Sign convention:
// - balance < 0 → you owe the friend
// - balance > 0 → the friend owes you
// - balance = 0 → settled

use serde::Serialize;
use std::fmt;

// ============================================================================
// FRIEND ID
// ============================================================================

/// Opaque identifier, assigned once at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FriendId(String);

impl FriendId {
    /// Fresh collision-resistant id (random v4 UUID)
    pub fn generate() -> Self {
        FriendId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FriendId {
    fn from(s: &str) -> Self {
        FriendId(s.to_string())
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FRIEND ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    // ========================================================================
    // IDENTITY - never changes
    // ========================================================================
    pub id: FriendId,

    // ========================================================================
    // VALUES
    // ========================================================================
    /// Display name (immutable, no edit operation)
    pub name: String,

    /// Avatar URL, decorated with the id for new friends
    pub image: String,

    /// Signed balance in whole currency units
    pub balance: i64,
}

impl Friend {
    /// Create a friend with a fixed id (seed data, tests)
    pub fn with_id(id: FriendId, name: &str, image: &str, balance: i64) -> Self {
        Friend {
            id,
            name: name.to_string(),
            image: image.to_string(),
            balance,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }

    /// Human-readable balance line, e.g. "You owe Clark €7"
    pub fn balance_message(&self, currency: &str) -> String {
        match self.status() {
            BalanceStatus::YouOwe(amount) => {
                format!("You owe {} {}{}", self.name, currency, amount)
            }
            BalanceStatus::OwesYou(amount) => {
                format!("{} owes you {}{}", self.name, currency, amount)
            }
            BalanceStatus::Even => format!("You and {} are even.", self.name),
        }
    }
}

// ============================================================================
// BALANCE STATUS
// ============================================================================

/// Which way the money flows between you and a friend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// You owe the friend this (absolute) amount
    YouOwe(u64),

    /// The friend owes you this amount
    OwesYou(u64),

    Even,
}

impl BalanceStatus {
    pub fn from_balance(balance: i64) -> Self {
        match balance {
            b if b < 0 => BalanceStatus::YouOwe(b.unsigned_abs()),
            b if b > 0 => BalanceStatus::OwesYou(b.unsigned_abs()),
            _ => BalanceStatus::Even,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
