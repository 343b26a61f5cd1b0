// ✂️ Bill Splitter - how much a split moves a friend's balance
//
// Pure arithmetic, no state. The delta is from the friend's side of the
// ledger and is added to the selected friend's balance:
//
//   you paid        → friend owes you their share   → delta = +friend_expense
//   friend paid     → you owe the friend your share → delta = -user_expense

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// PAYER
// ============================================================================

/// Who fronted the whole bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    /// The other party
    pub fn flip(self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}

// ============================================================================
// SPLIT REQUEST
// ============================================================================

/// A validated bill split: 0 <= user_expense <= bill_total
///
/// Only built through `new`/`parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRequest {
    bill_total: i64,
    user_expense: i64,
    payer: Payer,
}

impl SplitRequest {
    pub fn new(bill_total: i64, user_expense: i64, payer: Payer) -> LedgerResult<Self> {
        if bill_total < 0 {
            return Err(LedgerError::validation(
                "bill",
                "Bill value cannot be negative",
            ));
        }
        if user_expense < 0 {
            return Err(LedgerError::validation(
                "user_expense",
                "Your expense cannot be negative",
            ));
        }
        if user_expense > bill_total {
            return Err(LedgerError::validation(
                "user_expense",
                format!(
                    "Your expense ({}) cannot exceed the bill ({})",
                    user_expense, bill_total
                ),
            ));
        }

        Ok(SplitRequest {
            bill_total,
            user_expense,
            payer,
        })
    }

    /// Build a request from raw form text
    ///
    /// Both amounts must be present and parse as whole numbers.
    pub fn parse(bill_text: &str, user_expense_text: &str, payer: Payer) -> LedgerResult<Self> {
        let bill_total = parse_amount("bill", "Bill value", bill_text)?;
        let user_expense = parse_amount("user_expense", "Your expense", user_expense_text)?;
        SplitRequest::new(bill_total, user_expense, payer)
    }

    pub fn bill_total(&self) -> i64 {
        self.bill_total
    }

    pub fn user_expense(&self) -> i64 {
        self.user_expense
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn friend_expense(&self) -> i64 {
        self.bill_total - self.user_expense
    }

    pub fn delta(&self) -> i64 {
        compute_delta(self.bill_total, self.user_expense, self.payer)
    }
}

fn parse_amount(field: &str, label: &str, text: &str) -> LedgerResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LedgerError::validation(field, format!("{} is required", label)));
    }
    text.parse::<i64>().map_err(|_| {
        LedgerError::validation(field, format!("{} must be a whole number, got '{}'", label, text))
    })
}

/// Balance delta for the selected friend
///
/// Expects `0 <= user_expense <= bill_total`; `SplitRequest::new` enforces it.
pub fn compute_delta(bill_total: i64, user_expense: i64, payer: Payer) -> i64 {
    let friend_expense = bill_total - user_expense;

    match payer {
        Payer::User => friend_expense,
        Payer::Friend => -user_expense,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_pays_friend_owes_their_share() {
        assert_eq!(compute_delta(100, 40, Payer::User), 60);
        assert_eq!(compute_delta(75, 0, Payer::User), 75);
        assert_eq!(compute_delta(75, 75, Payer::User), 0);
    }

    #[test]
    fn test_friend_pays_user_owes_their_share() {
        assert_eq!(compute_delta(50, 10, Payer::Friend), -10);
        assert_eq!(compute_delta(75, 75, Payer::Friend), -75);
        assert_eq!(compute_delta(75, 0, Payer::Friend), 0);
    }

    #[test]
    fn test_zero_bill_is_zero_delta() {
        assert_eq!(compute_delta(0, 0, Payer::User), 0);
        assert_eq!(compute_delta(0, 0, Payer::Friend), 0);
    }

    #[test]
    fn test_request_derives_friend_expense() {
        let request = SplitRequest::new(100, 40, Payer::User).unwrap();

        assert_eq!(request.friend_expense(), 60);
        assert_eq!(request.delta(), 60);
    }

    #[test]
    fn test_request_rejects_bad_amounts() {
        assert!(SplitRequest::new(-1, 0, Payer::User).is_err());
        assert!(SplitRequest::new(10, -1, Payer::User).is_err());

        let over = SplitRequest::new(10, 11, Payer::Friend).unwrap_err();
        assert!(matches!(over, LedgerError::Validation { ref field, .. } if field == "user_expense"));
        assert!(over.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_parse_from_form_text() {
        let request = SplitRequest::parse(" 100 ", "40", Payer::Friend).unwrap();
        assert_eq!(request.bill_total(), 100);
        assert_eq!(request.user_expense(), 40);
        assert_eq!(request.delta(), -40);

        let missing = SplitRequest::parse("", "40", Payer::User).unwrap_err();
        assert!(missing.to_string().contains("Bill value is required"));

        let garbage = SplitRequest::parse("100", "abc", Payer::User).unwrap_err();
        assert!(garbage.to_string().contains("whole number"));
    }

    #[test]
    fn test_payer_flip_and_serde() {
        assert_eq!(Payer::User.flip(), Payer::Friend);
        assert_eq!(Payer::Friend.flip(), Payer::User);
        assert_eq!(serde_json::to_string(&Payer::Friend).unwrap(), "\"friend\"");
        assert_eq!(serde_json::from_str::<Payer>("\"user\"").unwrap(), Payer::User);
    }
}
