// Split Ledger - Core Library
// Friends, their running balances, one selection, and bill splitting.
// Exposes all modules for use in the TUI, the demo runner, and tests.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod friend;
pub mod logging;
pub mod registry;
pub mod selection;
pub mod splitter;

// Re-export commonly used types
pub use config::AppConfig;
pub use coordinator::{Coordinator, Handled, SplitOutcome};
pub use error::{LedgerError, LedgerResult};
pub use friend::{BalanceStatus, Friend, FriendId};
pub use logging::{init_logging, LogTarget};
pub use registry::FriendRegistry;
pub use selection::SelectionController;
pub use splitter::{compute_delta, Payer, SplitRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
