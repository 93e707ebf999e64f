//! Wallet session view model for the claim-mint page.
//!
//! [`WalletSession`] mirrors the connection, account and network status of an
//! external wallet (anything implementing [`WalletProvider`]) into a
//! [`SessionSnapshot`], and serializes submission of the claim-mint
//! transaction so at most one is ever in flight.

mod config;
mod error;
mod provider;
mod session;
mod state;
mod transaction;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, Deployment, MintConfig};
pub use error::WalletError;
pub use provider::{Account, NetworkChange, WalletEvent, WalletEvents, WalletProvider};
pub use session::WalletSession;
pub use state::{SessionSnapshot, SessionState};
pub use transaction::{PendingTransaction, TransactionRequest};
