//! The capability surface the session needs from a wallet, plus the
//! structured types its callbacks deliver.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::WalletError;
use crate::transaction::{PendingTransaction, TransactionRequest};

/// A wallet identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub address: String,
    pub public_key: Option<String>,
}

impl Account {
    /// Normalize raw callback fields. Wallets signal disconnection with an
    /// account whose address is empty or missing, which maps to `None`.
    pub fn from_parts(address: Option<String>, public_key: Option<String>) -> Option<Self> {
        let address = address.filter(|a| !a.is_empty())?;
        Some(Self {
            address,
            public_key: public_key.filter(|k| !k.is_empty()),
        })
    }
}

/// Payload of the wallet's network-change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkChange {
    pub network_name: String,
}

impl NetworkChange {
    /// A notification without a network name carries nothing to apply.
    pub fn from_name(network_name: Option<String>) -> Option<Self> {
        let network_name = network_name.filter(|n| !n.is_empty())?;
        Some(Self { network_name })
    }
}

/// Everything the session needs from a wallet extension.
///
/// All calls may suspend on wallet UI; none are `Send` because browser
/// wallets live on the page's single thread.
#[async_trait(?Send)]
pub trait WalletProvider {
    async fn is_connected(&self) -> Result<bool, WalletError>;

    async fn account(&self) -> Result<Account, WalletError>;

    /// Name of the network the wallet currently targets.
    async fn network(&self) -> Result<String, WalletError>;

    /// Ask the user to connect. Opens the wallet prompt.
    async fn connect(&self) -> Result<Account, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Sign and broadcast `request`. Opens the wallet prompt.
    async fn sign_and_submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<PendingTransaction, WalletError>;

    /// Register a persistent account-change callback. `None` means the
    /// wallet disconnected. Fails, dropping `handler`, when the wallet is
    /// not there to hold it.
    fn on_account_change(&self, handler: Box<dyn Fn(Option<Account>)>) -> Result<(), WalletError>;

    fn on_network_change(&self, handler: Box<dyn Fn(NetworkChange)>) -> Result<(), WalletError>;

    fn on_disconnect(&self, handler: Box<dyn Fn()>) -> Result<(), WalletError>;
}

/// A notification from one of the wallet's change channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    AccountChanged(Option<Account>),
    NetworkChanged(NetworkChange),
    Disconnected,
}

/// Receiving half of the wallet notification channels, in arrival order.
#[derive(Debug)]
pub struct WalletEvents {
    rx: mpsc::UnboundedReceiver<WalletEvent>,
}

impl WalletEvents {
    /// Next notification. Pends for as long as the session is alive, even
    /// while no wallet callback is registered.
    pub async fn recv(&mut self) -> Option<WalletEvent> {
        self.rx.recv().await
    }

    #[cfg(test)]
    pub(crate) fn try_recv(&mut self) -> Option<WalletEvent> {
        self.rx.try_recv().ok()
    }
}

/// Which of the three callbacks the wallet has accepted so far.
#[derive(Clone, Copy, Debug, Default)]
struct Attached {
    account: bool,
    network: bool,
    disconnect: bool,
}

/// Sending half of the notification channel, owned by the session.
///
/// Holding the sender here keeps the channel open when the wallet is absent
/// and refuses every callback, so a later [`attach`](Self::attach) can still
/// deliver into the receiver handed out by [`open`](Self::open).
#[derive(Debug, Default)]
pub(crate) struct EventSink {
    tx: RefCell<Option<mpsc::UnboundedSender<WalletEvent>>>,
    attached: Cell<Attached>,
}

impl EventSink {
    /// Start a fresh channel; callbacks registered on an earlier one are
    /// considered gone.
    pub(crate) fn open(&self) -> WalletEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.tx.borrow_mut() = Some(tx);
        self.attached.set(Attached::default());
        WalletEvents { rx }
    }

    /// Register whichever callbacks the wallet has not accepted yet.
    /// Returns `true` once all three are in place.
    pub(crate) fn attach<W: WalletProvider + ?Sized>(&self, wallet: &W) -> bool {
        let Some(tx) = self.tx.borrow().clone() else {
            return false;
        };
        let mut attached = self.attached.get();

        if !attached.account {
            let tx = tx.clone();
            attached.account = accepted(
                "account",
                wallet.on_account_change(Box::new(move |account| {
                    // The receiver only goes away with the session itself.
                    let _ = tx.send(WalletEvent::AccountChanged(account));
                })),
            );
        }
        if !attached.network {
            let tx = tx.clone();
            attached.network = accepted(
                "network",
                wallet.on_network_change(Box::new(move |change| {
                    let _ = tx.send(WalletEvent::NetworkChanged(change));
                })),
            );
        }
        if !attached.disconnect {
            attached.disconnect = accepted(
                "disconnect",
                wallet.on_disconnect(Box::new(move || {
                    let _ = tx.send(WalletEvent::Disconnected);
                })),
            );
        }

        self.attached.set(attached);
        attached.account && attached.network && attached.disconnect
    }
}

fn accepted(channel: &str, result: Result<(), WalletError>) -> bool {
    match result {
        Ok(()) => {
            debug!(channel, "wallet callback registered");
            true
        }
        Err(err) => {
            warn!(channel, %err, "wallet callback not registered");
            false
        }
    }
}
