//! The wallet-session view model.

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::WalletError;
use crate::provider::{
    Account, EventSink, NetworkChange, WalletEvent, WalletEvents, WalletProvider,
};
use crate::state::{SessionSnapshot, SessionState};
use crate::transaction::{PendingTransaction, TransactionRequest};

/// Owns the session state for one wallet and mediates every operation on it.
///
/// Three unordered sources write the state: [`initialize`](Self::initialize),
/// the account-change channel and the network-change channel. Each replaces
/// the fields it owns, so the most recent update wins. All methods take
/// `&self`; the type is meant to be shared behind an `Rc` on a single thread.
pub struct WalletSession<W> {
    wallet: W,
    state: watch::Sender<SessionSnapshot>,
    events: EventSink,
}

impl<W: WalletProvider> WalletSession<W> {
    pub fn new(wallet: W) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            wallet,
            state,
            events: EventSink::default(),
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Register this session's callbacks on the wallet's change channels.
    /// Feed the result to [`run`](Self::run).
    ///
    /// Callbacks the wallet refuses now (extension not injected yet) are
    /// registered again after the next successful `initialize` or connect.
    pub fn subscribe_events(&self) -> WalletEvents {
        let events = self.events.open();
        self.events.attach(&self.wallet);
        events
    }

    fn publish(&self, session: SessionState) {
        debug!(?session, "publishing session state");
        self.state.send_modify(|snapshot| snapshot.session = session);
    }

    fn publish_unavailable(&self, operation: &str, err: &WalletError) {
        warn!(%err, "{operation} failed, marking wallet unavailable");
        self.publish(SessionState::Unavailable {
            reason: err.to_string(),
        });
    }

    async fn query_status(&self) -> Result<SessionState, WalletError> {
        if !self.wallet.is_connected().await? {
            return Ok(SessionState::Disconnected);
        }
        let (account, network) = tokio::try_join!(self.wallet.account(), self.wallet.network())?;
        Ok(SessionState::connected(account, network))
    }

    /// One-shot startup query of the wallet's current status.
    ///
    /// A missing or failing wallet is published as
    /// [`SessionState::Unavailable`] and the error is returned.
    pub async fn initialize(&self) -> Result<(), WalletError> {
        match self.query_status().await {
            Ok(session) => {
                info!(connected = ?session.is_connected(), "wallet status loaded");
                self.events.attach(&self.wallet);
                self.publish(session);
                Ok(())
            }
            Err(err) => {
                self.publish_unavailable("initialize", &err);
                Err(err)
            }
        }
    }

    /// The active account changed; `None` means the wallet disconnected.
    pub async fn on_account_changed(&self, account: Option<Account>) -> Result<(), WalletError> {
        let Some(account) = account else {
            info!("wallet account cleared");
            self.publish(SessionState::Disconnected);
            return Ok(());
        };
        match self.wallet.network().await {
            Ok(network) => {
                info!(address = %account.address, %network, "wallet account changed");
                self.publish(SessionState::connected(account, network));
                Ok(())
            }
            Err(err) => {
                self.publish_unavailable("account change", &err);
                Err(err)
            }
        }
    }

    /// Rewrites only the network; ignored unless connected, since a
    /// disconnected session carries no network.
    pub fn on_network_changed(&self, change: NetworkChange) {
        let updated = self.state.send_if_modified(|snapshot| match &mut snapshot.session {
            SessionState::Connected { network, .. } => {
                *network = change.network_name;
                true
            }
            _ => false,
        });
        if updated {
            info!(network = ?self.state.borrow().session.network(), "wallet network changed");
        } else {
            debug!("ignoring network change while not connected");
        }
    }

    /// Disconnection itself arrives as an empty account change.
    pub fn on_disconnect_notified(&self) {
        info!("wallet reported disconnect");
    }

    pub async fn handle_event(&self, event: WalletEvent) -> Result<(), WalletError> {
        match event {
            WalletEvent::AccountChanged(account) => self.on_account_changed(account).await,
            WalletEvent::NetworkChanged(change) => {
                self.on_network_changed(change);
                Ok(())
            }
            WalletEvent::Disconnected => {
                self.on_disconnect_notified();
                Ok(())
            }
        }
    }

    /// Drain wallet notifications. The session keeps the sending side open,
    /// so this only returns if `events` came from an older subscription.
    pub async fn run(&self, mut events: WalletEvents) {
        while let Some(event) = events.recv().await {
            // Failures are already published as `Unavailable`.
            let _ = self.handle_event(event).await;
        }
        debug!("wallet event channel closed");
    }

    /// Disconnect when connected, otherwise prompt the user to connect.
    ///
    /// A failed or rejected request leaves the state as it was.
    pub async fn toggle_connection(&self) -> Result<(), WalletError> {
        let connected = self.state.borrow().session.is_connected() == Some(true);
        let result = if connected {
            self.disconnect().await
        } else {
            self.connect().await
        };
        if let Err(err) = &result {
            warn!(%err, connected, "toggling wallet connection failed");
        }
        result
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.wallet.disconnect().await?;
        info!("wallet disconnected");
        self.publish(SessionState::Disconnected);
        Ok(())
    }

    async fn connect(&self) -> Result<(), WalletError> {
        let account = self.wallet.connect().await?;
        let network = self.wallet.network().await?;
        info!(address = %account.address, %network, "wallet connected");
        self.events.attach(&self.wallet);
        self.publish(SessionState::connected(account, network));
        Ok(())
    }

    /// Sign and submit `request` unless a submission is already in flight.
    ///
    /// Returns `Ok(None)` without touching the wallet when busy. The busy
    /// flag is cleared once the wallet settles, whatever the outcome.
    pub async fn submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Option<PendingTransaction>, WalletError> {
        let started = self.state.send_if_modified(|snapshot| {
            if snapshot.submitting {
                return false;
            }
            snapshot.submitting = true;
            true
        });
        if !started {
            debug!("transaction already in flight, ignoring submit");
            return Ok(None);
        }

        info!(function = %request.function, "submitting transaction");
        let result = self.wallet.sign_and_submit_transaction(request).await;

        self.state.send_modify(|snapshot| {
            snapshot.submitting = false;
            if let Ok(pending) = &result {
                snapshot.last_transaction = Some(pending.hash.clone());
            }
        });

        match result {
            Ok(pending) => {
                info!(hash = %pending.hash, extra = ?pending.extra, "transaction pending");
                Ok(Some(pending))
            }
            Err(err) => {
                if err.is_user_rejection() {
                    warn!(%err, "transaction not submitted");
                } else {
                    error!(%err, "transaction submission failed");
                }
                Err(err)
            }
        }
    }
}
