//! Scripted in-memory wallet for session tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use serde_json::Map;
use tokio::sync::Notify;

use crate::error::WalletError;
use crate::provider::{Account, NetworkChange, WalletProvider};
use crate::transaction::{PendingTransaction, TransactionRequest};

type AccountHandler = Box<dyn Fn(Option<Account>)>;
type NetworkHandler = Box<dyn Fn(NetworkChange)>;
type DisconnectHandler = Box<dyn Fn()>;

pub struct MockWallet {
    pub is_connected: RefCell<Result<bool, WalletError>>,
    pub account: RefCell<Result<Account, WalletError>>,
    pub network: RefCell<Result<String, WalletError>>,
    pub connect: RefCell<Result<Account, WalletError>>,
    pub disconnect: RefCell<Result<(), WalletError>>,
    pub submit: RefCell<Result<PendingTransaction, WalletError>>,

    pub connect_calls: Cell<usize>,
    pub disconnect_calls: Cell<usize>,
    pub sign_calls: Cell<usize>,
    pub last_request: RefCell<Option<TransactionRequest>>,

    /// Whether the extension is present to accept callbacks.
    pub available: Cell<bool>,
    hold_submissions: Cell<bool>,
    gate: Notify,

    account_handlers: RefCell<Vec<AccountHandler>>,
    network_handlers: RefCell<Vec<NetworkHandler>>,
    disconnect_handlers: RefCell<Vec<DisconnectHandler>>,
}

pub fn account(address: &str, public_key: Option<&str>) -> Account {
    Account {
        address: address.to_string(),
        public_key: public_key.map(str::to_string),
    }
}

pub fn pending(hash: &str) -> PendingTransaction {
    PendingTransaction {
        hash: hash.to_string(),
        extra: Map::new(),
    }
}

impl MockWallet {
    /// A wallet with no connected account.
    pub fn disconnected() -> Self {
        Self {
            is_connected: RefCell::new(Ok(false)),
            account: RefCell::new(Err(WalletError::Wallet("not connected".into()))),
            network: RefCell::new(Ok("devnet".into())),
            connect: RefCell::new(Ok(account("0x01", None))),
            disconnect: RefCell::new(Ok(())),
            submit: RefCell::new(Ok(pending("0xfeed"))),
            connect_calls: Cell::new(0),
            disconnect_calls: Cell::new(0),
            sign_calls: Cell::new(0),
            last_request: RefCell::new(None),
            available: Cell::new(true),
            hold_submissions: Cell::new(false),
            gate: Notify::new(),
            account_handlers: RefCell::new(Vec::new()),
            network_handlers: RefCell::new(Vec::new()),
            disconnect_handlers: RefCell::new(Vec::new()),
        }
    }

    /// A wallet already connected to `address` on `network`.
    pub fn connected(address: &str, public_key: Option<&str>, network: &str) -> Self {
        let wallet = Self::disconnected();
        *wallet.is_connected.borrow_mut() = Ok(true);
        *wallet.account.borrow_mut() = Ok(account(address, public_key));
        *wallet.network.borrow_mut() = Ok(network.to_string());
        wallet
    }

    /// Keep every sign call pending until [`MockWallet::release`].
    pub fn holding_submissions(self) -> Self {
        self.hold_submissions.set(true);
        self
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn fire_account_change(&self, account: Option<Account>) {
        for handler in self.account_handlers.borrow().iter() {
            handler(account.clone());
        }
    }

    pub fn fire_network_change(&self, network_name: &str) {
        for handler in self.network_handlers.borrow().iter() {
            handler(NetworkChange {
                network_name: network_name.to_string(),
            });
        }
    }

    pub fn fire_disconnect(&self) {
        for handler in self.disconnect_handlers.borrow().iter() {
            handler();
        }
    }

    fn require_available(&self) -> Result<(), WalletError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(WalletError::Unavailable)
        }
    }

    pub fn handler_count(&self) -> usize {
        self.account_handlers.borrow().len()
            + self.network_handlers.borrow().len()
            + self.disconnect_handlers.borrow().len()
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    async fn is_connected(&self) -> Result<bool, WalletError> {
        self.is_connected.borrow().clone()
    }

    async fn account(&self) -> Result<Account, WalletError> {
        self.account.borrow().clone()
    }

    async fn network(&self) -> Result<String, WalletError> {
        self.network.borrow().clone()
    }

    async fn connect(&self) -> Result<Account, WalletError> {
        self.connect_calls.set(self.connect_calls.get() + 1);
        self.connect.borrow().clone()
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.disconnect_calls.set(self.disconnect_calls.get() + 1);
        self.disconnect.borrow().clone()
    }

    async fn sign_and_submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<PendingTransaction, WalletError> {
        self.sign_calls.set(self.sign_calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        if self.hold_submissions.get() {
            self.gate.notified().await;
        }
        self.submit.borrow().clone()
    }

    fn on_account_change(&self, handler: Box<dyn Fn(Option<Account>)>) -> Result<(), WalletError> {
        self.require_available()?;
        self.account_handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn on_network_change(&self, handler: Box<dyn Fn(NetworkChange)>) -> Result<(), WalletError> {
        self.require_available()?;
        self.network_handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn on_disconnect(&self, handler: Box<dyn Fn()>) -> Result<(), WalletError> {
        self.require_available()?;
        self.disconnect_handlers.borrow_mut().push(handler);
        Ok(())
    }
}
