//! Safe Rust wrapper around the raw `aptos-sys` bindings.
//!
//! Turns the extension's promises into `Result`s and its loosely typed
//! callback payloads into [`Account`] / [`NetworkChange`] before anything
//! reaches the session.

use aptos_sys::{AptosProvider, USER_REJECTED_CODE};
use async_trait::async_trait;
use js_sys::{Promise, Reflect, JSON};
use mint_session::{
    Account, NetworkChange, PendingTransaction, TransactionRequest, WalletError, WalletProvider,
};
use tracing::warn;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Map a thrown value or rejected promise onto [`WalletError`].
///
/// Wallets reject with `{ code, message }` objects; anything else is
/// stringified as-is.
fn wallet_error(err: JsValue) -> WalletError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    let message = string_field(&err, "message")
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    if code == Some(f64::from(USER_REJECTED_CODE)) {
        WalletError::Rejected(message)
    } else {
        WalletError::Wallet(message)
    }
}

async fn settle(call: Result<Promise, JsValue>) -> Result<JsValue, WalletError> {
    let promise = call.map_err(wallet_error)?;
    JsFuture::from(promise).await.map_err(wallet_error)
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

fn string_field(value: &JsValue, key: &str) -> Option<String> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(key)).ok()?.as_string()
}

fn parse_account(value: &JsValue) -> Option<Account> {
    Account::from_parts(string_field(value, "address"), string_field(value, "publicKey"))
}

fn require_account(value: &JsValue) -> Result<Account, WalletError> {
    parse_account(value)
        .ok_or_else(|| WalletError::InvalidResponse("account without an address".into()))
}

fn parse_network_change(value: &JsValue) -> Option<NetworkChange> {
    NetworkChange::from_name(string_field(value, "networkName"))
}

// ---------------------------------------------------------------------------
// InjectedWallet
// ---------------------------------------------------------------------------

/// The extension injected as `window.aptos`.
///
/// The provider is looked up on every call, so an extension that injects
/// late is picked up by the next user action.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedWallet;

impl InjectedWallet {
    fn provider() -> Result<AptosProvider, WalletError> {
        aptos_sys::injected().ok_or(WalletError::Unavailable)
    }

    /// Hand `closure` to one of the `on*Change` registration methods. The
    /// wallet holds it for the lifetime of the page, so it is leaked once
    /// accepted; a refused closure is dropped.
    fn register<T: ?Sized + WasmClosure>(
        closure: Closure<T>,
        register: impl FnOnce(&AptosProvider, &js_sys::Function) -> Result<(), JsValue>,
    ) -> Result<(), WalletError> {
        let provider = Self::provider()?;
        register(&provider, closure.as_ref().unchecked_ref()).map_err(wallet_error)?;
        closure.forget();
        Ok(())
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedWallet {
    async fn is_connected(&self) -> Result<bool, WalletError> {
        let value = settle(Self::provider()?.is_connected()).await?;
        value
            .as_bool()
            .ok_or_else(|| WalletError::InvalidResponse("isConnected did not return a boolean".into()))
    }

    async fn account(&self) -> Result<Account, WalletError> {
        let value = settle(Self::provider()?.account()).await?;
        require_account(&value)
    }

    async fn network(&self) -> Result<String, WalletError> {
        let value = settle(Self::provider()?.network()).await?;
        value
            .as_string()
            .ok_or_else(|| WalletError::InvalidResponse("network did not return a string".into()))
    }

    async fn connect(&self) -> Result<Account, WalletError> {
        let value = settle(Self::provider()?.connect()).await?;
        require_account(&value)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        settle(Self::provider()?.disconnect()).await?;
        Ok(())
    }

    async fn sign_and_submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<PendingTransaction, WalletError> {
        let provider = Self::provider()?;
        let payload = JSON::parse(&request.to_json()?).map_err(wallet_error)?;
        let value = settle(provider.sign_and_submit_transaction(&payload)).await?;
        // `JSON.stringify(undefined)` yields `undefined`, not a string.
        let json = JSON::stringify(&value).map_err(wallet_error)?.as_string();
        PendingTransaction::from_wallet_response(json.as_deref())
    }

    fn on_account_change(&self, handler: Box<dyn Fn(Option<Account>)>) -> Result<(), WalletError> {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            handler(parse_account(&value));
        });
        Self::register(closure, |provider, f| provider.on_account_change(f))
    }

    fn on_network_change(&self, handler: Box<dyn Fn(NetworkChange)>) -> Result<(), WalletError> {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            match parse_network_change(&value) {
                Some(change) => handler(change),
                None => warn!("ignoring network change without a network name"),
            }
        });
        Self::register(closure, |provider, f| provider.on_network_change(f))
    }

    fn on_disconnect(&self, handler: Box<dyn Fn()>) -> Result<(), WalletError> {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        Self::register(closure, |provider, f| provider.on_disconnect(f))
    }
}
