//! Raw wasm-bindgen bindings for the Aptos wallet provider that browser
//! extensions inject as `window.aptos`.
//!
//! Nothing here interprets the values the wallet hands back: every call
//! returns the raw `Promise` (or `JsValue`) and the safe wrapper in
//! `mint-ui` decides what they mean. Methods that may throw synchronously
//! are bound with `catch` so a misbehaving extension surfaces as `Err`
//! instead of a trap.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Property on `window` under which the extension injects itself.
pub const INJECTION_KEY: &str = "aptos";

/// Error code wallets use when the user dismisses a prompt.
pub const USER_REJECTED_CODE: i32 = 4001;

// ---------------------------------------------------------------------------
// Provider object
// ---------------------------------------------------------------------------

#[wasm_bindgen]
extern "C" {
    /// Opaque handle to `window.aptos`.
    #[derive(Debug, Clone)]
    pub type AptosProvider;

    /// `isConnected(): Promise<boolean>`
    #[wasm_bindgen(method, catch, js_name = isConnected)]
    pub fn is_connected(this: &AptosProvider) -> Result<Promise, JsValue>;

    /// `account(): Promise<{ address, publicKey }>`
    #[wasm_bindgen(method, catch)]
    pub fn account(this: &AptosProvider) -> Result<Promise, JsValue>;

    /// `network(): Promise<string>`
    #[wasm_bindgen(method, catch)]
    pub fn network(this: &AptosProvider) -> Result<Promise, JsValue>;

    /// `connect(): Promise<{ address, publicKey }>` — opens the wallet prompt.
    #[wasm_bindgen(method, catch)]
    pub fn connect(this: &AptosProvider) -> Result<Promise, JsValue>;

    /// `disconnect(): Promise<void>`
    #[wasm_bindgen(method, catch)]
    pub fn disconnect(this: &AptosProvider) -> Result<Promise, JsValue>;

    /// `signAndSubmitTransaction(payload): Promise<PendingTransaction>`
    #[wasm_bindgen(method, catch, js_name = signAndSubmitTransaction)]
    pub fn sign_and_submit_transaction(
        this: &AptosProvider,
        payload: &JsValue,
    ) -> Result<Promise, JsValue>;

    /// `onAccountChange(handler: (account) => void)`
    #[wasm_bindgen(method, catch, js_name = onAccountChange)]
    pub fn on_account_change(this: &AptosProvider, handler: &Function) -> Result<(), JsValue>;

    /// `onNetworkChange(handler: ({ networkName }) => void)`
    #[wasm_bindgen(method, catch, js_name = onNetworkChange)]
    pub fn on_network_change(this: &AptosProvider, handler: &Function) -> Result<(), JsValue>;

    /// `onDisconnect(handler: () => void)`
    #[wasm_bindgen(method, catch, js_name = onDisconnect)]
    pub fn on_disconnect(this: &AptosProvider, handler: &Function) -> Result<(), JsValue>;
}

/// Look up the injected provider on `window`.
///
/// Returns `None` outside a browser or when no extension has injected itself
/// (yet). Extensions inject before `load`, so callers look it up lazily on
/// every use rather than caching a miss.
pub fn injected() -> Option<AptosProvider> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(INJECTION_KEY)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value.unchecked_into::<AptosProvider>())
}
