//! Shared context handed to every component.

use std::rc::Rc;

use mint_session::WalletSession;

use crate::wallet::InjectedWallet;

/// Action handle: the one session driving the injected wallet.
///
/// Components render from the `Signal<SessionSnapshot>` context and only
/// call into this to trigger wallet operations.
pub type SharedSession = Rc<WalletSession<InjectedWallet>>;
