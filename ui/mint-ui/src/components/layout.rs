use dioxus::prelude::*;
use mint_session::SessionSnapshot;

#[component]
pub fn Header(title: String) -> Element {
    rsx! {
        h1 { "{title}" }
    }
}

/// Wallet availability and the last accepted transaction, when there is
/// anything to say about either.
#[component]
pub fn StatusLine() -> Element {
    let snapshot = use_context::<Signal<SessionSnapshot>>();
    let reason = snapshot.read().session.unavailable_reason().map(str::to_string);
    let last_tx = snapshot.read().last_transaction.clone();

    rsx! {
        if let Some(reason) = reason {
            p { class: "error-text", "Wallet unavailable: {reason}" }
        }
        if let Some(hash) = last_tx {
            p { class: "status-line mono", "Last transaction: {truncate_hash(&hash)}" }
        }
    }
}

/// Counts in chars; the hash comes straight from the wallet and need not be ASCII.
fn truncate_hash(hash: &str) -> String {
    let len = hash.chars().count();
    if len > 14 {
        let head: String = hash.chars().take(8).collect();
        let tail: String = hash.chars().skip(len - 6).collect();
        format!("{head}...{tail}")
    } else {
        hash.to_string()
    }
}
