use dioxus::prelude::*;
use mint_session::{MintConfig, SessionSnapshot};

use crate::state::SharedSession;

pub fn mint_label(submitting: bool) -> &'static str {
    if submitting {
        "Minting..."
    } else {
        "Submit Mint Transaction"
    }
}

/// Submits the configured claim transaction. Left enabled while a
/// submission is in flight; the session drops repeated clicks.
#[component]
pub fn MintButton() -> Element {
    let snapshot = use_context::<Signal<SessionSnapshot>>();
    let session = use_context::<SharedSession>();
    let config = use_context::<MintConfig>();

    let submitting = snapshot.read().submitting;

    let on_submit = move |_| {
        let session = session.clone();
        let request = config.claim_request();
        spawn(async move {
            let _ = session.submit_transaction(&request).await;
        });
    };

    rsx! {
        button { class: "button", r#type: "button", onclick: on_submit, "{mint_label(submitting)}" }
    }
}
