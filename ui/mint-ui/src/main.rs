#![allow(non_snake_case)]

mod components;
mod state;
mod wallet;

use std::rc::Rc;

use dioxus::prelude::*;
use mint_session::{MintConfig, SessionSnapshot, WalletSession};
use tracing::{error, Level};

use state::SharedSession;
use wallet::InjectedWallet;

const STYLE: &str = include_str!("../assets/style.css");
const CONFIG: &str = include_str!("../assets/config.json");

fn main() {
    let (config, config_error) = match MintConfig::from_json(CONFIG) {
        Ok(config) => (config, None),
        Err(err) => (MintConfig::default(), Some(err)),
    };

    // Only fails if a subscriber is already installed.
    let _ = dioxus_logger::init(config.log_level.parse().unwrap_or(Level::INFO));
    if let Some(err) = config_error {
        error!(%err, "invalid embedded config, falling back to defaults");
    }

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    // Provide shared state to all components
    let session: SharedSession =
        use_context_provider(|| Rc::new(WalletSession::new(InjectedWallet)));
    let mut snapshot = use_context_provider(|| Signal::new(SessionSnapshot::default()));

    // Wire the wallet's change channels, load the initial status, then mirror
    // every published snapshot into the signal.
    use_future(move || {
        let session = session.clone();
        async move {
            let mut updates = session.watch();
            let events = session.subscribe_events();

            spawn({
                let session = session.clone();
                async move { session.run(events).await }
            });
            spawn({
                let session = session.clone();
                async move {
                    // Failures are published as `Unavailable`.
                    let _ = session.initialize().await;
                }
            });

            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    rsx! {
        document::Style { {STYLE} }
        MintPage {}
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[component]
fn MintPage() -> Element {
    let config = use_context::<MintConfig>();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                components::layout::Header { title: config.title.clone() }
                components::connection_status::ConnectionStatus {}
                h3 { class: "caption", "Connect the wallet, and mint an NFT!" }
                div {
                    components::connection_status::ConnectButton {}
                    components::mint::MintButton {}
                }
                components::layout::StatusLine {}
            }
        }
    }
}
