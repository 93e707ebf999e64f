use dioxus::prelude::*;
use mint_session::{SessionSnapshot, SessionState};

use crate::state::SharedSession;

pub fn address_line(state: &SessionState) -> String {
    match state.address() {
        Some(address) => format!("Address: {address}"),
        None => "Not Connected".to_string(),
    }
}

pub fn network_line(state: &SessionState) -> String {
    format!("Network: {}", state.network().unwrap_or_default())
}

pub fn connect_label(state: &SessionState) -> &'static str {
    if state.is_connected() == Some(true) {
        "Disconnect"
    } else {
        "Connect"
    }
}

#[component]
pub fn ConnectionStatus() -> Element {
    let snapshot = use_context::<Signal<SessionSnapshot>>();
    let state = snapshot.read().session.clone();

    rsx! {
        p { class: "mono", "{address_line(&state)}" }
        p { "{network_line(&state)}" }
    }
}

#[component]
pub fn ConnectButton() -> Element {
    let snapshot = use_context::<Signal<SessionSnapshot>>();
    let session = use_context::<SharedSession>();

    let label = connect_label(&snapshot.read().session);

    let toggle = move |_| {
        let session = session.clone();
        spawn(async move {
            // Errors are logged by the session and leave the state untouched.
            let _ = session.toggle_connection().await;
        });
    };

    rsx! {
        button { class: "button", r#type: "button", onclick: toggle, "{label}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_lines() {
        let state = SessionState::Disconnected;
        assert_eq!(address_line(&state), "Not Connected");
        assert_eq!(network_line(&state), "Network: ");
        assert_eq!(connect_label(&state), "Connect");
    }

    #[test]
    fn test_connected_lines() {
        let state = SessionState::Connected {
            address: "0xAB".into(),
            public_key: Some("0xCD".into()),
            network: "mainnet".into(),
        };
        assert_eq!(address_line(&state), "Address: 0xAB");
        assert_eq!(network_line(&state), "Network: mainnet");
        assert_eq!(connect_label(&state), "Disconnect");
    }

    #[test]
    fn test_unavailable_offers_connect() {
        let state = SessionState::Unavailable {
            reason: "No wallet extension detected".into(),
        };
        assert_eq!(connect_label(&state), "Connect");
        assert_eq!(address_line(&state), "Not Connected");
    }
}
