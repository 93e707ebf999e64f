//! Observable session state published to the presentation layer.

use crate::provider::Account;

/// What the page currently knows about the wallet connection.
///
/// Only `Connected` carries account or network data, so "not connected"
/// always implies address, public key and network are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Startup, before the wallet has been queried.
    #[default]
    Unknown,
    Disconnected,
    /// The wallet could not be reached or answered badly. Recoverable: the
    /// next successful connect or account change replaces it.
    Unavailable { reason: String },
    Connected {
        address: String,
        public_key: Option<String>,
        network: String,
    },
}

impl SessionState {
    pub(crate) fn connected(account: Account, network: String) -> Self {
        Self::Connected {
            address: account.address,
            public_key: account.public_key,
            network,
        }
    }

    /// Tri-state connection flag: `None` until the first query settles.
    pub fn is_connected(&self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Connected { .. } => Some(true),
            Self::Disconnected | Self::Unavailable { .. } => Some(false),
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn public_key(&self) -> Option<&str> {
        match self {
            Self::Connected { public_key, .. } => public_key.as_deref(),
            _ => None,
        }
    }

    pub fn network(&self) -> Option<&str> {
        match self {
            Self::Connected { network, .. } => Some(network),
            _ => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Everything the page renders from: session state plus the in-flight flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: SessionState,
    /// A claim transaction is waiting on the wallet.
    pub submitting: bool,
    /// Hash of the last transaction the wallet accepted, if any.
    pub last_transaction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connected_carries_fields() {
        let states = [
            SessionState::Unknown,
            SessionState::Disconnected,
            SessionState::Unavailable {
                reason: "gone".into(),
            },
        ];
        for state in states {
            assert_ne!(state.is_connected(), Some(true));
            assert_eq!(state.address(), None);
            assert_eq!(state.public_key(), None);
            assert_eq!(state.network(), None);
        }

        let connected = SessionState::connected(
            Account {
                address: "0xAB".into(),
                public_key: None,
            },
            "mainnet".into(),
        );
        assert_eq!(connected.is_connected(), Some(true));
        assert_eq!(connected.address(), Some("0xAB"));
        assert_eq!(connected.public_key(), None);
        assert_eq!(connected.network(), Some("mainnet"));
    }

    #[test]
    fn test_unknown_is_neither_connected_nor_disconnected() {
        assert_eq!(SessionState::default().is_connected(), None);
        assert_eq!(SessionState::Disconnected.is_connected(), Some(false));
    }
}
