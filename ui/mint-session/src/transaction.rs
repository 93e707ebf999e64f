//! Claim-mint transaction payload and the handle the wallet returns for it.
//!
//! The payload is static configuration: nothing here builds or validates
//! Move arguments, the wallet receives it as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WalletError;

const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";

/// Module and function of the claim entry point.
pub const CLAIM_MODULE: &str = "minter";
pub const CLAIM_FUNCTION: &str = "claim_mint";

/// Entry-function payload handed to `signAndSubmitTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub arguments: Vec<Value>,
    /// `<module-address>::<module>::<function>`
    pub function: String,
    #[serde(rename = "type")]
    pub payload_type: String,
    pub type_arguments: Vec<String>,
}

impl TransactionRequest {
    /// Argument-less entry function call.
    pub fn entry_function(module_address: &str, module: &str, function: &str) -> Self {
        Self {
            arguments: Vec::new(),
            function: format!("{module_address}::{module}::{function}"),
            payload_type: ENTRY_FUNCTION_PAYLOAD.to_string(),
            type_arguments: Vec::new(),
        }
    }

    /// `<module_address>::minter::claim_mint`
    #[cfg(test)]
    pub(crate) fn claim_mint(module_address: &str) -> Self {
        Self::entry_function(module_address, CLAIM_MODULE, CLAIM_FUNCTION)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Opaque handle for a transaction the wallet accepted for broadcast.
///
/// Only the hash is typed; the rest of the wallet's response is kept so it
/// can be logged verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PendingTransaction {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Interpret the serialized value a wallet resolved with. `None` stands
    /// for a value with no JSON form at all, such as `undefined`.
    pub fn from_wallet_response(json: Option<&str>) -> Result<Self, WalletError> {
        let json = json.ok_or_else(|| {
            WalletError::InvalidResponse("wallet returned no pending transaction".into())
        })?;
        Self::from_json(json)
            .map_err(|err| WalletError::InvalidResponse(format!("pending transaction: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PROD: &str = "0xf15c374bcaf95b011c53b65bd5efdd35d12ba5bdee58dab2c8831e9f0bcb4c27";

    #[test]
    fn test_claim_mint_wire_shape() {
        let request = TransactionRequest::claim_mint(PROD);
        let value: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "arguments": [],
                "function": format!("{PROD}::minter::claim_mint"),
                "type": "entry_function_payload",
                "type_arguments": [],
            })
        );
    }

    #[test]
    fn test_pending_transaction_keeps_unknown_fields() {
        let pending = PendingTransaction::from_json(
            r#"{"hash":"0x99","sender":"0x01","sequence_number":"7"}"#,
        )
        .unwrap();
        assert_eq!(pending.hash, "0x99");
        assert_eq!(pending.extra["sender"], json!("0x01"));
        assert_eq!(pending.extra.len(), 2);
    }

    #[test]
    fn test_pending_transaction_requires_hash() {
        assert!(PendingTransaction::from_json(r#"{"sender":"0x01"}"#).is_err());
    }

    #[test]
    fn test_unusable_wallet_response_is_an_error() {
        for json in [None, Some("null"), Some("\"ok\""), Some(r#"{"sender":"0x01"}"#)] {
            assert!(matches!(
                PendingTransaction::from_wallet_response(json),
                Err(WalletError::InvalidResponse(_))
            ));
        }
        let pending = PendingTransaction::from_wallet_response(Some(r#"{"hash":"0x99"}"#)).unwrap();
        assert_eq!(pending.hash, "0x99");
    }
}
