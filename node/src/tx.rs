//! Transaction envelope, message routing and delivery responses.
//!
//! A transaction is JSON:
//!
//! ```json
//! { "signer": "certik1...", "msgs": [ { "type": "gov/MsgVote", "value": { "proposal_id": 1, ... } } ] }
//! ```
//!
//! The part of `type` before the slash picks the module route; the rest
//! names the message within that module. Every message must be signed by
//! the declared `signer`.

use serde::{Deserialize, Serialize};

use shentu_bank::{BankError, MsgSend};
use shentu_governance::{GovError, GovMsg};
use shentu_types::{AccAddress, Event};

use crate::NodeError;

pub const CODE_OK: u32 = 0;
pub const CODE_INTERNAL: u32 = 1;
pub const CODE_TX_DECODE: u32 = 2;
pub const CODE_UNAUTHORIZED: u32 = 4;
pub const CODE_INSUFFICIENT_FUNDS: u32 = 5;
pub const CODE_UNKNOWN_REQUEST: u32 = 6;
pub const CODE_INVALID_REQUEST: u32 = 18;

/// One message as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMsg {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tx {
    #[serde(default)]
    pub signer: Option<AccAddress>,
    pub msgs: Vec<RawMsg>,
}

/// A decoded message, tagged by the module that handles it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Bank(MsgSend),
    Gov(GovMsg),
}

impl Msg {
    pub fn decode(raw: &RawMsg) -> Result<Self, NodeError> {
        let (route, name) = raw
            .kind
            .split_once('/')
            .ok_or_else(|| NodeError::TxDecode(format!("message type {:?} has no route", raw.kind)))?;
        match route {
            shentu_governance::msgs::ROUTE => {
                Ok(Self::Gov(GovMsg::from_json(name, raw.value.clone())?))
            }
            shentu_bank::MODULE_NAME => match name {
                "MsgSend" => serde_json::from_value(raw.value.clone())
                    .map(Self::Bank)
                    .map_err(|e| NodeError::TxDecode(format!("{}: {e}", raw.kind))),
                other => Err(NodeError::UnknownRequest(format!(
                    "unrecognized bank message type: {route}/{other}"
                ))),
            },
            other => Err(NodeError::UnknownRequest(format!(
                "unrecognized message route: {other}"
            ))),
        }
    }

    pub fn type_url(&self) -> String {
        match self {
            Self::Bank(_) => format!("{}/MsgSend", shentu_bank::MODULE_NAME),
            Self::Gov(m) => format!("{}/{}", shentu_governance::msgs::ROUTE, m.type_name()),
        }
    }

    pub fn signer(&self) -> AccAddress {
        match self {
            Self::Bank(m) => m.from_address,
            Self::Gov(m) => m.signer(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), NodeError> {
        match self {
            Self::Bank(m) => Ok(m.validate_basic()?),
            Self::Gov(m) => Ok(m.validate_basic()?),
        }
    }
}

/// Decode raw transaction bytes into their messages, checking that each
/// one is signed by the transaction's signer.
pub fn decode_tx(bytes: &[u8]) -> Result<Vec<Msg>, NodeError> {
    let tx: Tx = serde_json::from_slice(bytes).map_err(|e| NodeError::TxDecode(e.to_string()))?;
    if tx.msgs.is_empty() {
        return Err(NodeError::TxDecode("transaction has no messages".to_string()));
    }
    let msgs = tx.msgs.iter().map(Msg::decode).collect::<Result<Vec<_>, _>>()?;

    let signer = tx
        .signer
        .ok_or_else(|| NodeError::Unauthorized("transaction declares no signer".to_string()))?;
    for msg in &msgs {
        if msg.signer() != signer {
            return Err(NodeError::Unauthorized(format!(
                "{} must be signed by {}, transaction is signed by {signer}",
                msg.type_url(),
                msg.signer()
            )));
        }
    }
    Ok(msgs)
}

/// Result of delivering one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    pub code: u32,
    pub codespace: String,
    pub log: String,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
    pub events: Vec<Event>,
    pub tx_hash: String,
}

impl TxResponse {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    pub fn failed(err: &NodeError, tx_hash: String) -> Self {
        let (codespace, code) = error_code(err);
        Self {
            code,
            codespace: codespace.to_string(),
            log: err.to_string(),
            data: Vec::new(),
            events: Vec::new(),
            tx_hash,
        }
    }
}

/// Codespace and code reported for a failed transaction.
pub fn error_code(err: &NodeError) -> (&'static str, u32) {
    match err {
        NodeError::TxDecode(_) => ("sdk", CODE_TX_DECODE),
        NodeError::Unauthorized(_)
        | NodeError::Bank(BankError::ModuleAccount(_))
        | NodeError::Governance(GovError::Bank(BankError::ModuleAccount(_))) => {
            ("sdk", CODE_UNAUTHORIZED)
        }
        NodeError::UnknownRequest(_) | NodeError::Governance(GovError::UnknownRequest(_)) => {
            ("sdk", CODE_UNKNOWN_REQUEST)
        }
        NodeError::Bank(BankError::InsufficientFunds { .. })
        | NodeError::Governance(GovError::Bank(BankError::InsufficientFunds { .. }))
        | NodeError::Governance(GovError::InsufficientInitialDeposit { .. }) => {
            ("sdk", CODE_INSUFFICIENT_FUNDS)
        }
        NodeError::Governance(GovError::Cert(_)) => (shentu_cert::MODULE_NAME, CODE_INVALID_REQUEST),
        NodeError::Governance(GovError::Upgrade(_)) => {
            (shentu_upgrade::MODULE_NAME, CODE_INVALID_REQUEST)
        }
        NodeError::Governance(GovError::Store(_)) | NodeError::Store(_) => ("sdk", CODE_INTERNAL),
        NodeError::Governance(_) => (shentu_governance::MODULE_NAME, CODE_INVALID_REQUEST),
        NodeError::Bank(_) => (shentu_bank::MODULE_NAME, CODE_INVALID_REQUEST),
        _ => ("sdk", CODE_INTERNAL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn addr(seed: u8) -> String {
        AccAddress::new([seed; 20]).to_string()
    }

    fn bytes(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn decodes_routes() {
        let msgs = decode_tx(&bytes(json!({
            "signer": addr(1),
            "msgs": [
                { "type": "gov/MsgVote", "value": { "proposal_id": 1, "voter": addr(1), "option": "No" } },
                { "type": "bank/MsgSend", "value": {
                    "from_address": addr(1),
                    "to_address": addr(2),
                    "amount": [{ "denom": "uctk", "amount": 5 }]
                } }
            ]
        })))
        .unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].type_url(), "gov/MsgVote");
        assert_eq!(msgs[1].type_url(), "bank/MsgSend");
        assert_eq!(msgs[1].signer(), AccAddress::new([1; 20]));
    }

    #[test]
    fn messages_must_match_declared_signer() {
        let vote = json!({ "type": "gov/MsgVote", "value": { "proposal_id": 1, "voter": addr(1), "option": "Yes" } });

        let err = decode_tx(&bytes(json!({ "msgs": [vote.clone()] }))).unwrap_err();
        assert_eq!(error_code(&err), ("sdk", CODE_UNAUTHORIZED));

        let err = decode_tx(&bytes(json!({ "signer": addr(2), "msgs": [vote.clone()] })))
            .unwrap_err();
        assert!(matches!(err, NodeError::Unauthorized(_)));
        assert!(err.to_string().contains("gov/MsgVote must be signed by"));

        assert!(decode_tx(&bytes(json!({ "signer": addr(1), "msgs": [vote] }))).is_ok());
    }

    #[test]
    fn unknown_gov_type_is_unknown_request() {
        let err = decode_tx(&bytes(json!({ "msgs": [{ "type": "gov/MsgBogus", "value": {} }] })))
            .unwrap_err();
        assert_eq!(error_code(&err), ("sdk", CODE_UNKNOWN_REQUEST));
        assert!(err.to_string().contains("unrecognized gov message type: gov/MsgBogus"));
    }

    #[test]
    fn unknown_route_is_unknown_request() {
        let err = decode_tx(&bytes(json!({ "msgs": [{ "type": "staking/MsgDelegate" }] })))
            .unwrap_err();
        assert!(matches!(err, NodeError::UnknownRequest(_)));
    }

    #[test]
    fn malformed_envelopes_fail_to_decode() {
        let cases: [&[u8]; 3] = [
            b"not json",
            br#"{"msgs":[]}"#,
            br#"{"msgs":[{"type":"MsgVote"}]}"#,
        ];
        for raw in cases {
            let err = decode_tx(raw).unwrap_err();
            assert_eq!(error_code(&err).1, CODE_TX_DECODE, "{err}");
        }
    }

    #[test]
    fn failed_response_carries_log() {
        let err = NodeError::Governance(GovError::InsufficientInitialDeposit {
            initial: 1,
            minimum: 2,
        });
        let res = TxResponse::failed(&err, "ab".to_string());
        assert!(!res.is_ok());
        assert_eq!(res.code, CODE_INSUFFICIENT_FUNDS);
        assert!(res.log.ends_with("insufficient initial deposits amount: 1, minimum: 2"));
    }
}
