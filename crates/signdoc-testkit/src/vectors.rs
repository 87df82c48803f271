//! Golden sign-bytes vectors.
//!
//! Each vector fixes a transaction and a signer and records the exact bytes
//! a legacy amino JSON signer must produce for them.

use signdoc::{Any, AuthInfo, Coin, Fee, SignerData, Tip, TxBody, TxData};

use crate::fixtures::{msg_exec, msg_send, TestFixture};

/// A message inside a golden vector.
#[derive(Debug, Clone, Copy)]
pub enum VectorMsg {
    Send {
        from: &'static str,
        to: &'static str,
        /// `(amount, denom)` pairs.
        amount: &'static [(&'static str, &'static str)],
    },
    Exec {
        grantee: &'static str,
        msgs: &'static [VectorMsg],
    },
}

impl VectorMsg {
    pub fn to_any(&self) -> Any {
        match self {
            VectorMsg::Send { from, to, amount } => {
                let coins: Vec<Coin> = amount.iter().map(|(a, d)| Coin::new(*a, *d)).collect();
                msg_send(from, to, &coins)
            }
            VectorMsg::Exec { grantee, msgs } => {
                let inner: Vec<Any> = msgs.iter().map(VectorMsg::to_any).collect();
                msg_exec(grantee, &inner)
            }
        }
    }
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub signer: &'static str,
    pub messages: &'static [VectorMsg],
    pub memo: &'static str,
    pub timeout_height: u64,
    /// `(amount, denom)` pairs of the declared fee.
    pub fee: &'static [(&'static str, &'static str)],
    pub gas_limit: u64,
    pub granter: &'static str,
    /// Tipper address, if the transaction carries a tip.
    pub tipper: Option<&'static str>,
    /// Expected sign bytes, as UTF-8 text.
    pub expected: &'static str,
}

const BANK_SEND: &[VectorMsg] = &[VectorMsg::Send {
    from: "cosmos1alice",
    to: "cosmos1bob",
    amount: &[("10", "stake")],
}];

const EXEC_SEND: &[VectorMsg] = &[VectorMsg::Exec {
    grantee: "cosmos1alice",
    msgs: &[VectorMsg::Send {
        from: "cosmos1carol",
        to: "cosmos1bob",
        amount: &[("5", "stake"), ("7", "uatom")],
    }],
}];

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "memo only",
            signer: "cosmos1alice",
            messages: &[],
            memo: "hello",
            timeout_height: 0,
            fee: &[("100", "stake")],
            gas_limit: 200_000,
            granter: "",
            tipper: None,
            expected: concat!(
                r#"{"account_number":"7","chain_id":"test-1","#,
                r#""fee":{"amount":[{"amount":"100","denom":"stake"}],"gas":"200000"},"#,
                r#""memo":"hello","msgs":[],"sequence":"3"}"#
            ),
        },
        GoldenVector {
            name: "bank send",
            signer: "cosmos1alice",
            messages: BANK_SEND,
            memo: "",
            timeout_height: 0,
            fee: &[("100", "stake")],
            gas_limit: 200_000,
            granter: "",
            tipper: None,
            expected: concat!(
                r#"{"account_number":"7","chain_id":"test-1","#,
                r#""fee":{"amount":[{"amount":"100","denom":"stake"}],"gas":"200000"},"#,
                r#""memo":"","msgs":[{"type":"cosmos-sdk/MsgSend","value":{"#,
                r#""amount":[{"amount":"10","denom":"stake"}],"#,
                r#""from_address":"cosmos1alice","to_address":"cosmos1bob"}}],"#,
                r#""sequence":"3"}"#
            ),
        },
        GoldenVector {
            name: "tipper placeholder fee",
            signer: "cosmos1alice",
            messages: &[],
            memo: "tip",
            timeout_height: 0,
            fee: &[("100", "stake")],
            gas_limit: 200_000,
            granter: "",
            tipper: Some("cosmos1alice"),
            expected: concat!(
                r#"{"account_number":"7","chain_id":"test-1","#,
                r#""fee":{"amount":[],"gas":"0"},"memo":"tip","msgs":[],"sequence":"3"}"#
            ),
        },
        GoldenVector {
            name: "exec with timeout and escaped memo",
            signer: "cosmos1alice",
            messages: EXEC_SEND,
            memo: "a&b",
            timeout_height: 50,
            fee: &[],
            gas_limit: 1,
            granter: "cosmos1granter",
            tipper: None,
            expected: concat!(
                r#"{"account_number":"7","chain_id":"test-1","#,
                r#""fee":{"amount":[],"gas":"1","granter":"cosmos1granter"},"#,
                "\"memo\":\"a\\u0026b\",",
                r#""msgs":[{"type":"cosmos-sdk/MsgExec","value":{"grantee":"cosmos1alice","#,
                r#""msgs":[{"type":"cosmos-sdk/MsgSend","value":{"#,
                r#""amount":[{"amount":"5","denom":"stake"},{"amount":"7","denom":"uatom"}],"#,
                r#""from_address":"cosmos1carol","to_address":"cosmos1bob"}}]}}],"#,
                r#""sequence":"3","timeout_height":"50"}"#
            ),
        },
    ]
}

/// Build the transaction and signer a vector describes.
pub fn tx_from_vector(vector: &GoldenVector) -> (TxData, SignerData) {
    let body = TxBody {
        messages: vector.messages.iter().map(VectorMsg::to_any).collect(),
        memo: vector.memo.into(),
        timeout_height: vector.timeout_height,
        ..Default::default()
    };
    let auth_info = AuthInfo {
        fee: Some(Fee {
            amount: vector.fee.iter().map(|(a, d)| Coin::new(*a, *d)).collect(),
            gas_limit: vector.gas_limit,
            payer: String::new(),
            granter: vector.granter.into(),
        }),
        tip: vector.tipper.map(|tipper| Tip {
            amount: vec![Coin::new("1", "stake")],
            tipper: tipper.into(),
        }),
    };
    let signer = TestFixture::new().with_signer(vector.signer).signer;
    (TxData::new(body, auth_info), signer)
}

/// Compute the sign bytes for a vector.
pub fn sign_vector(fixture: &TestFixture, vector: &GoldenVector) -> signdoc::Result<Vec<u8>> {
    let (tx, signer) = tx_from_vector(vector);
    fixture.handler().get_sign_bytes(&signer, &tx)
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, hex of actual bytes or the error)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let fixture = TestFixture::new();
    all_vectors()
        .into_iter()
        .map(|v| match sign_vector(&fixture, &v) {
            Ok(bytes) => {
                let matches = bytes == v.expected.as_bytes();
                (v.name.to_string(), matches, hex::encode(&bytes))
            }
            Err(e) => (v.name.to_string(), false, e.to_string()),
        })
        .collect()
}
