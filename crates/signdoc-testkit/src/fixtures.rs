//! Test fixtures and helpers.
//!
//! A small bank and authz schema, plus helpers that encode messages and
//! assemble transactions against it.

use std::sync::Arc;

use signdoc::aminojson::{register_tx_types, COIN};
use signdoc::core::wire::append_bytes_field;
use signdoc::core::ANY_TYPE_NAME;
use signdoc::{
    Any, AuthInfo, Coin, Fee, FieldDescriptor, HandlerConfig, Kind, MessageDescriptor, Registry,
    SchemaError, SignModeHandler, SignerData, TxBody, TxData,
};

pub const MSG_SEND: &str = "cosmos.bank.v1beta1.MsgSend";
pub const MSG_EXEC: &str = "cosmos.authz.v1beta1.MsgExec";

pub fn msg_send_descriptor() -> MessageDescriptor {
    MessageDescriptor::new(MSG_SEND)
        .with_amino_name("cosmos-sdk/MsgSend")
        .with_field(FieldDescriptor::new(1, "from_address", Kind::String))
        .with_field(FieldDescriptor::new(2, "to_address", Kind::String))
        .with_field(
            FieldDescriptor::new(3, "amount", Kind::message(COIN))
                .repeated()
                .dont_omit_empty(),
        )
}

/// An authz exec wraps further envelopes, so it exercises nesting.
pub fn msg_exec_descriptor() -> MessageDescriptor {
    MessageDescriptor::new(MSG_EXEC)
        .with_amino_name("cosmos-sdk/MsgExec")
        .with_field(FieldDescriptor::new(1, "grantee", Kind::String))
        .with_field(FieldDescriptor::new(2, "msgs", Kind::message(ANY_TYPE_NAME)).repeated())
}

/// Transaction types plus the bank and authz messages.
pub fn bank_registry() -> Result<Registry, SchemaError> {
    let mut registry = Registry::new();
    register_tx_types(&mut registry)?;
    registry.register_all([msg_send_descriptor(), msg_exec_descriptor()])?;
    Ok(registry)
}

pub fn encode_coin(coin: &Coin) -> Vec<u8> {
    let mut buf = Vec::new();
    if !coin.denom.is_empty() {
        append_bytes_field(&mut buf, 1, coin.denom.as_bytes());
    }
    if !coin.amount.is_empty() {
        append_bytes_field(&mut buf, 2, coin.amount.as_bytes());
    }
    buf
}

pub fn encode_msg_send(from: &str, to: &str, amount: &[Coin]) -> Vec<u8> {
    let mut buf = Vec::new();
    append_bytes_field(&mut buf, 1, from.as_bytes());
    append_bytes_field(&mut buf, 2, to.as_bytes());
    for coin in amount {
        append_bytes_field(&mut buf, 3, &encode_coin(coin));
    }
    buf
}

pub fn encode_msg_exec(grantee: &str, msgs: &[Any]) -> Vec<u8> {
    let mut buf = Vec::new();
    append_bytes_field(&mut buf, 1, grantee.as_bytes());
    for msg in msgs {
        append_bytes_field(&mut buf, 2, &msg.to_bytes());
    }
    buf
}

pub fn msg_send(from: &str, to: &str, amount: &[Coin]) -> Any {
    Any::new(format!("/{MSG_SEND}"), encode_msg_send(from, to, amount))
}

pub fn msg_exec(grantee: &str, msgs: &[Any]) -> Any {
    Any::new(format!("/{MSG_EXEC}"), encode_msg_exec(grantee, msgs))
}

/// A shared registry and a default signer.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub registry: Arc<Registry>,
    pub signer: SignerData,
}

impl TestFixture {
    /// Signer `cosmos1alice` on `test-1`, account 7, sequence 3.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(bank_registry().expect("fixture schema is valid")),
            signer: SignerData {
                chain_id: "test-1".into(),
                account_number: 7,
                sequence: 3,
                address: "cosmos1alice".into(),
            },
        }
    }

    /// Use a different signer address.
    pub fn with_signer(mut self, address: &str) -> Self {
        self.signer.address = address.into();
        self
    }

    pub fn handler(&self) -> SignModeHandler<Registry> {
        self.handler_with(HandlerConfig::default())
    }

    pub fn handler_with(&self, config: HandlerConfig) -> SignModeHandler<Registry> {
        SignModeHandler::from_shared(Arc::clone(&self.registry), config)
    }

    /// A send from the signer.
    pub fn send(&self, to: &str, amount: &[Coin]) -> Any {
        msg_send(&self.signer.address, to, amount)
    }

    /// The standard fee: 100stake, 200000 gas.
    pub fn fee(&self) -> Fee {
        Fee {
            amount: vec![Coin::new("100", "stake")],
            gas_limit: 200_000,
            ..Default::default()
        }
    }

    /// A transaction carrying `messages` and paying the standard fee.
    pub fn tx(&self, messages: Vec<Any>, memo: &str) -> TxData {
        let body = TxBody {
            messages,
            memo: memo.into(),
            ..Default::default()
        };
        TxData::new(
            body,
            AuthInfo {
                fee: Some(self.fee()),
                tip: None,
            },
        )
    }

    pub fn sign_bytes(&self, tx: &TxData) -> signdoc::Result<Vec<u8>> {
        self.handler().get_sign_bytes(&self.signer, tx)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
