//! Proptest generators for property-based testing.

use proptest::prelude::*;

use signdoc::{Any, AuthInfo, Coin, Fee, SignerData, Tip, TxBody, TxData};
use signdoc_core::wire::{
    append_bytes_field, append_fixed32_field, append_fixed64_field, append_varint_field,
    MAX_FIELD_NUMBER,
};
use signdoc_core::{WireType, NON_CRITICAL_BIT};

use crate::fixtures::{msg_exec, msg_send};

/// Generate a bech32-looking address.
pub fn address() -> impl Strategy<Value = String> {
    "cosmos1[a-z0-9]{6,20}".prop_map(String::from)
}

/// Generate a coin with a valid denom.
pub fn coin() -> impl Strategy<Value = Coin> {
    ("[a-z][a-z0-9]{2,8}", 0u64..=1_000_000_000u64)
        .prop_map(|(denom, amount)| Coin::new(amount.to_string(), denom))
}

pub fn coins(max_len: usize) -> impl Strategy<Value = Vec<Coin>> {
    prop::collection::vec(coin(), 0..=max_len)
}

/// Memo text, including characters the canonical form escapes.
pub fn memo() -> impl Strategy<Value = String> {
    "[ -~]{0,24}".prop_map(String::from)
}

/// A field number with the non-critical bit clear.
pub fn critical_field_number() -> impl Strategy<Value = u32> {
    (1u32..=MAX_FIELD_NUMBER)
        .prop_map(|n| n & !NON_CRITICAL_BIT)
        .prop_filter("field numbers start at 1", |n| *n != 0)
}

/// A field number with the non-critical bit set.
pub fn non_critical_field_number() -> impl Strategy<Value = u32> {
    (1u32..=MAX_FIELD_NUMBER).prop_map(|n| n | NON_CRITICAL_BIT)
}

/// A wire type whose value the scanner can skip.
pub fn skippable_wire_type() -> impl Strategy<Value = WireType> {
    prop_oneof![
        Just(WireType::Varint),
        Just(WireType::Fixed64),
        Just(WireType::Bytes),
        Just(WireType::Fixed32),
    ]
}

/// Append one well-formed field of `wire_type` to `buf`.
pub fn append_field(buf: &mut Vec<u8>, number: u32, wire_type: WireType) {
    match wire_type {
        WireType::Varint => append_varint_field(buf, number, 150),
        WireType::Fixed64 => append_fixed64_field(buf, number, 1),
        WireType::Fixed32 => append_fixed32_field(buf, number, 1),
        _ => append_bytes_field(buf, number, b"extra"),
    }
}

/// A bank send between two generated addresses.
pub fn send_msg() -> impl Strategy<Value = Any> {
    (address(), address(), coins(3)).prop_map(|(from, to, amount)| msg_send(&from, &to, &amount))
}

/// Either a plain send or an exec wrapping a few sends.
pub fn message() -> impl Strategy<Value = Any> {
    prop_oneof![
        3 => send_msg(),
        1 => (address(), prop::collection::vec(send_msg(), 0..3))
            .prop_map(|(grantee, msgs)| msg_exec(&grantee, &msgs)),
    ]
}

/// Parameters for generating a signable transaction.
#[derive(Debug, Clone)]
pub struct TxParams {
    pub signer: SignerData,
    pub messages: Vec<Any>,
    pub memo: String,
    pub timeout_height: u64,
    pub fee_amount: Vec<Coin>,
    pub gas_limit: u64,
    pub granter: String,
    /// When set, the signer also tips and signs the placeholder fee.
    pub signer_tips: bool,
}

impl Arbitrary for TxParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            address(),
            "[a-z]{1,8}-[0-9]{1,3}", // chain id
            any::<u64>(),            // account number
            any::<u64>(),            // sequence
            prop::collection::vec(message(), 0..4),
            memo(),
            prop_oneof![Just(0u64), any::<u64>()],
            coins(2),
            any::<u64>(),
            prop_oneof![Just(String::new()), address()],
            any::<bool>(),
        )
            .prop_map(
                |(
                    addr,
                    chain_id,
                    account_number,
                    sequence,
                    messages,
                    memo,
                    timeout_height,
                    fee_amount,
                    gas_limit,
                    granter,
                    signer_tips,
                )| {
                    TxParams {
                        signer: SignerData {
                            chain_id,
                            account_number,
                            sequence,
                            address: addr,
                        },
                        messages,
                        memo,
                        timeout_height,
                        fee_amount,
                        gas_limit,
                        granter,
                        signer_tips,
                    }
                },
            )
            .boxed()
    }
}

/// Build the transaction described by `params`.
pub fn tx_from_params(params: &TxParams) -> TxData {
    let body = TxBody {
        messages: params.messages.clone(),
        memo: params.memo.clone(),
        timeout_height: params.timeout_height,
        ..Default::default()
    };
    let tip = params.signer_tips.then(|| Tip {
        amount: vec![Coin::new("1", "stake")],
        tipper: params.signer.address.clone(),
    });
    let auth_info = AuthInfo {
        fee: Some(Fee {
            amount: params.fee_amount.clone(),
            gas_limit: params.gas_limit,
            payer: String::new(),
            granter: params.granter.clone(),
        }),
        tip,
    };
    TxData::new(body, auth_info)
}
