//! Validation and signing across crate boundaries.

use signdoc::core::wire::{append_bytes_field, append_varint_field};
use signdoc::{
    Any, AuthInfo, Coin, DecodeError, Error, HandlerConfig, Resolver, TxBody, TxData,
    UnknownFieldValidator, ValidatorOptions,
};
use signdoc_testkit::fixtures::{encode_msg_send, MSG_SEND};
use signdoc_testkit::{msg_exec, msg_send, TestFixture};

fn body_descriptor(fixture: &TestFixture) -> &signdoc::MessageDescriptor {
    fixture
        .registry
        .find_message(signdoc::aminojson::TX_BODY)
        .unwrap()
}

#[test]
fn end_to_end_scenario() {
    let fixture = TestFixture::new();
    let tx = fixture.tx(
        vec![fixture.send("cosmos1bob", &[Coin::new("10", "stake")])],
        "hello",
    );
    assert_eq!(tx.body.timeout_height, 0);
    assert!(tx.auth_info.tip.is_none());
    let bytes = fixture.sign_bytes(&tx).unwrap();
    let text = std::str::from_utf8(&bytes).unwrap();

    // Keys appear in byte order in the raw text.
    let positions: Vec<usize> = [
        "\"account_number\"",
        "\"chain_id\"",
        "\"fee\"",
        "\"memo\"",
        "\"msgs\"",
        "\"sequence\"",
    ]
    .iter()
    .map(|key| text.find(key).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    assert!(!text.contains("timeout_height"));

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        ["account_number", "chain_id", "fee", "memo", "msgs", "sequence"]
    );
    assert_eq!(value["memo"], "hello");
    assert_eq!(value["chain_id"], "test-1");
    assert_eq!(value["sequence"], "3");
    assert_eq!(value["account_number"], "7");
    assert_eq!(
        value["fee"],
        serde_json::json!({"amount": [{"amount": "100", "denom": "stake"}], "gas": "200000"})
    );
    let fee = value["fee"].as_object().unwrap();
    assert!(!fee.contains_key("payer"));
    assert!(!fee.contains_key("granter"));

    let msgs = value["msgs"].as_array().unwrap();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0]["type"], "cosmos-sdk/MsgSend");
    assert_eq!(msgs[0]["value"]["from_address"], "cosmos1alice");
    assert_eq!(msgs[0]["value"]["amount"][0]["denom"], "stake");
}

#[test]
fn deeply_nested_unknown_critical_field_rejected() {
    let fixture = TestFixture::new();

    let mut inner = encode_msg_send("cosmos1a", "cosmos1b", &[]);
    append_varint_field(&mut inner, 5, 1);
    let send = Any::new(format!("/{MSG_SEND}"), inner);
    let tx = fixture.tx(vec![msg_exec("cosmos1alice", &[msg_exec("cosmos1x", &[send])])], "");

    let err = fixture.sign_bytes(&tx).unwrap_err();
    match err {
        Error::Decode(DecodeError::UnknownField { type_name, number, .. }) => {
            assert_eq!(type_name, MSG_SEND);
            assert_eq!(number, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unresolvable_message_rejected() {
    let fixture = TestFixture::new();
    let tx = fixture.tx(vec![Any::new("/cosmos.gov.v1.MsgVote", vec![])], "");
    assert!(matches!(
        fixture.sign_bytes(&tx),
        Err(Error::Decode(DecodeError::UnresolvableType(name))) if name == "cosmos.gov.v1.MsgVote"
    ));
}

#[test]
fn body_bytes_not_matching_parsed_body_still_validated() {
    let fixture = TestFixture::new();
    let body = TxBody {
        memo: "hello".into(),
        ..Default::default()
    };
    let mut bytes = body.to_bytes();
    // Memo is a string; a varint there is a wire-type mismatch.
    append_varint_field(&mut bytes, 2, 1);
    let tx = TxData::with_body_bytes(
        bytes,
        body,
        AuthInfo {
            fee: Some(fixture.fee()),
            tip: None,
        },
    );

    assert!(matches!(
        fixture.sign_bytes(&tx),
        Err(Error::Decode(DecodeError::WireTypeMismatch { .. }))
    ));
}

#[test]
fn lenient_body_accepts_non_critical_field() {
    let fixture = TestFixture::new();
    let mut tx = fixture.tx(vec![fixture.send("cosmos1bob", &[Coin::new("1", "stake")])], "");
    let mut bytes = tx.body_bytes.to_vec();
    append_bytes_field(&mut bytes, 1025, b"hint");
    tx.body_bytes = bytes.into();

    assert!(fixture.sign_bytes(&tx).unwrap_err().is_unknown_field());

    let lenient = fixture.handler_with(HandlerConfig {
        allow_non_critical_body_fields: true,
        ..Default::default()
    });
    let lenient_bytes = lenient.get_sign_bytes(&fixture.signer, &tx).unwrap();

    // The extra field does not reach the sign bytes.
    let clean = fixture.tx(vec![fixture.send("cosmos1bob", &[Coin::new("1", "stake")])], "");
    assert_eq!(lenient_bytes, fixture.sign_bytes(&clean).unwrap());
}

#[test]
fn depth_limit_applies_to_envelope_chains() {
    let fixture = TestFixture::new();
    let mut msg = msg_send("cosmos1a", "cosmos1b", &[]);
    for _ in 0..10 {
        msg = msg_exec("cosmos1g", &[msg]);
    }
    let tx = fixture.tx(vec![msg], "");

    let shallow = fixture.handler_with(HandlerConfig {
        max_recursion_depth: 5,
        ..Default::default()
    });
    assert!(matches!(
        shallow.get_sign_bytes(&fixture.signer, &tx),
        Err(Error::Decode(DecodeError::DepthExceeded(5)))
    ));
    assert!(fixture.sign_bytes(&tx).is_ok());
}

#[test]
fn validator_reports_flag_alongside_error() {
    let fixture = TestFixture::new();
    let mut bytes = TxBody::default().to_bytes();
    append_varint_field(&mut bytes, 1030, 1);
    append_varint_field(&mut bytes, 40, 1);

    let validator =
        UnknownFieldValidator::new(fixture.registry.as_ref(), ValidatorOptions::allow_non_critical());
    let outcome = validator.validate(&bytes, body_descriptor(&fixture));
    assert!(outcome.has_unknown_non_criticals);
    assert!(matches!(outcome.error, Some(DecodeError::UnknownField { number: 40, .. })));
}
