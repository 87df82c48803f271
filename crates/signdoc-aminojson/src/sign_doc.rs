//! The legacy sign document.
//!
//! A [`SignDoc`] holds exactly the fields a legacy amino JSON signature
//! commits to. It is built once from a transaction and a signer and never
//! modified afterwards.

use signdoc_core::Any;

use crate::error::SignDocError;
use crate::tx::{AuthInfo, Coin, Fee, SignerData, TxBody};

/// The fee a signer commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignFee {
    /// The signer is the tipper: no amount, zero gas. The relayer picks the
    /// real fee after the tipper has signed.
    TipperPlaceholder,
    /// The fee declared in the transaction.
    Declared(Fee),
}

impl SignFee {
    pub fn amount(&self) -> &[Coin] {
        match self {
            Self::TipperPlaceholder => &[],
            Self::Declared(fee) => &fee.amount,
        }
    }

    pub fn gas(&self) -> u64 {
        match self {
            Self::TipperPlaceholder => 0,
            Self::Declared(fee) => fee.gas_limit,
        }
    }

    pub fn payer(&self) -> &str {
        match self {
            Self::TipperPlaceholder => "",
            Self::Declared(fee) => &fee.payer,
        }
    }

    pub fn granter(&self) -> &str {
        match self {
            Self::TipperPlaceholder => "",
            Self::Declared(fee) => &fee.granter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignDoc {
    account_number: u64,
    timeout_height: u64,
    chain_id: String,
    sequence: u64,
    memo: String,
    msgs: Vec<Any>,
    fee: SignFee,
}

impl SignDoc {
    /// Assemble the document a signer signs.
    ///
    /// Fails if the body carries extension options, if the signer or tipper
    /// address is empty, or if no fee is declared while the signer is not
    /// the tipper.
    pub fn build(body: &TxBody, auth_info: &AuthInfo, signer: &SignerData) -> Result<Self, SignDocError> {
        if body.has_extension_options() {
            return Err(SignDocError::ExtensionOptions);
        }
        if signer.address.is_empty() {
            return Err(SignDocError::EmptySignerAddress);
        }

        let tip = auth_info.tip.as_ref();
        if tip.is_some_and(|tip| tip.tipper.is_empty()) {
            return Err(SignDocError::EmptyTipper);
        }
        let is_tipper = tip.is_some_and(|tip| tip.tipper == signer.address);

        let fee = if is_tipper {
            SignFee::TipperPlaceholder
        } else {
            let declared = auth_info.fee.as_ref().ok_or(SignDocError::MissingFee)?;
            SignFee::Declared(declared.clone())
        };

        Ok(Self {
            account_number: signer.account_number,
            timeout_height: body.timeout_height,
            chain_id: signer.chain_id.clone(),
            sequence: signer.sequence,
            memo: body.memo.clone(),
            msgs: body.messages.clone(),
            fee,
        })
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn timeout_height(&self) -> u64 {
        self.timeout_height
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Messages in transaction order.
    pub fn msgs(&self) -> &[Any] {
        &self.msgs
    }

    pub fn fee(&self) -> &SignFee {
        &self.fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::Tip;

    fn signer(address: &str) -> SignerData {
        SignerData {
            chain_id: "test-1".into(),
            account_number: 7,
            sequence: 3,
            address: address.into(),
        }
    }

    fn body() -> TxBody {
        TxBody {
            messages: vec![Any::new("/a.First", vec![1]), Any::new("/a.Second", vec![2])],
            memo: "hello".into(),
            ..Default::default()
        }
    }

    fn fee() -> Fee {
        Fee {
            amount: vec![Coin::new("100", "stake")],
            gas_limit: 200_000,
            payer: String::new(),
            granter: "granter1".into(),
        }
    }

    #[test]
    fn test_declared_fee_copied() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: None,
        };
        let doc = SignDoc::build(&body(), &auth, &signer("signer1")).unwrap();

        assert_eq!(doc.fee(), &SignFee::Declared(fee()));
        assert_eq!(doc.fee().gas(), 200_000);
        assert_eq!(doc.fee().granter(), "granter1");
        assert_eq!(doc.account_number(), 7);
        assert_eq!(doc.sequence(), 3);
        assert_eq!(doc.chain_id(), "test-1");
        assert_eq!(doc.memo(), "hello");
        assert_eq!(doc.timeout_height(), 0);
    }

    #[test]
    fn test_message_order_preserved() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: None,
        };
        let doc = SignDoc::build(&body(), &auth, &signer("signer1")).unwrap();
        let urls: Vec<_> = doc.msgs().iter().map(|m| m.type_url.as_str()).collect();
        assert_eq!(urls, vec!["/a.First", "/a.Second"]);
    }

    #[test]
    fn test_tipper_gets_placeholder_fee() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: Some(Tip {
                amount: vec![Coin::new("1", "tip")],
                tipper: "tipper1".into(),
            }),
        };
        let doc = SignDoc::build(&body(), &auth, &signer("tipper1")).unwrap();
        assert_eq!(doc.fee(), &SignFee::TipperPlaceholder);
        assert!(doc.fee().amount().is_empty());
        assert_eq!(doc.fee().gas(), 0);

        // A tipper does not need a declared fee at all.
        let no_fee = AuthInfo {
            fee: None,
            ..auth.clone()
        };
        assert!(SignDoc::build(&body(), &no_fee, &signer("tipper1")).is_ok());

        // Anyone else signs the declared fee.
        let doc = SignDoc::build(&body(), &auth, &signer("feepayer1")).unwrap();
        assert_eq!(doc.fee(), &SignFee::Declared(fee()));
    }

    #[test]
    fn test_missing_fee() {
        let auth = AuthInfo::default();
        assert_eq!(
            SignDoc::build(&body(), &auth, &signer("signer1")),
            Err(SignDocError::MissingFee)
        );
    }

    #[test]
    fn test_empty_signer() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: None,
        };
        assert_eq!(
            SignDoc::build(&body(), &auth, &signer("")),
            Err(SignDocError::EmptySignerAddress)
        );
    }

    #[test]
    fn test_empty_tipper() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: Some(Tip::default()),
        };
        assert_eq!(
            SignDoc::build(&body(), &auth, &signer("signer1")),
            Err(SignDocError::EmptyTipper)
        );
    }

    #[test]
    fn test_extension_options_rejected() {
        let auth = AuthInfo {
            fee: Some(fee()),
            tip: None,
        };
        let mut critical = body();
        critical.extension_options.push(Any::new("/ext.Opt", vec![]));
        assert_eq!(
            SignDoc::build(&critical, &auth, &signer("signer1")),
            Err(SignDocError::ExtensionOptions)
        );

        let mut non_critical = body();
        non_critical
            .non_critical_extension_options
            .push(Any::new("/ext.Opt", vec![]));
        assert_eq!(
            SignDoc::build(&non_critical, &auth, &signer("signer1")),
            Err(SignDocError::ExtensionOptions)
        );
    }
}
