use {
    super::{signature_items, Base, Legacy, Signature},
    crate::{
        config::CHAIN_ID_INC,
        error::{CodecError, CryptoError, Result},
        rlp::RlpItem,
    },
    primitive_types::U256,
};

/// Replay-protected legacy transaction: `v = chain_id * 2 + 35 + y`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eip155 {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Vec<u8>>,
    pub value: U256,
    pub data: Vec<u8>,
    pub chain_id: u64,
    pub signature: Option<Signature>,
}

impl Eip155 {
    pub fn from_legacy(legacy: Legacy, chain_id: u64) -> Self {
        Self {
            nonce: legacy.nonce,
            gas_price: legacy.gas_price,
            gas_limit: legacy.gas_limit,
            to: legacy.to,
            value: legacy.value,
            data: legacy.data,
            chain_id,
            signature: legacy.signature,
        }
    }

    pub fn with_signature(self, signature: Signature) -> Self {
        Self {
            signature: Some(signature),
            ..self
        }
    }

    pub fn without_signature(self) -> Self {
        Self {
            signature: None,
            ..self
        }
    }

    /// `chain_id * 2 + 35`, the `v` of a signature with y-parity 0.
    pub fn v_base(&self) -> Result<u64> {
        self.chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(CHAIN_ID_INC))
            .ok_or(CodecError::Crypto(CryptoError::CalculationOverflow))
    }

    fn base_fields(&self) -> Vec<RlpItem> {
        Legacy {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: self.to.clone(),
            value: self.value,
            data: self.data.clone(),
            signature: None,
        }
        .base_fields()
    }
}

impl Base for Eip155 {
    fn nonce(&self) -> u64 {
        self.nonce
    }
    fn to(&self) -> Option<&[u8]> {
        self.to.as_deref()
    }
    fn value(&self) -> U256 {
        self.value
    }
    fn data(&self) -> &[u8] {
        &self.data
    }
    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
    fn gas_price(&self) -> U256 {
        self.gas_price
    }
    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }
    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }
    fn recovery_id(&self) -> Result<u8> {
        let v = self.signature.as_ref().ok_or(CodecError::Unsigned)?.v;
        let base = self.v_base()?;

        match v.checked_sub(base) {
            Some(y @ (0 | 1)) => Ok(y as u8),
            _ => Err(CryptoError::InvalidEthereumSignature(format!("incorrect tx.v {v}")).into()),
        }
    }
    fn to_rlp_item(&self, signed: bool) -> RlpItem {
        let mut fields = self.base_fields();
        match (signed, self.signature.as_ref()) {
            (true, Some(signature)) => fields.extend(signature_items(signature)),
            _ => fields.extend([
                RlpItem::from_u64(self.chain_id),
                RlpItem::empty(),
                RlpItem::empty(),
            ]),
        }

        RlpItem::List(fields)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::rlp::encode_to_vec};

    fn transfer() -> Eip155 {
        Eip155 {
            nonce: 9,
            gas_price: U256::from(20_000_000_000_u64),
            gas_limit: 21_000,
            to: Some(vec![0x35; 20]),
            value: U256::from(1_000_000_000_000_000_000_u64),
            data: vec![],
            chain_id: 1,
            signature: None,
        }
    }

    #[test]
    fn message_to_sign_carries_chain_id() {
        let tx = transfer();
        assert_eq!(
            hex::encode(encode_to_vec(&tx.to_rlp_item(false))),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        // unsigned wire form is the same placeholder layout
        assert_eq!(tx.to_rlp_item(true), tx.to_rlp_item(false));
    }

    #[test]
    fn signed_replaces_placeholder() {
        let tx = transfer().with_signature(Signature::new(38, U256::from(1), U256::from(2)));
        let signed = tx.to_rlp_item(true);
        let fields = signed.as_list().unwrap();

        assert_eq!(fields[6], RlpItem::from_u64(38));
        assert_eq!(tx.to_rlp_item(false), transfer().to_rlp_item(false));
        assert_eq!(tx.recovery_id().unwrap(), 1);
    }

    #[test]
    fn recovery_id_bounds() {
        let with_v = |v| transfer().with_signature(Signature::new(v, U256::one(), U256::one()));
        assert_eq!(with_v(37).recovery_id().unwrap(), 0);
        assert!(with_v(36).recovery_id().is_err());
        assert!(with_v(39).recovery_id().is_err());
        assert!(with_v(27).recovery_id().is_err());
    }

    #[test]
    fn v_base_overflow() {
        let tx = Eip155 {
            chain_id: u64::MAX,
            ..transfer()
        };
        assert_eq!(
            tx.v_base(),
            Err(CodecError::Crypto(CryptoError::CalculationOverflow))
        );
    }
}
