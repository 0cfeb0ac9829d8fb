use {
    super::{
        check_fields, decode_signature, decode_to, encode_to, signature_items, Base, Eip155,
        Signature, Transaction,
    },
    crate::{
        config::{CHAIN_ID_INC, LOWER_REAL_V},
        error::{CodecError, CryptoError, MalformedRlp, Result},
        rlp::RlpItem,
    },
    primitive_types::U256,
};

/// Pre-EIP-155 transaction; `v` is 27 or 28.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legacy {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Vec<u8>>,
    pub value: U256,
    pub data: Vec<u8>,
    pub signature: Option<Signature>,
}

impl Base for Legacy {
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
        None
    }
    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }
    fn recovery_id(&self) -> Result<u8> {
        let v = self.signature.as_ref().ok_or(CodecError::Unsigned)?.v;
        match v.checked_sub(LOWER_REAL_V) {
            Some(y @ (0 | 1)) => Ok(y as u8),
            _ => Err(CryptoError::InvalidEthereumSignature(format!("incorrect tx.v {v}")).into()),
        }
    }
    fn to_rlp_item(&self, signed: bool) -> RlpItem {
        let mut fields = self.base_fields();
        if let (true, Some(signature)) = (signed, self.signature.as_ref()) {
            fields.extend(signature_items(signature));
        }

        RlpItem::List(fields)
    }
}

impl Legacy {
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

    /// `[nonce, gasPrice, gasLimit, to, value, data]`, the prefix of every legacy-shaped list.
    pub(crate) fn base_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::from_u64(self.nonce),
            RlpItem::from_u256(self.gas_price),
            RlpItem::from_u64(self.gas_limit),
            encode_to(self.to.as_deref()),
            RlpItem::from_u256(self.value),
            RlpItem::from(self.data.clone()),
        ]
    }

    /// Decodes a legacy-shaped list, which is either a plain legacy or an EIP-155 transaction.
    pub(crate) fn from_rlp(item: &RlpItem) -> std::result::Result<Transaction, MalformedRlp> {
        let fields = check_fields(item, "6 or 9", &[6, 9])?;
        let legacy = Legacy {
            nonce: fields[0].as_u64("nonce")?,
            gas_price: fields[1].as_u256("gasPrice")?,
            gas_limit: fields[2].as_u64("gasLimit")?,
            to: decode_to(&fields[3])?,
            value: fields[4].as_u256("value")?,
            data: fields[5].as_bytes()?.to_vec(),
            signature: None,
        };
        if fields.len() == 6 {
            return Ok(Transaction::Legacy(legacy));
        }

        let tx = match decode_signature(&fields[6..])? {
            // unsigned object: v is the plain chain id
            (0, None) => Transaction::Legacy(legacy),
            (chain_id, None) => Transaction::Eip155(Eip155::from_legacy(legacy, chain_id)),
            (v, Some(signature)) if v >= CHAIN_ID_INC => {
                let chain_id = (v - CHAIN_ID_INC) / 2;
                Transaction::Eip155(Eip155::from_legacy(legacy, chain_id).with_signature(signature))
            }
            (_, Some(signature)) => Transaction::Legacy(legacy.with_signature(signature)),
        };

        Ok(tx)
    }
}
