use {
    super::{check_fields, decode_signature, decode_to, encode_to, signature_items, Base, Signature},
    crate::{
        error::{CodecError, CryptoError, MalformedRlp, Result},
        rlp::RlpItem,
    },
    primitive_types::U256,
};

/// Fee-market transaction, carried on the wire as `0x02 || rlp(fields)`.
///
/// Access lists are not supported: the field is always encoded as the empty list and a
/// non-empty one is rejected on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eip1559 {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Option<Vec<u8>>,
    pub value: U256,
    pub data: Vec<u8>,
    pub signature: Option<Signature>,
}

impl Base for Eip1559 {
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
        self.max_fee_per_gas
    }
    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }
    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }
    fn recovery_id(&self) -> Result<u8> {
        let v = self.signature.as_ref().ok_or(CodecError::Unsigned)?.v;
        match v {
            0 | 1 => Ok(v as u8),
            _ => Err(CryptoError::InvalidEthereumSignature(format!("incorrect tx.v {v}")).into()),
        }
    }
    fn to_rlp_item(&self, signed: bool) -> RlpItem {
        let mut fields = vec![
            RlpItem::from_u64(self.chain_id),
            RlpItem::from_u64(self.nonce),
            RlpItem::from_u256(self.max_priority_fee_per_gas),
            RlpItem::from_u256(self.max_fee_per_gas),
            RlpItem::from_u64(self.gas_limit),
            encode_to(self.to.as_deref()),
            RlpItem::from_u256(self.value),
            RlpItem::from(self.data.clone()),
            RlpItem::empty_list(),
        ];
        if let (true, Some(signature)) = (signed, self.signature.as_ref()) {
            fields.extend(signature_items(signature));
        }

        RlpItem::List(fields)
    }
}

impl Eip1559 {
    pub fn from_rlp(item: &RlpItem) -> std::result::Result<Self, MalformedRlp> {
        let fields = check_fields(item, "9 or 12", &[9, 12])?;
        if !fields[8].as_list()?.is_empty() {
            return Err(MalformedRlp::UnsupportedAccessList);
        }

        let signature = if fields.len() == 12 {
            decode_signature(&fields[9..])?.1
        } else {
            None
        };

        Ok(Eip1559 {
            chain_id: fields[0].as_u64("chainId")?,
            nonce: fields[1].as_u64("nonce")?,
            max_priority_fee_per_gas: fields[2].as_u256("maxPriorityFeePerGas")?,
            max_fee_per_gas: fields[3].as_u256("maxFeePerGas")?,
            gas_limit: fields[4].as_u64("gasLimit")?,
            to: decode_to(&fields[5])?,
            value: fields[6].as_u256("value")?,
            data: fields[7].as_bytes()?.to_vec(),
            signature,
        })
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx() -> Eip1559 {
        Eip1559 {
            chain_id: 1997,
            nonce: 3,
            max_priority_fee_per_gas: U256::from(1_000_000_000_u64),
            max_fee_per_gas: U256::from(2_000_000_000_u64),
            gas_limit: 21_000,
            to: Some(vec![0xd8; 20]),
            value: U256::from(7),
            data: vec![0, 1, 2],
            signature: None,
        }
    }

    #[test]
    fn layouts() {
        let unsigned = tx();
        assert_eq!(unsigned.to_rlp_item(true).as_list().unwrap().len(), 9);

        let signed = tx().with_signature(Signature::new(1, U256::from(5), U256::from(6)));
        let item = signed.to_rlp_item(true);
        let fields = item.as_list().unwrap();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[8], RlpItem::empty_list());
        assert_eq!(signed.to_rlp_item(false), unsigned.to_rlp_item(false));

        assert_eq!(Eip1559::from_rlp(&item).unwrap(), signed);
        assert_eq!(Eip1559::from_rlp(&unsigned.to_rlp_item(true)).unwrap(), unsigned);
    }

    #[test]
    fn access_list_rejected() {
        let mut fields = tx().to_rlp_item(false).as_list().unwrap().to_vec();
        fields[8] = RlpItem::List(vec![RlpItem::List(vec![
            RlpItem::from(vec![0x11; 20]),
            RlpItem::List(vec![RlpItem::from(vec![0x22; 32])]),
        ])]);

        assert_eq!(
            Eip1559::from_rlp(&RlpItem::List(fields.clone())),
            Err(MalformedRlp::UnsupportedAccessList)
        );

        fields[8] = RlpItem::empty();
        assert_eq!(
            Eip1559::from_rlp(&RlpItem::List(fields)),
            Err(MalformedRlp::ExpectedList)
        );
    }

    #[test]
    fn zero_rs_is_unsigned() {
        let mut fields = tx().to_rlp_item(false).as_list().unwrap().to_vec();
        fields.extend([RlpItem::empty(), RlpItem::empty(), RlpItem::empty()]);
        assert_eq!(Eip1559::from_rlp(&RlpItem::List(fields)).unwrap(), tx());
    }

    #[test]
    fn recovery_id_is_parity() {
        let with_v = |v| tx().with_signature(Signature::new(v, U256::one(), U256::one()));
        assert_eq!(with_v(0).recovery_id().unwrap(), 0);
        assert_eq!(with_v(1).recovery_id().unwrap(), 1);
        assert!(with_v(27).recovery_id().is_err());
        assert_eq!(tx().recovery_id(), Err(CodecError::Unsigned));
    }

    #[test]
    fn field_count() {
        let item = RlpItem::List(vec![RlpItem::empty(); 10]);
        assert_eq!(
            Eip1559::from_rlp(&item),
            Err(MalformedRlp::FieldCount {
                expected: "9 or 12",
                found: 10
            })
        );
    }
}
