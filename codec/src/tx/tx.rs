use {
    super::{Base, Eip155, Eip1559, Legacy, Signature},
    crate::{
        config::{ValidatorConfig, ADDRESS_SIZE, EIP1559_TX_TYPE, LOWER_REAL_V},
        crypto::{keccak256, recover_signer, sign_hash, Hasher, SigningKey},
        error::{CodecError, CryptoError, MalformedRlp, Result, SemanticValidityError},
        rlp::{self, decode_item, encode_to_vec, Reader, RlpItem, Writer},
        validator,
    },
    primitive_types::{H160, H256},
    std::ops::Deref,
    tracing::{debug, trace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxType {
    Legacy,
    Eip155,
    Eip1559,
}

/// Closed set of supported transaction shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Legacy(Legacy),
    Eip155(Eip155),
    Eip1559(Eip1559),
}

impl Deref for Transaction {
    type Target = dyn Base;
    fn deref(&self) -> &Self::Target {
        match self {
            Transaction::Legacy(tx) => tx,
            Transaction::Eip155(tx) => tx,
            Transaction::Eip1559(tx) => tx,
        }
    }
}

impl From<Legacy> for Transaction {
    fn from(tx: Legacy) -> Self {
        Transaction::Legacy(tx)
    }
}

impl From<Eip155> for Transaction {
    fn from(tx: Eip155) -> Self {
        Transaction::Eip155(tx)
    }
}

impl From<Eip1559> for Transaction {
    fn from(tx: Eip1559) -> Self {
        Transaction::Eip1559(tx)
    }
}

impl Transaction {
    /// Decodes the next transaction of the stream; the reader is left right after it.
    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let start = reader.consumed();

        match Transaction::decode_shape(reader) {
            Ok(tx) => {
                trace!(
                    target: "tx-codec",
                    start,
                    consumed = reader.consumed() - start,
                    tx_type = ?tx.tx_type(),
                    "transaction decoded"
                );
                Ok(tx)
            }
            Err(e) => {
                debug!(target: "tx-codec", start, "transaction rejected: {}", e);
                Err(e.into())
            }
        }
    }

    fn decode_shape(reader: &mut Reader) -> std::result::Result<Self, MalformedRlp> {
        let first = reader.peek_byte().map_err(|_| MalformedRlp::EmptyInput)?;

        match first {
            EIP1559_TX_TYPE => {
                reader.read_byte()?;
                let item = decode_item(reader)?;
                Ok(Transaction::Eip1559(Eip1559::from_rlp(&item)?))
            }
            0x00..=0x7f => Err(MalformedRlp::UnknownTxType(first)),
            0x80..=0xbf => Err(MalformedRlp::ExpectedList),
            _ => {
                let item = decode_item(reader)?;
                Legacy::from_rlp(&item)
            }
        }
    }

    /// Decodes exactly one transaction; spurious trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let tx = Transaction::decode(&mut reader)?;
        if !reader.is_empty() {
            debug!(target: "tx-codec", remaining = reader.remaining(), "spurious bytes after transaction");
            return Err(MalformedRlp::TrailingBytes(reader.remaining()).into());
        }

        Ok(tx)
    }

    pub fn from_hex(data: &str) -> Result<Self> {
        let data = data.strip_prefix("0x").unwrap_or(data);
        let bytes = hex::decode(data).map_err(|e| MalformedRlp::InvalidHex(e.to_string()))?;

        Transaction::from_bytes(&bytes)
    }

    pub fn tx_type(&self) -> TxType {
        match self {
            Transaction::Legacy(_) => TxType::Legacy,
            Transaction::Eip155(_) => TxType::Eip155,
            Transaction::Eip1559(_) => TxType::Eip1559,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature().is_some()
    }

    /// Destination as an address; `None` for contract creation or a `to` of the wrong length.
    pub fn to_address(&self) -> Option<H160> {
        self.to()
            .filter(|to| to.len() == ADDRESS_SIZE)
            .map(H160::from_slice)
    }

    fn type_prefix(&self) -> Option<u8> {
        match self {
            Transaction::Eip1559(_) => Some(EIP1559_TX_TYPE),
            _ => None,
        }
    }

    fn typed(&self, item: &RlpItem) -> Vec<u8> {
        let body = encode_to_vec(item);
        match self.type_prefix() {
            Some(prefix) => {
                let mut typed = Vec::with_capacity(body.len() + 1);
                typed.push(prefix);
                typed.extend_from_slice(&body);
                typed
            }
            None => body,
        }
    }

    /// Streams the wire form into `writer`.
    pub fn encode(&self, writer: &mut Writer) {
        if let Some(prefix) = self.type_prefix() {
            writer.write_byte(prefix);
        }
        rlp::encode(&self.to_rlp_item(true), writer);
    }

    /// Wire form, built in a single buffer.
    pub fn to_rlp(&self) -> Vec<u8> {
        self.typed(&self.to_rlp_item(true))
    }

    /// Encoding with the signature omitted; EIP-155 keeps the `[chainId, 0, 0]` suffix.
    pub fn message_to_sign(&self) -> Vec<u8> {
        self.typed(&self.to_rlp_item(false))
    }

    /// Transaction identity.
    pub fn hash(&self) -> H256 {
        keccak256(&self.to_rlp())
    }

    pub fn hash_with<H: Hasher>(&self) -> H256 {
        H::hash(&self.to_rlp())
    }

    pub fn signing_hash(&self) -> H256 {
        keccak256(&self.message_to_sign())
    }

    pub fn recover_sender(&self) -> Result<H160> {
        let signature = self.signature().ok_or(CodecError::Unsigned)?;
        let recovery_id = self.recovery_id()?;

        let from = recover_signer(&self.signing_hash(), recovery_id, &signature.rs_bytes())?;
        Ok(from)
    }

    pub fn with_signature(self, signature: Signature) -> Self {
        match self {
            Transaction::Legacy(tx) => Transaction::Legacy(tx.with_signature(signature)),
            Transaction::Eip155(tx) => Transaction::Eip155(tx.with_signature(signature)),
            Transaction::Eip1559(tx) => Transaction::Eip1559(tx.with_signature(signature)),
        }
    }

    pub fn without_signature(self) -> Self {
        match self {
            Transaction::Legacy(tx) => Transaction::Legacy(tx.without_signature()),
            Transaction::Eip155(tx) => Transaction::Eip155(tx.without_signature()),
            Transaction::Eip1559(tx) => Transaction::Eip1559(tx.without_signature()),
        }
    }

    /// Signs the message to sign and folds the recovery id into `v` for the variant.
    pub fn sign(self, key: &SigningKey) -> Result<Self> {
        let (recovery_id, r, s) = sign_hash(key, &self.signing_hash())?;
        let y = recovery_id as u64;

        let v = match &self {
            Transaction::Legacy(_) => LOWER_REAL_V + y,
            Transaction::Eip155(tx) => tx
                .v_base()?
                .checked_add(y)
                .ok_or(CryptoError::CalculationOverflow)?,
            Transaction::Eip1559(_) => y,
        };

        Ok(self.with_signature(Signature::new(v, r, s)))
    }

    pub fn semantic_validity(
        &self,
        config: &ValidatorConfig,
    ) -> std::result::Result<(), SemanticValidityError> {
        validator::validate(self, config)
    }
}

/// Decodes back-to-back transactions until the input is exhausted.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Transaction>> {
    let mut reader = Reader::new(bytes);
    let mut txs = vec![];
    while !reader.is_empty() {
        txs.push(Transaction::decode(&mut reader)?);
    }

    Ok(txs)
}

/// Ordered canonical encodings, as handed to a trie-root service.
pub fn encode_all(txs: &[Transaction]) -> Vec<Vec<u8>> {
    txs.iter().map(Transaction::to_rlp).collect()
}

pub fn decode_and_validate(bytes: &[u8], config: &ValidatorConfig) -> Result<Transaction> {
    let tx = Transaction::from_bytes(bytes)?;
    tx.semantic_validity(config)?;

    Ok(tx)
}
