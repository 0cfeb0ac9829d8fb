use {
    crate::error::MalformedRlp,
    primitive_types::{H160, U256},
};

/// Any RLP-encodable value: a byte string or an ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    ByteString(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn empty() -> Self {
        RlpItem::ByteString(Vec::new())
    }

    pub fn empty_list() -> Self {
        RlpItem::List(Vec::new())
    }

    /// Minimal big-endian form; zero is the empty string.
    pub fn from_u64(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        let skip = (value.leading_zeros() / 8) as usize;
        RlpItem::ByteString(bytes[skip..].to_vec())
    }

    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0_u8; 32];
        value.to_big_endian(&mut bytes);
        let skip = (value.leading_zeros() / 8) as usize;
        RlpItem::ByteString(bytes[skip..].to_vec())
    }

    pub fn as_bytes(&self) -> Result<&[u8], MalformedRlp> {
        match self {
            RlpItem::ByteString(bytes) => Ok(bytes),
            RlpItem::List(_) => Err(MalformedRlp::ExpectedString),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], MalformedRlp> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::ByteString(_) => Err(MalformedRlp::ExpectedList),
        }
    }

    pub fn as_u64(&self, field: &'static str) -> Result<u64, MalformedRlp> {
        let bytes = canonical_int(self, field)?;
        if bytes.len() > 8 {
            return Err(MalformedRlp::IntegerOverflow(field));
        }

        Ok(bytes.iter().fold(0_u64, |acc, b| acc << 8 | *b as u64))
    }

    pub fn as_u256(&self, field: &'static str) -> Result<U256, MalformedRlp> {
        let bytes = canonical_int(self, field)?;
        if bytes.len() > 32 {
            return Err(MalformedRlp::IntegerOverflow(field));
        }

        Ok(U256::from_big_endian(bytes))
    }
}

fn canonical_int<'a>(item: &'a RlpItem, field: &'static str) -> Result<&'a [u8], MalformedRlp> {
    let bytes = item.as_bytes()?;
    if bytes.first() == Some(&0) {
        return Err(MalformedRlp::LeadingZero(field));
    }

    Ok(bytes)
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::ByteString(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::ByteString(bytes.to_vec())
    }
}

impl From<H160> for RlpItem {
    fn from(address: H160) -> Self {
        RlpItem::ByteString(address.as_bytes().to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}
