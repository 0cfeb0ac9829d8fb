mod eip1559;
mod eip155;
mod legacy;
mod signature;
#[allow(clippy::module_inception)]
pub mod tx;

pub use {
    eip1559::Eip1559,
    eip155::Eip155,
    legacy::Legacy,
    signature::Signature,
    tx::{decode_all, decode_and_validate, encode_all, Transaction, TxType},
};

use {
    crate::{
        error::{MalformedRlp, Result},
        rlp::RlpItem,
    },
    primitive_types::U256,
};

/// Field accessors shared by every transaction shape.
pub trait Base {
    fn nonce(&self) -> u64;
    fn to(&self) -> Option<&[u8]>;
    fn value(&self) -> U256;
    fn data(&self) -> &[u8];
    fn gas_limit(&self) -> u64;
    /// Price cap per gas unit: `gasPrice`, or `maxFeePerGas` for fee-market transactions.
    fn gas_price(&self) -> U256;
    fn chain_id(&self) -> Option<u64>;
    fn signature(&self) -> Option<&Signature>;
    fn recovery_id(&self) -> Result<u8>;
    /// Field list of the transaction; `signed == false` yields the message-to-sign layout.
    fn to_rlp_item(&self, signed: bool) -> RlpItem;
}

fn check_fields<'a>(
    item: &'a RlpItem,
    expected: &'static str,
    counts: &[usize],
) -> std::result::Result<&'a [RlpItem], MalformedRlp> {
    let fields = item.as_list()?;
    if !counts.contains(&fields.len()) {
        return Err(MalformedRlp::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    Ok(fields)
}

// An empty string is contract creation; the address length is left to the validator.
fn decode_to(item: &RlpItem) -> std::result::Result<Option<Vec<u8>>, MalformedRlp> {
    let to = item.as_bytes()?;
    if to.is_empty() {
        Ok(None)
    } else {
        Ok(Some(to.to_vec()))
    }
}

fn encode_to(to: Option<&[u8]>) -> RlpItem {
    match to {
        Some(to) => RlpItem::from(to),
        None => RlpItem::empty(),
    }
}

fn decode_signature(
    fields: &[RlpItem],
) -> std::result::Result<(u64, Option<Signature>), MalformedRlp> {
    let v = fields[0].as_u64("v")?;
    let r = fields[1].as_u256("r")?;
    let s = fields[2].as_u256("s")?;

    // zero r and s stand for an unsigned object
    if r.is_zero() && s.is_zero() {
        return Ok((v, None));
    }

    Ok((v, Some(Signature::new(v, r, s))))
}

fn signature_items(signature: &Signature) -> [RlpItem; 3] {
    [
        RlpItem::from_u64(signature.v),
        RlpItem::from_u256(signature.r),
        RlpItem::from_u256(signature.s),
    ]
}
