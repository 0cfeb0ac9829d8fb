use primitive_types::U256;

/// Wire form of a transaction signature.
///
/// `v` is what the transaction carries on the wire: 27/28 for legacy, `chain_id * 2 + 35 + y`
/// for EIP-155 and the bare y-parity for EIP-1559.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    pub fn new(v: u64, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }

    /// `r` and `s` as 32-byte left-padded big-endian words, in that order.
    pub fn rs_bytes(&self) -> [u8; 64] {
        let mut rs = [0_u8; 64];
        self.r.to_big_endian(&mut rs[0..32]);
        self.s.to_big_endian(&mut rs[32..64]);

        rs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rs_bytes_are_padded() {
        let signature = Signature::new(27, U256::from(1), U256::from(0x0102));
        let rs = signature.rs_bytes();

        assert_eq!(rs[31], 1);
        assert!(rs[..31].iter().all(|b| *b == 0));
        assert_eq!(&rs[62..], &[1, 2]);
        assert!(rs[32..62].iter().all(|b| *b == 0));
    }
}
