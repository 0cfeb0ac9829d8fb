//! Boundary to the hashing and secp256k1 primitives.
//!
//! The codec only shapes inputs and outputs here: a 32-byte digest in, fixed-width `r || s`
//! plus a recovery id across, an address out.

use {
    crate::error::CryptoError,
    k256::{
        ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey},
        elliptic_curve::sec1::ToEncodedPoint,
        PublicKey,
    },
    primitive_types::{H160, H256, U256},
    tiny_keccak::{Hasher as _, Keccak},
};

pub use k256::ecdsa::SigningKey;

/// Deterministic 32-byte digest used for transaction identity and the message to sign.
pub trait Hasher {
    fn hash(data: &[u8]) -> H256;
}

pub struct Keccak256;

impl Hasher for Keccak256 {
    fn hash(data: &[u8]) -> H256 {
        keccak256(data)
    }
}

pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0_u8; 32];
    hasher.finalize(&mut output);

    H256(output)
}

pub fn public_key_to_address(key: &VerifyingKey) -> H160 {
    let point = PublicKey::from(key).to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);

    H160::from_slice(&hash.as_bytes()[12..])
}

pub fn address_of(key: &SigningKey) -> H160 {
    public_key_to_address(key.verifying_key())
}

pub fn recover_signer(hash: &H256, recovery_id: u8, rs: &[u8; 64]) -> Result<H160, CryptoError> {
    let signature = K256Signature::from_slice(rs)
        .map_err(|e| CryptoError::InvalidEthereumSignature(e.to_string()))?;
    let recovery_id =
        RecoveryId::from_byte(recovery_id).ok_or(CryptoError::InvalidRecoveryId(recovery_id))?;

    let key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &signature, recovery_id)
        .map_err(|e| CryptoError::InvalidEthereumSignature(e.to_string()))?;

    Ok(public_key_to_address(&key))
}

/// Signs a prehashed message, returning `(recovery_id, r, s)` with a low `s`.
pub fn sign_hash(key: &SigningKey, hash: &H256) -> Result<(u8, U256, U256), CryptoError> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(hash.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    let bytes = signature.to_bytes();
    let r = U256::from_big_endian(&bytes[..32]);
    let s = U256::from_big_endian(&bytes[32..]);

    Ok((recovery_id.to_byte(), r, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SigningKey {
        SigningKey::from_slice(&[0x42_u8; 32]).unwrap()
    }

    #[test]
    fn keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak256_hello() {
        assert_eq!(
            hex::encode(Keccak256::hash(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn sign_then_recover() {
        let key = key();
        let hash = keccak256(b"message to sign");

        let (recovery_id, r, s) = sign_hash(&key, &hash).unwrap();
        let mut rs = [0_u8; 64];
        r.to_big_endian(&mut rs[..32]);
        s.to_big_endian(&mut rs[32..]);

        assert_eq!(recover_signer(&hash, recovery_id, &rs).unwrap(), address_of(&key));
    }

    #[test]
    fn bad_inputs() {
        let hash = keccak256(b"x");
        assert!(matches!(
            recover_signer(&hash, 0, &[0_u8; 64]),
            Err(CryptoError::InvalidEthereumSignature(_))
        ));

        let (_, r, s) = sign_hash(&key(), &hash).unwrap();
        let mut rs = [0_u8; 64];
        r.to_big_endian(&mut rs[..32]);
        s.to_big_endian(&mut rs[32..]);
        assert_eq!(
            recover_signer(&hash, 9, &rs),
            Err(CryptoError::InvalidRecoveryId(9))
        );
    }
}
