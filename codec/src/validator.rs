//! Post-decode checks on a structurally well-formed transaction.
//!
//! Non-negativity and the 256-bit range of the fee and value fields hold by construction of
//! `U256`; the 64-bit range of `gasLimit`, `nonce` and `chainId` is enforced on decode.

use {
    crate::{
        config::{GasSchedule, ValidatorConfig, ADDRESS_SIZE, SECP256K1_HALF_N, SECP256K1_N},
        error::{SemanticValidityError, Violation},
        tx::{Signature, Transaction},
    },
    primitive_types::U256,
    tracing::debug,
};

type Result<T> = std::result::Result<T, SemanticValidityError>;

/// Gas floor for `data` sent to `to` (`None` is contract creation).
pub fn intrinsic_gas(to: Option<&[u8]>, data: &[u8], gas: &GasSchedule) -> u64 {
    let base = match to {
        Some(_) => gas.tx,
        None => gas.contract_creation,
    };
    let zeros = data.iter().filter(|b| **b == 0).count() as u64;
    let non_zeros = data.len() as u64 - zeros;

    base.saturating_add(zeros.saturating_mul(gas.data_zero))
        .saturating_add(non_zeros.saturating_mul(gas.data_non_zero))
}

pub fn validate(tx: &Transaction, config: &ValidatorConfig) -> Result<()> {
    check(tx, config).map_err(|e| {
        debug!(
            target: "tx-validator",
            tx_type = ?tx.tx_type(),
            field = e.field,
            "transaction rejected: {}",
            e
        );
        e
    })
}

fn fail(field: &'static str, violation: Violation) -> Result<()> {
    Err(SemanticValidityError::new(field, violation))
}

fn check(tx: &Transaction, config: &ValidatorConfig) -> Result<()> {
    if let Some(chain_id) = tx.chain_id() {
        if chain_id == 0 {
            return fail("chainId", Violation::NotPositive);
        }
        match config.chain_id {
            Some(expected) if expected != chain_id => {
                return fail(
                    "chainId",
                    Violation::ChainIdMismatch {
                        expected,
                        found: chain_id,
                    },
                )
            }
            _ => {}
        }
    }

    if tx.gas_limit() == 0 {
        return fail("gasLimit", Violation::NotPositive);
    }

    match tx.to() {
        Some(to) if to.len() != ADDRESS_SIZE => {
            return fail("to", Violation::InvalidLength { len: to.len() });
        }
        Some(_) => {}
        None => check_init_code(tx.data(), config)?,
    }

    let want = intrinsic_gas(tx.to(), tx.data(), &config.gas);
    if tx.gas_limit() < want {
        return fail(
            "gasLimit",
            Violation::BelowIntrinsicGas {
                have: tx.gas_limit(),
                want,
            },
        );
    }

    if let Transaction::Eip1559(eip1559) = tx {
        if eip1559.max_priority_fee_per_gas > eip1559.max_fee_per_gas {
            return fail("maxPriorityFeePerGas", Violation::ExceedsMaxFee);
        }
    }

    match tx.signature() {
        Some(signature) => check_signature(tx, signature),
        None => fail("signature", Violation::MissingSignature),
    }
}

fn check_init_code(data: &[u8], config: &ValidatorConfig) -> Result<()> {
    if data.is_empty() {
        return fail("data", Violation::EmptyInitCode);
    }
    match config.max_init_code_size {
        Some(max) if data.len() > max => {
            fail("data", Violation::InvalidLength { len: data.len() })
        }
        _ => Ok(()),
    }
}

fn in_curve_order(value: U256) -> bool {
    !value.is_zero() && value < SECP256K1_N
}

fn check_signature(tx: &Transaction, signature: &Signature) -> Result<()> {
    if !in_curve_order(signature.r) {
        return fail("r", Violation::OutOfRange);
    }
    // high `s` is the malleable twin of a low one
    if !in_curve_order(signature.s) || signature.s > SECP256K1_HALF_N {
        return fail("s", Violation::OutOfRange);
    }
    if tx.recovery_id().is_err() {
        return fail("v", Violation::NonCanonicalV(signature.v));
    }

    Ok(())
}
