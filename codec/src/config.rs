use primitive_types::U256;

const fn parse_u64(s: &str) -> u64 {
    let mut bytes = s.as_bytes();
    let mut val: u64 = 0;
    while let [byte, rest @ ..] = bytes {
        assert!(b'0' <= *byte && *byte <= b'9', "invalid digit");
        val = val * 10 + (*byte - b'0') as u64;
        bytes = rest;
    }

    val
}

/// Values defined during compilation
pub const CHAIN_ID: Option<u64> = match option_env!("CHAIN_ID") {
    Some(s) => Some(parse_u64(s)),
    None => None,
};

/// Unchangeable values
pub const EIP1559_TX_TYPE: u8 = 0x02;
pub const ADDRESS_SIZE: usize = 20;
pub const LOWER_REAL_V: u64 = 27;
pub const CHAIN_ID_INC: u64 = 35;
pub const MAX_RLP_DEPTH: usize = 64;

// secp256k1 group order, little-endian limbs
pub const SECP256K1_N: U256 = U256([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]);

// upper bound of a low `s`, `SECP256K1_N / 2`
pub const SECP256K1_HALF_N: U256 = U256([
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
]);

pub const MAX_INIT_CODE_SIZE: usize = 49_152;

pub const TX_GAS: u64 = 21_000;
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
pub const TX_DATA_ZERO_GAS: u64 = 4;
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    pub tx: u64,
    pub contract_creation: u64,
    pub data_zero: u64,
    pub data_non_zero: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            tx: TX_GAS,
            contract_creation: TX_GAS_CONTRACT_CREATION,
            data_zero: TX_DATA_ZERO_GAS,
            data_non_zero: TX_DATA_NON_ZERO_GAS,
        }
    }
}

/// Runtime knobs of the semantic validator.
///
/// `chain_id` pins replay-protected transactions to one chain; `None` accepts any positive id.
/// `max_init_code_size` caps the `data` of contract creation; `None` lifts the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub chain_id: Option<u64>,
    pub gas: GasSchedule,
    pub max_init_code_size: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID,
            gas: GasSchedule::default(),
            max_init_code_size: Some(MAX_INIT_CODE_SIZE),
        }
    }
}

impl ValidatorConfig {
    pub fn with_chain_id(chain_id: u64) -> Self {
        Self {
            chain_id: Some(chain_id),
            ..Self::default()
        }
    }
}
