pub mod config;
pub mod crypto;
pub mod error;
pub mod rlp;
pub mod tx;
pub mod validator;

pub use config::*;
pub use error::{CodecError, MalformedRlp, Result, SemanticValidityError, Violation};
pub use primitive_types::{H160, H256, U256};
pub use rlp::{Reader, RlpItem, Writer};
pub use tx::{
    decode_all, decode_and_validate, encode_all, Base, Eip155, Eip1559, Legacy, Signature,
    Transaction, TxType,
};
