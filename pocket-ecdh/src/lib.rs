//! Toy Diffie-Hellman key exchange over demonstration-scale elliptic curves.
//!
//! Two parties derive the same curve point from their own private scalar and
//! the peer's public point, then use that point to mask a sequence of symbol
//! codes. The masking transform is a teaching device with no cryptographic
//! strength whatsoever.
#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

mod cipher;
mod keypair;

pub use cipher::{open, seal, CipherError, MaskedMessage, MaskingKey};
pub use keypair::{Keypair, KeypairError};
