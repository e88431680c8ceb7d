//! DES, DESX, and Triple-DES block cipher engine.
//!
//! Supports the three classic key variants (single DES, DESX with input/
//! output whiteners, and three-key Triple-DES in Encrypt-Decrypt-Encrypt
//! order) over five block/stream modes: ECB, CBC, CFB, OFB per ISO 10116,
//! and OFB per FIPS PUB 81. Ported from a PalmOS-era C implementation of
//! `DESLibPrv.c`; the module layout below mirrors that library's own split
//! between key-schedule, round-engine, per-variant composition, and
//! per-mode driver code.
//!
//! ```
//! use des_engine::{Context, Variant, Mode, Direction};
//!
//! let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
//! let iv = [0u8; 8];
//! let mut ctx = Context::new(Variant::Des { key }, Mode::Ecb, iv, Direction::Encrypt).unwrap();
//! let mut out = [0u8; 8];
//! ctx.update(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xe7], &mut out).unwrap();
//! ```

mod context;
mod error;
mod mode;
mod pack;
mod round;
mod schedule;
mod variant;

pub use context::Context;
pub use error::CipherError;
pub use mode::Mode;
pub use variant::Variant;

/// Whether a context was constructed to encrypt or decrypt.
///
/// Fixed at construction time — there is no separate `encrypt`/`decrypt`
/// entry point on [`Context`], matching the source library's model where
/// direction lives on the context rather than on the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}
