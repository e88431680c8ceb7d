//! The three key variants: single DES, DESX (DES plus input/output
//! whiteners), and three-key Triple-DES in Encrypt-Decrypt-Encrypt order.
//!
//! This module only builds key schedules and runs the raw, un-whitened
//! block transform. Whitener XORs and IV chaining are mode concerns and
//! live in [`crate::mode`]; this split mirrors how `DESLibPrv.c` keeps
//! `DESKey`/`DESFunction` free of any per-mode bookkeeping.

use crate::error::CipherError;
use crate::mode::Mode;
use crate::pack;
use crate::round::des_crypt_block;
use crate::schedule::DesSchedule;
use crate::Direction;

/// A cipher variant together with its raw key bytes, as supplied by the
/// caller of [`crate::Context::new`].
#[derive(Debug, Clone, Copy)]
pub enum Variant {
    /// Single DES: an 8-byte key.
    Des { key: [u8; 8] },
    /// DES with 8-byte input and output whiteners: a 24-byte key, split as
    /// `des_key || input_whitener || output_whitener`.
    Desx { key: [u8; 24] },
    /// Three-key Triple-DES (EDE): a 24-byte key, split as `k1 || k2 || k3`.
    TripleDes { key: [u8; 24] },
}

impl Variant {
    /// Build a single-DES variant from an 8-byte key slice.
    pub fn des(key: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; 8] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength { expected: 8, actual: key.len() })?;
        Ok(Variant::Des { key })
    }

    /// Build a DESX variant from a 24-byte key slice (`des_key ||
    /// input_whitener || output_whitener`).
    pub fn desx(key: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; 24] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength { expected: 24, actual: key.len() })?;
        Ok(Variant::Desx { key })
    }

    /// Build a three-key Triple-DES variant from a 24-byte key slice
    /// (`k1 || k2 || k3`).
    pub fn triple_des(key: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; 24] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength { expected: 24, actual: key.len() })?;
        Ok(Variant::TripleDes { key })
    }
}

/// The built, schedule-bearing form of a [`Variant`], ready to transform
/// blocks. Owns its schedules inline — no heap allocation, no trait object.
pub(crate) enum Engine {
    Des(DesSchedule),
    Desx {
        schedule: DesSchedule,
        input_whitener: [u32; 2],
        output_whitener: [u32; 2],
    },
    TripleDes([DesSchedule; 3]),
}

/// CFB and OFB only ever run the block cipher forward, regardless of
/// whether the context as a whole is encrypting or decrypting — the
/// keystream the two sides generate must match bit for bit.
fn schedule_direction(mode: Mode, direction: Direction) -> Direction {
    match mode {
        Mode::Cfb { .. } | Mode::OfbIso { .. } | Mode::OfbFips81 { .. } => Direction::Encrypt,
        Mode::Ecb | Mode::Cbc => direction,
    }
}

impl Engine {
    pub(crate) fn build(variant: &Variant, mode: Mode, direction: Direction) -> Result<Self, CipherError> {
        let sdir = schedule_direction(mode, direction);
        match variant {
            Variant::Des { key } => Ok(Engine::Des(DesSchedule::new(key, sdir))),
            Variant::Desx { key } => {
                let mut des_key = [0u8; 8];
                des_key.copy_from_slice(&key[0..8]);
                let mut iw = [0u8; 8];
                iw.copy_from_slice(&key[8..16]);
                let mut ow = [0u8; 8];
                ow.copy_from_slice(&key[16..24]);
                Ok(Engine::Desx {
                    schedule: DesSchedule::new(&des_key, sdir),
                    input_whitener: pack::pack(&iw),
                    output_whitener: pack::pack(&ow),
                })
            }
            Variant::TripleDes { key } => {
                let mut k1 = [0u8; 8];
                let mut k2 = [0u8; 8];
                let mut k3 = [0u8; 8];
                k1.copy_from_slice(&key[0..8]);
                k2.copy_from_slice(&key[8..16]);
                k3.copy_from_slice(&key[16..24]);

                // CFB/OFB: both sides of the conversation must generate the
                // same keystream, so the schedule composition is always the
                // natural encrypt order E(k1)-D(k2)-E(k3) regardless of the
                // context's own direction. ECB/CBC instead reverse the whole
                // composition (and swap k1/k3) on decrypt, since those modes
                // run the block cipher in its true inverse direction.
                let (s0, s1, s2) = match mode {
                    Mode::Cfb { .. } | Mode::OfbIso { .. } | Mode::OfbFips81 { .. } => (
                        DesSchedule::new(&k1, Direction::Encrypt),
                        DesSchedule::new(&k2, Direction::Decrypt),
                        DesSchedule::new(&k3, Direction::Encrypt),
                    ),
                    Mode::Ecb | Mode::Cbc => match direction {
                        Direction::Encrypt => (
                            DesSchedule::new(&k1, Direction::Encrypt),
                            DesSchedule::new(&k2, Direction::Decrypt),
                            DesSchedule::new(&k3, Direction::Encrypt),
                        ),
                        Direction::Decrypt => (
                            DesSchedule::new(&k3, Direction::Decrypt),
                            DesSchedule::new(&k2, Direction::Encrypt),
                            DesSchedule::new(&k1, Direction::Decrypt),
                        ),
                    },
                };
                Ok(Engine::TripleDes([s0, s1, s2]))
            }
        }
    }

    /// Run the raw schedule-based transform (no whitening) over one block,
    /// in whichever direction the schedule(s) were built for.
    pub(crate) fn transform(&self, block: &mut [u32; 2]) {
        match self {
            Engine::Des(schedule) => des_crypt_block(&schedule.words, block),
            Engine::Desx { schedule, .. } => des_crypt_block(&schedule.words, block),
            Engine::TripleDes(schedules) => {
                for schedule in schedules {
                    des_crypt_block(&schedule.words, block);
                }
            }
        }
    }

    pub(crate) fn input_whitener(&self) -> Option<[u32; 2]> {
        match self {
            Engine::Desx { input_whitener, .. } => Some(*input_whitener),
            _ => None,
        }
    }

    pub(crate) fn output_whitener(&self) -> Option<[u32; 2]> {
        match self {
            Engine::Desx { output_whitener, .. } => Some(*output_whitener),
            _ => None,
        }
    }
}
