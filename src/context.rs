//! Ties schedule, variant, and mode together into the single entry point
//! callers use: construct once with a key/IV/direction, then feed data
//! through `update` one buffer at a time. Mirrors `DESLibPrv.c`'s
//! `DES_CTX`/`DESInitialize`/`DESEncrypt`/`DESDecrypt`/`DESRestart` split,
//! minus the PalmOS trap-dispatch plumbing that lived around it.

use crate::error::CipherError;
use crate::mode::{self, Mode};
use crate::pack;
use crate::variant::{Engine, Variant};
use crate::Direction;

/// A live encryption or decryption session: one key, one mode, one
/// direction, fixed for the lifetime of the context. Feed it data with
/// [`Context::update`]; rewind its chaining state with [`Context::restart`].
pub struct Context {
    engine: Engine,
    mode: Mode,
    direction: Direction,
    iv: [u32; 2],
    original_iv: [u32; 2],
}

impl Context {
    /// Build a new context. `iv` is ignored for [`Mode::Ecb`] but still
    /// required, matching the source library's uniform `DES_CTX` layout.
    pub fn new(variant: Variant, mode: Mode, iv: [u8; 8], direction: Direction) -> Result<Self, CipherError> {
        mode.validate()?;
        let engine = Engine::build(&variant, mode, direction)?;
        let iv_words = pack::pack(&iv);
        Ok(Context {
            engine,
            mode,
            direction,
            iv: iv_words,
            original_iv: iv_words,
        })
    }

    /// Encrypt or decrypt `input` into `output`, both of which must be the
    /// same length and a multiple of 8 bytes. Chaining state (CBC/CFB/OFB)
    /// carries across calls, so a long message may be split across
    /// multiple `update` calls.
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        if input.len() != output.len() {
            return Err(CipherError::LengthNotBlockAligned(input.len()));
        }
        if input.len() % 8 != 0 {
            return Err(CipherError::LengthNotBlockAligned(input.len()));
        }

        for (in_chunk, out_chunk) in input.chunks_exact(8).zip(output.chunks_exact_mut(8)) {
            let mut block_in = [0u8; 8];
            block_in.copy_from_slice(in_chunk);
            let mut block_out = [0u8; 8];

            match self.mode {
                Mode::Ecb => mode::ecb_block(&self.engine, self.direction, &block_in, &mut block_out),
                Mode::Cbc => mode::cbc_block(
                    &self.engine,
                    self.direction,
                    &mut self.iv,
                    &block_in,
                    &mut block_out,
                ),
                Mode::Cfb { n } => mode::cfb_block(
                    &self.engine,
                    self.direction,
                    n,
                    &mut self.iv,
                    &block_in,
                    &mut block_out,
                ),
                Mode::OfbIso { n } => {
                    mode::ofb_iso_block(&self.engine, n, &mut self.iv, &block_in, &mut block_out)
                }
                Mode::OfbFips81 { n } => {
                    mode::ofb_fips81_block(&self.engine, n, &mut self.iv, &block_in, &mut block_out)
                }
            }

            out_chunk.copy_from_slice(&block_out);
        }

        Ok(())
    }

    /// Reset the chaining state (IV/feedback register) to the value the
    /// context was constructed with. The key schedule is untouched.
    pub fn restart(&mut self) {
        self.iv = self.original_iv;
    }
}
