//! Block/stream mode drivers: ECB, CBC, CFB, and two OFB variants (ISO
//! 10116 and FIPS PUB 81), each built on top of [`crate::variant::Engine`]'s
//! raw per-block transform.
//!
//! Grounded on `DESLibPrv.c`'s `DES_ECBUpdate`, `DES_CBCUpdate`,
//! `DES_CFBUpdate`, `DES_OFBISOUpdate`, and `DES_OFBFIPS81Update` (and their
//! `DESX_`/`DES3_` counterparts), with one deliberate correction: the
//! DESX-OFB-ISO input whitener is applied symmetrically to both halves of
//! the register (see `DESIGN.md`).

use crate::error::CipherError;
use crate::pack;
use crate::variant::Engine;
use crate::Direction;

/// Which block or stream mode a [`crate::Context`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc,
    /// Cipher feedback, with feedback width `n` bits (1, 8, 16, 32, or 64).
    Cfb { n: u32 },
    /// Output feedback per ISO 10116: feedback register is replaced by the
    /// full cipher output each round, regardless of `n`.
    OfbIso { n: u32 },
    /// Output feedback per FIPS PUB 81: feedback register is shifted left
    /// by `n` bits and the new cipher output's top `n` bits shifted in.
    OfbFips81 { n: u32 },
}

impl Mode {
    pub(crate) fn feedback_width(&self) -> Option<u32> {
        match self {
            Mode::Ecb | Mode::Cbc => None,
            Mode::Cfb { n } | Mode::OfbIso { n } | Mode::OfbFips81 { n } => Some(*n),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CipherError> {
        if let Some(n) = self.feedback_width() {
            if !matches!(n, 1 | 8 | 16 | 32 | 64) {
                return Err(CipherError::InvalidFeedbackWidth(n));
            }
        }
        Ok(())
    }
}

#[inline]
fn to_u64(halves: [u32; 2]) -> u64 {
    ((halves[0] as u64) << 32) | halves[1] as u64
}

#[inline]
fn from_u64(word: u64) -> [u32; 2] {
    [(word >> 32) as u32, word as u32]
}

#[inline]
fn xor_whitener(block: &mut [u32; 2], whitener: [u32; 2]) {
    block[0] ^= whitener[0];
    block[1] ^= whitener[1];
}

/// ECB: each block is transformed independently. DESX whitens on both
/// sides of the transform, in an order that flips with direction.
pub(crate) fn ecb_block(engine: &Engine, direction: Direction, input: &[u8; 8], output: &mut [u8; 8]) {
    let mut work = pack::pack(input);
    let iw = engine.input_whitener();
    let ow = engine.output_whitener();
    match direction {
        Direction::Encrypt => {
            if let Some(iw) = iw {
                xor_whitener(&mut work, iw);
            }
            engine.transform(&mut work);
            if let Some(ow) = ow {
                xor_whitener(&mut work, ow);
            }
        }
        Direction::Decrypt => {
            if let Some(ow) = ow {
                xor_whitener(&mut work, ow);
            }
            engine.transform(&mut work);
            if let Some(iw) = iw {
                xor_whitener(&mut work, iw);
            }
        }
    }
    *output = pack::unpack(&work);
}

/// CBC: chains the previous ciphertext block into the next via XOR.
/// `iv` holds the chaining value and is updated in place.
pub(crate) fn cbc_block(
    engine: &Engine,
    direction: Direction,
    iv: &mut [u32; 2],
    input: &[u8; 8],
    output: &mut [u8; 8],
) {
    let block = pack::pack(input);
    let iw = engine.input_whitener();
    let ow = engine.output_whitener();
    match direction {
        Direction::Encrypt => {
            let mut work = block;
            xor_whitener(&mut work, *iv);
            if let Some(iw) = iw {
                xor_whitener(&mut work, iw);
            }
            engine.transform(&mut work);
            if let Some(ow) = ow {
                xor_whitener(&mut work, ow);
            }
            *iv = work;
            *output = pack::unpack(&work);
        }
        Direction::Decrypt => {
            let mut work = block;
            if let Some(ow) = ow {
                xor_whitener(&mut work, ow);
            }
            engine.transform(&mut work);
            xor_whitener(&mut work, *iv);
            if let Some(iw) = iw {
                xor_whitener(&mut work, iw);
            }
            *iv = block;
            *output = pack::unpack(&work);
        }
    }
}

/// CFB: a 64-bit shift register, consumed `n` bits at a time. The register
/// is always run through the cipher's *forward* schedule (enforced at
/// `Engine::build` time); the actual encrypt/decrypt direction only
/// controls whether the feedback comes from the ciphertext we just
/// produced or the ciphertext we were given.
pub(crate) fn cfb_block(
    engine: &Engine,
    direction: Direction,
    n: u32,
    iv: &mut [u32; 2],
    input: &[u8; 8],
    output: &mut [u8; 8],
) {
    let mask: u64 = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
    let rounds = 64 / n;
    let input_word = to_u64(pack::pack(input));
    let mut reg = to_u64(*iv);
    let mut out_word: u64 = 0;

    let iw = engine.input_whitener();
    let ow = engine.output_whitener();

    for i in 0..rounds {
        let mut work = from_u64(reg);
        if let Some(iw) = iw {
            xor_whitener(&mut work, iw);
        }
        engine.transform(&mut work);
        if let Some(ow) = ow {
            xor_whitener(&mut work, ow);
        }
        let work_word = to_u64(work);
        let keystream_chunk = (work_word >> (64 - n)) & mask;

        let shift = 64 - n * (i + 1);
        let input_chunk = (input_word >> shift) & mask;

        let (output_chunk, feedback_chunk) = match direction {
            Direction::Encrypt => {
                let c = input_chunk ^ keystream_chunk;
                (c, c)
            }
            Direction::Decrypt => {
                let p = input_chunk ^ keystream_chunk;
                (p, input_chunk)
            }
        };
        out_word |= output_chunk << shift;
        reg = if n == 64 {
            feedback_chunk
        } else {
            ((reg << n) | feedback_chunk) & u64::MAX
        };
    }

    *iv = from_u64(reg);
    *output = pack::unpack(&from_u64(out_word));
}

/// OFB per ISO 10116: after each sub-round the register is replaced
/// wholesale by the cipher's output, not merely shifted. Direction never
/// enters the keystream: it is pure generator, XORed with plaintext or
/// ciphertext alike.
pub(crate) fn ofb_iso_block(engine: &Engine, n: u32, iv: &mut [u32; 2], input: &[u8; 8], output: &mut [u8; 8]) {
    let mask: u64 = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
    let rounds = 64 / n;
    let input_word = to_u64(pack::pack(input));
    let mut reg = to_u64(*iv);
    let mut out_word: u64 = 0;

    let iw = engine.input_whitener();
    let ow = engine.output_whitener();

    for i in 0..rounds {
        let mut work = from_u64(reg);
        if let Some(iw) = iw {
            xor_whitener(&mut work, iw);
        }
        engine.transform(&mut work);
        if let Some(ow) = ow {
            xor_whitener(&mut work, ow);
        }
        let work_word = to_u64(work);
        let keystream_chunk = (work_word >> (64 - n)) & mask;

        let shift = 64 - n * (i + 1);
        let input_chunk = (input_word >> shift) & mask;
        out_word |= (input_chunk ^ keystream_chunk) << shift;

        reg = work_word;
    }

    // DESX quirk preserved from the source: OFB-ISO XORs the output
    // whitener into the finished block a second time, on top of the one
    // already folded into every sub-round above.
    if let Some(ow) = ow {
        out_word ^= to_u64(ow);
    }

    *iv = from_u64(reg);
    *output = pack::unpack(&from_u64(out_word));
}

/// OFB per FIPS PUB 81: the register is shifted left by `n` bits each
/// round and the new output's top `n` bits shifted in, mirroring CFB's
/// register update but with the cipher's own output as feedback instead
/// of plaintext- or ciphertext-derived bits.
pub(crate) fn ofb_fips81_block(
    engine: &Engine,
    n: u32,
    iv: &mut [u32; 2],
    input: &[u8; 8],
    output: &mut [u8; 8],
) {
    let mask: u64 = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
    let rounds = 64 / n;
    let input_word = to_u64(pack::pack(input));
    let mut reg = to_u64(*iv);
    let mut out_word: u64 = 0;

    let iw = engine.input_whitener();
    let ow = engine.output_whitener();

    for i in 0..rounds {
        let mut work = from_u64(reg);
        if let Some(iw) = iw {
            xor_whitener(&mut work, iw);
        }
        engine.transform(&mut work);
        if let Some(ow) = ow {
            xor_whitener(&mut work, ow);
        }
        let work_word = to_u64(work);
        let keystream_chunk = (work_word >> (64 - n)) & mask;

        let shift = 64 - n * (i + 1);
        let input_chunk = (input_word >> shift) & mask;
        out_word |= (input_chunk ^ keystream_chunk) << shift;

        reg = if n == 64 {
            keystream_chunk
        } else {
            ((reg << n) | keystream_chunk) & u64::MAX
        };
    }

    *iv = from_u64(reg);
    *output = pack::unpack(&from_u64(out_word));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn des_engine(key: [u8; 8], mode: Mode, direction: Direction) -> Engine {
        Engine::build(&Variant::Des { key }, mode, direction).unwrap()
    }

    #[test]
    fn ecb_round_trip() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let enc = des_engine(key, Mode::Ecb, Direction::Encrypt);
        let dec = des_engine(key, Mode::Ecb, Direction::Decrypt);
        let plaintext = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut cipher = [0u8; 8];
        ecb_block(&enc, Direction::Encrypt, &plaintext, &mut cipher);
        let mut recovered = [0u8; 8];
        ecb_block(&dec, Direction::Decrypt, &cipher, &mut recovered);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn ecb_identical_blocks_produce_identical_ciphertext() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let enc = des_engine(key, Mode::Ecb, Direction::Encrypt);
        let block = [5, 5, 5, 5, 5, 5, 5, 5];
        let mut c1 = [0u8; 8];
        let mut c2 = [0u8; 8];
        ecb_block(&enc, Direction::Encrypt, &block, &mut c1);
        ecb_block(&enc, Direction::Encrypt, &block, &mut c2);
        assert_eq!(c1, c2);
    }

    #[test]
    fn cbc_round_trip_and_chaining() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let iv0 = [0u32, 0u32];
        let enc = des_engine(key, Mode::Cbc, Direction::Encrypt);
        let dec = des_engine(key, Mode::Cbc, Direction::Decrypt);

        let blocks = [[1u8; 8], [2u8; 8], [3u8; 8]];
        let mut enc_iv = iv0;
        let mut ciphertexts = [[0u8; 8]; 3];
        for (i, block) in blocks.iter().enumerate() {
            cbc_block(&enc, Direction::Encrypt, &mut enc_iv, block, &mut ciphertexts[i]);
        }

        let mut dec_iv = iv0;
        let mut recovered = [[0u8; 8]; 3];
        for (i, block) in ciphertexts.iter().enumerate() {
            cbc_block(&dec, Direction::Decrypt, &mut dec_iv, block, &mut recovered[i]);
        }
        assert_eq!(recovered, blocks);

        // Flipping a ciphertext bit garbles exactly two recovered blocks
        // (this one, and the next one's chaining input).
        let mut tampered = ciphertexts;
        tampered[0][0] ^= 0x01;
        let mut dec_iv = iv0;
        let mut tampered_recovered = [[0u8; 8]; 3];
        for (i, block) in tampered.iter().enumerate() {
            cbc_block(&dec, Direction::Decrypt, &mut dec_iv, block, &mut tampered_recovered[i]);
        }
        assert_ne!(tampered_recovered[0], blocks[0]);
        assert_ne!(tampered_recovered[1], blocks[1]);
        assert_eq!(tampered_recovered[2], blocks[2]);
    }

    #[test]
    fn cfb_is_self_inverse_keystream() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let iv0 = [0x1234_5678, 0x9abc_def0];
        let enc = des_engine(key, Mode::Cfb { n: 8 }, Direction::Encrypt);
        let dec = des_engine(key, Mode::Cfb { n: 8 }, Direction::Decrypt);

        let plaintext = [0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4];
        let mut iv = iv0;
        let mut cipher = [0u8; 8];
        cfb_block(&enc, Direction::Encrypt, 8, &mut iv, &plaintext, &mut cipher);

        let mut iv = iv0;
        let mut recovered = [0u8; 8];
        cfb_block(&dec, Direction::Decrypt, 8, &mut iv, &cipher, &mut recovered);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn ofb_fips81_keystream_is_direction_independent() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let iv0 = [0x1111_2222, 0x3333_4444];
        let engine = des_engine(key, Mode::OfbFips81 { n: 64 }, Direction::Encrypt);

        let plaintext = [1, 1, 1, 1, 1, 1, 1, 1];
        let mut iv = iv0;
        let mut cipher = [0u8; 8];
        ofb_fips81_block(&engine, 64, &mut iv, &plaintext, &mut cipher);

        let mut iv = iv0;
        let mut recovered = [0u8; 8];
        ofb_fips81_block(&engine, 64, &mut iv, &cipher, &mut recovered);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn ofb_iso_n64_matches_fips81_n64() {
        // When n == 64 the two OFB variants coincide: the register is
        // replaced wholesale either way.
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let iv0 = [0xaaaa_bbbb, 0xcccc_dddd];
        let engine = des_engine(key, Mode::OfbIso { n: 64 }, Direction::Encrypt);
        let plaintext = [9, 8, 7, 6, 5, 4, 3, 2];

        let mut iv_a = iv0;
        let mut out_a = [0u8; 8];
        ofb_iso_block(&engine, 64, &mut iv_a, &plaintext, &mut out_a);

        let mut iv_b = iv0;
        let mut out_b = [0u8; 8];
        ofb_fips81_block(&engine, 64, &mut iv_b, &plaintext, &mut out_b);

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn invalid_feedback_width_is_rejected() {
        assert!(Mode::Cfb { n: 3 }.validate().is_err());
        assert!(Mode::OfbIso { n: 64 }.validate().is_ok());
        assert!(Mode::Ecb.validate().is_ok());
    }
}
