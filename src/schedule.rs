//! DES key schedule: expands an 8-byte key into a 32-word round-key schedule.
//!
//! Follows the classic PC1 → 16×rotate → PC2 → "cook" pipeline (the same
//! layout used by SSLeay/OpenSSL's `des_set_key` and reproduced here from
//! `DESLibPrv.c`'s `DESKey`/`CookKey`). "Cooking" packs each round's 48
//! selected key bits into two 32-bit words arranged so the round engine
//! can index them with plain byte shifts, no further permutation at round
//! time.

use crate::Direction;

/// Permuted Choice 1: selects 56 of the 64 key bits (parity bits dropped).
const PC1: [u8; 56] = [
    56, 48, 40, 32, 24, 16, 8, 0, 57, 49, 41, 33, 25, 17, 9, 1, 58, 50, 42, 34, 26, 18, 10, 2, 59,
    51, 43, 35, 62, 54, 46, 38, 30, 22, 14, 6, 61, 53, 45, 37, 29, 21, 13, 5, 60, 52, 44, 36, 28,
    20, 12, 4, 27, 19, 11, 3,
];

/// Left-rotation amount applied to each 28-bit half before round `i`.
const TOTAL_ROTATIONS: [u8; 16] = [1, 2, 4, 6, 8, 10, 12, 14, 15, 17, 19, 21, 23, 25, 27, 28];

/// Permuted Choice 2: selects the 48 round-key bits from the rotated halves.
const PC2: [u8; 48] = [
    13, 16, 10, 23, 0, 4, 2, 27, 14, 5, 20, 9, 22, 18, 11, 3, 25, 7, 15, 6, 26, 19, 12, 1, 40, 51,
    30, 36, 46, 54, 29, 39, 50, 44, 32, 47, 43, 48, 38, 55, 33, 52, 45, 41, 49, 35, 28, 31,
];

const BYTE_BIT: [u8; 8] = [0o200, 0o100, 0o40, 0o20, 0o10, 0o4, 0o2, 0o1];

const BIG_BYTE: [u32; 24] = [
    0x800000, 0x400000, 0x200000, 0x100000, 0x80000, 0x40000, 0x20000, 0x10000, 0x8000, 0x4000,
    0x2000, 0x1000, 0x800, 0x400, 0x200, 0x100, 0x80, 0x40, 0x20, 0x10, 0x8, 0x4, 0x2, 0x1,
];

/// A DES round-key schedule: 16 rounds × 2 words, ready for [`crate::round::des_crypt_block`].
///
/// Stored round 0 first when built for encryption, round 15 first when built
/// for decryption — the round engine always walks the array front to back,
/// so direction lives entirely in this ordering.
#[derive(Clone, Copy)]
pub struct DesSchedule {
    pub words: [u32; 32],
}

impl DesSchedule {
    /// Build a schedule from an 8-byte key in the given direction.
    pub fn new(key: &[u8; 8], direction: Direction) -> Self {
        let mut pc1m = [0u8; 56];
        for (j, &bit_pos) in PC1.iter().enumerate() {
            let l = bit_pos as usize;
            let m = l & 7;
            pc1m[j] = if key[l >> 3] & BYTE_BIT[m] != 0 { 1 } else { 0 };
        }

        // kn[2*i], kn[2*i+1]: the 48 PC2-selected bits of round i, split
        // into two 24-bit-populated 32-bit words.
        let mut kn = [0u32; 32];
        let mut pcr = [0u8; 56];
        for i in 0..16 {
            let rot = TOTAL_ROTATIONS[i] as usize;
            for j in 0..28 {
                let l = j + rot;
                pcr[j] = pc1m[if l < 28 { l } else { l - 28 }];
            }
            for j in 28..56 {
                let l = j + rot;
                pcr[j] = pc1m[if l < 56 { l } else { l - 28 }];
            }
            let (m, n) = (2 * i, 2 * i + 1);
            for j in 0..24 {
                if pcr[PC2[j] as usize] != 0 {
                    kn[m] |= BIG_BYTE[j];
                }
                if pcr[PC2[j + 24] as usize] != 0 {
                    kn[n] |= BIG_BYTE[j];
                }
            }
        }

        let mut words = [0u32; 32];
        for round in 0..16 {
            let raw0 = kn[2 * round];
            let raw1 = kn[2 * round + 1];
            let word0 = ((raw0 & 0x00fc0000) << 6)
                | ((raw0 & 0x00000fc0) << 10)
                | ((raw1 & 0x00fc0000) >> 10)
                | ((raw1 & 0x00000fc0) >> 6);
            let word1 = ((raw0 & 0x0003f000) << 12)
                | ((raw0 & 0x0000003f) << 16)
                | ((raw1 & 0x0003f000) >> 4)
                | (raw1 & 0x0000003f);

            // Encrypt: round 0 first. Decrypt: round 15 first (reverse order).
            let slot = match direction {
                Direction::Encrypt => round,
                Direction::Decrypt => 15 - round,
            };
            words[2 * slot] = word0;
            words[2 * slot + 1] = word1;
        }

        Self { words }
    }
}
