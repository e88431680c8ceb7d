//! Big-endian conversion between an 8-byte block and a pair of 32-bit halves.
//!
//! Every boundary between a caller-visible buffer and the round engine goes
//! through here: the first byte of a block is the most significant byte of
//! the left half.

/// Pack 8 big-endian bytes into `(left, right)` 32-bit halves.
#[inline]
pub fn pack(bytes: &[u8; 8]) -> [u32; 2] {
    [
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
    ]
}

/// Inverse of [`pack`]: unpack `(left, right)` into 8 big-endian bytes.
#[inline]
pub fn unpack(halves: &[u32; 2]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[0..4].copy_from_slice(&halves[0].to_be_bytes());
    out[4..8].copy_from_slice(&halves[1].to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip() {
        let bytes = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let halves = pack(&bytes);
        assert_eq!(halves, [0x01234567, 0x89abcdef]);
        assert_eq!(unpack(&halves), bytes);
    }

    #[test]
    fn pack_is_big_endian() {
        let bytes = [0xff, 0, 0, 0, 0, 0, 0, 0];
        let halves = pack(&bytes);
        assert_eq!(halves[0], 0xff000000);
        assert_eq!(halves[1], 0);
    }
}
