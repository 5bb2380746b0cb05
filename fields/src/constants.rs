//! Shared constants for the BLS12-381 base field.

/// BLS12-381 base-field characteristic, big-endian.
///
/// `q = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab`
pub const BLS12_381_Q_BYTES: [u8; 48] = [
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, //
    0x4b, 0x1b, 0xa7, 0xb6, 0x43, 0x4b, 0xac, 0xd7, //
    0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf, //
    0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0, 0xf6, 0x24, //
    0x1e, 0xab, 0xff, 0xfe, 0xb1, 0x53, 0xff, 0xff, //
    0xb9, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xab, //
];

/// Bit length of the BLS12-381 characteristic.
pub const BLS12_381_Q_BITS: u64 = 381;

/// Extra random bits drawn when sampling, so the bias of the final
/// reduction stays below `2^-RANDOM_EXTRA_BITS`.
pub(crate) const RANDOM_EXTRA_BITS: u64 = 128;
