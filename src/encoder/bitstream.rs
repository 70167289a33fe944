//! Bit-level payload assembly.
//!
//! [`BitBuffer`] packs the segment bitstream MSB-first into bytes. After
//! terminator and pad codewords are appended the buffer is split into
//! [`CodewordBlock`]s per the version's ECC group layout, each block gets
//! its Reed-Solomon codewords, and the blocks are interleaved into the
//! final placement sequence.

use super::reed_solomon::ReedSolomonGenerator;
use super::tables::EccInfo;

/// Pad codewords alternated to fill unused data capacity (11101100, 00010001)
pub const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Growable MSB-first bit buffer
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    data: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no bits have been written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        assert!(count <= 32, "bit count out of range: {count}");
        assert!(
            count == 32 || value >> count == 0,
            "value {value} does not fit in {count} bits"
        );
        for i in (0..count).rev() {
            let bit = (value >> i) & 1 == 1;
            if self.len % 8 == 0 {
                self.data.push(0);
            }
            if bit {
                *self.data.last_mut().unwrap() |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
    }

    /// Read back the bit at `index` (0 = first appended)
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index out of range: {index}");
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// The packed bytes; the final partial byte (if any) is zero-filled on
    /// the right, so a 20-bit stream yields 3 bytes with the last holding
    /// its 4 bits in the high nibble
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// One Reed-Solomon block: a slice of the data codewords plus its ECC bytes
#[derive(Debug, Clone)]
pub struct CodewordBlock {
    /// Offset of the block's first data codeword in the assembled stream
    pub offset: usize,
    /// Number of data codewords in this block
    pub len: usize,
    /// The block's ECC codewords
    pub ecc: Vec<u8>,
}

/// Split the assembled data codewords into blocks per the ECC group layout
/// and compute each block's ECC codewords
pub fn build_blocks(data: &[u8], info: &EccInfo) -> Vec<CodewordBlock> {
    assert_eq!(
        data.len(),
        info.total_data_codewords,
        "data codeword count mismatch"
    );
    let rs = ReedSolomonGenerator::new(info.ecc_per_block);
    let mut blocks = Vec::with_capacity(info.group1_blocks + info.group2_blocks);
    let mut offset = 0;
    for i in 0..info.group1_blocks + info.group2_blocks {
        let len = if i < info.group1_blocks {
            info.group1_data_len
        } else {
            info.group1_data_len + 1
        };
        blocks.push(CodewordBlock {
            offset,
            len,
            ecc: rs.remainder(&data[offset..offset + len]),
        });
        offset += len;
    }
    debug_assert_eq!(offset, data.len());
    blocks
}

/// Interleave data codewords column-wise across blocks, then ECC codewords
/// the same way, producing the byte sequence threaded into the matrix
pub fn interleave_blocks(data: &[u8], blocks: &[CodewordBlock]) -> Vec<u8> {
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    let max_data = blocks.iter().map(|b| b.len).max().unwrap_or(0);
    let mut out = Vec::with_capacity(data.len() + blocks.len() * ecc_len);
    for i in 0..max_data {
        for block in blocks {
            if i < block.len {
                out.push(data[block.offset + i]);
            }
        }
    }
    for i in 0..ecc_len {
        for block in blocks {
            out.push(block.ecc[i]);
        }
    }
    out
}
