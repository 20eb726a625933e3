use std::num::NonZeroUsize;
use std::ops::Deref;

use bytes::{Buf, BufMut};

use super::{Codec, DecodeError};

pub type VarUintType = u64;

/// An unsigned base-128 variable-length integer, the workhorse of the
/// item wire format. Small values cost one byte; a `u64` never costs
/// more than ten.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VarUint(pub VarUintType);

impl Codec for VarUint {
    /// A `u64` needs at most ten 7-bit groups. Decoding refuses to read
    /// an eleventh byte so corrupt input cannot keep us reading forever.
    const MAX_SIZE: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(10) };

    fn written_size(&self) -> usize {
        match self.0 {
            0 => 1,
            n => (63 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    fn encode(&self, write: &mut impl BufMut) {
        let mut x = self.0;
        loop {
            let byte = (x & 0x7F) as u8;
            x >>= 7;
            if x == 0 {
                write.put_u8(byte);
                break;
            }
            write.put_u8(byte | 0x80);
        }
    }

    fn decode(read: &mut impl Buf) -> Result<Self, DecodeError> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE.get() {
            if !read.has_remaining() {
                return Err(DecodeError::Incomplete);
            }
            let byte = read.get_u8();
            val |= (u64::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarUint(val));
            }
        }
        Err(DecodeError::TooLarge)
    }
}

impl From<u64> for VarUint {
    fn from(value: u64) -> Self {
        VarUint(value)
    }
}

impl From<u32> for VarUint {
    fn from(value: u32) -> Self {
        VarUint(u64::from(value))
    }
}

impl From<u8> for VarUint {
    fn from(value: u8) -> Self {
        VarUint(u64::from(value))
    }
}

impl From<usize> for VarUint {
    fn from(value: usize) -> Self {
        VarUint(value as u64)
    }
}

impl From<VarUint> for u64 {
    fn from(value: VarUint) -> Self {
        value.0
    }
}

impl Deref for VarUint {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
