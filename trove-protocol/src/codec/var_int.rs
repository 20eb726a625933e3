use std::num::NonZeroUsize;
use std::ops::Deref;

use bytes::{Buf, BufMut};

use super::{var_uint::VarUint, Codec, DecodeError};

pub type VarIntType = i64;

/// A signed variable-length integer. Zig-zag maps the signed value onto
/// the unsigned varint space so that small magnitudes of either sign
/// stay small on the wire (-1 costs one byte, not ten).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VarInt(pub VarIntType);

const fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

const fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

impl Codec for VarInt {
    const MAX_SIZE: NonZeroUsize = VarUint::MAX_SIZE;

    fn written_size(&self) -> usize {
        VarUint(zigzag(self.0)).written_size()
    }

    fn encode(&self, write: &mut impl BufMut) {
        VarUint(zigzag(self.0)).encode(write);
    }

    fn decode(read: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(VarInt(unzigzag(VarUint::decode(read)?.0)))
    }
}

impl From<i64> for VarInt {
    fn from(value: i64) -> Self {
        VarInt(value)
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        VarInt(i64::from(value))
    }
}

impl From<VarInt> for i64 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}

impl Deref for VarInt {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
