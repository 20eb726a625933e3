use std::num::NonZeroUsize;

use bytes::{Buf, BufMut};
use thiserror::Error;

pub mod var_int;
pub mod var_uint;

/// A self-delimiting wire primitive.
pub trait Codec: Sized {
    /// The maximum number of bytes one value can occupy on the wire.
    const MAX_SIZE: NonZeroUsize;

    /// The exact number of bytes [`Codec::encode`] will write.
    fn written_size(&self) -> usize;

    fn encode(&self, write: &mut impl BufMut);

    fn decode(read: &mut impl Buf) -> Result<Self, DecodeError>;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum DecodeError {
    #[error("input ended mid-value")]
    Incomplete,
    #[error("continuation bits exceeded the maximum encoded size")]
    TooLarge,
}
