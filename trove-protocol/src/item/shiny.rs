use bytes::{Buf, BufMut};
use log::warn;

use crate::bytebuf::{ByteBuf, ByteBufMut};
use crate::codec::var_uint::VarUint;
use crate::error::DecodeError;

use super::context::DecodeContext;

/// The rare tracked-stat overlay: one cumulative counter under a key
/// from the shiny mapping table. The codec carries a snapshot of the
/// counter, nothing about its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShinyStat {
    /// Index into the shiny mapping table. Lenient decoding can yield
    /// an id outside the known range; the value is still carried so
    /// re-encoding loses nothing.
    pub key: u64,
    pub value: u64,
}

impl ShinyStat {
    pub fn new(key: u64, value: u64) -> Self {
        Self { key, value }
    }

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_var_uint(&VarUint(self.key));
        buf.put_var_uint(&VarUint(self.value));
    }

    pub(crate) fn read(
        buf: &mut impl Buf,
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Self, DecodeError> {
        let key = buf.try_get_var_uint("shiny tracker id")?.0;
        let value = buf.try_get_var_uint("shiny counter")?.0;

        if !ctx.shinies().is_known(key) {
            if !ctx.is_lenient() {
                return Err(DecodeError::UnknownShinyKey(key));
            }
            ctx.unknown_shiny_keys += 1;
            warn!("carrying unrecognized shiny tracker id {key} as a placeholder");
        }

        Ok(Self { key, value })
    }
}
