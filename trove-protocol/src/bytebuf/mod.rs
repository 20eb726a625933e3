use core::str;

use bytes::{Buf, BufMut, Bytes};

use crate::codec::{var_int::VarInt, var_uint::VarUint, Codec, DecodeError as VarDecodeError};
use crate::error::DecodeError;

fn map_var_error(error: VarDecodeError, field: &'static str) -> DecodeError {
    match error {
        VarDecodeError::Incomplete => DecodeError::TruncatedInput(field),
        VarDecodeError::TooLarge => DecodeError::MalformedVarint(field),
    }
}

/// Checked reads over any [`Buf`]. Every method verifies the remaining
/// length first; nothing here panics on short input.
pub trait ByteBuf: Buf {
    fn try_get_u8(&mut self, field: &'static str) -> Result<u8, DecodeError>;

    fn try_get_u16(&mut self, field: &'static str) -> Result<u16, DecodeError>;

    fn try_get_bool(&mut self, field: &'static str) -> Result<bool, DecodeError>;

    fn try_get_var_uint(&mut self, field: &'static str) -> Result<VarUint, DecodeError>;

    fn try_get_var_int(&mut self, field: &'static str) -> Result<VarInt, DecodeError>;

    /// A varint length prefix followed by that many UTF-8 bytes.
    fn try_get_string(
        &mut self,
        field: &'static str,
        max_len: usize,
    ) -> Result<String, DecodeError>;

    fn try_copy_to_bytes(&mut self, len: usize, field: &'static str)
        -> Result<Bytes, DecodeError>;
}

impl<B: Buf> ByteBuf for B {
    fn try_get_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        if self.has_remaining() {
            Ok(self.get_u8())
        } else {
            Err(DecodeError::TruncatedInput(field))
        }
    }

    fn try_get_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        if self.remaining() >= 2 {
            Ok(self.get_u16())
        } else {
            Err(DecodeError::TruncatedInput(field))
        }
    }

    fn try_get_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        Ok(self.try_get_u8(field)? != 0)
    }

    fn try_get_var_uint(&mut self, field: &'static str) -> Result<VarUint, DecodeError> {
        VarUint::decode(self).map_err(|error| map_var_error(error, field))
    }

    fn try_get_var_int(&mut self, field: &'static str) -> Result<VarInt, DecodeError> {
        VarInt::decode(self).map_err(|error| map_var_error(error, field))
    }

    fn try_get_string(
        &mut self,
        field: &'static str,
        max_len: usize,
    ) -> Result<String, DecodeError> {
        let len = self.try_get_var_uint(field)?.0;
        if len > max_len as u64 {
            return Err(DecodeError::SchemaViolation(
                "string length exceeds the maximum",
            ));
        }
        let data = self.try_copy_to_bytes(len as usize, field)?;
        match str::from_utf8(&data) {
            Ok(string) => Ok(string.to_string()),
            Err(_) => Err(DecodeError::SchemaViolation("string is not valid UTF-8")),
        }
    }

    fn try_copy_to_bytes(
        &mut self,
        len: usize,
        field: &'static str,
    ) -> Result<Bytes, DecodeError> {
        if self.remaining() >= len {
            Ok(self.copy_to_bytes(len))
        } else {
            Err(DecodeError::TruncatedInput(field))
        }
    }
}

/// Writers mirroring [`ByteBuf`]. Writing is infallible; anything that
/// could make these produce invalid bytes is rejected at construction.
pub trait ByteBufMut: BufMut {
    fn put_bool(&mut self, value: bool);

    fn put_var_uint(&mut self, value: &VarUint);

    fn put_var_int(&mut self, value: &VarInt);

    fn put_string(&mut self, value: &str);

    /// One presence byte, then the value bytes when present.
    fn put_option<T>(&mut self, value: &Option<T>, write: impl FnOnce(&mut Self, &T));
}

impl<B: BufMut> ByteBufMut for B {
    fn put_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    fn put_var_uint(&mut self, value: &VarUint) {
        value.encode(self);
    }

    fn put_var_int(&mut self, value: &VarInt) {
        value.encode(self);
    }

    fn put_string(&mut self, value: &str) {
        self.put_var_uint(&value.len().into());
        self.put_slice(value.as_bytes());
    }

    fn put_option<T>(&mut self, value: &Option<T>, write: impl FnOnce(&mut Self, &T)) {
        self.put_bool(value.is_some());
        if let Some(value) = value {
            write(self, value);
        }
    }
}
