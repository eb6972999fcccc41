use super::chunks::*;
use super::config::{Config, SIZE_WIDTH};
use super::header::*;
use core::ops::{Deref, DerefMut};
use num_traits::FromPrimitive;

pub use super::chunks::{ByteChunks, TextChunks};
pub use super::error::Error;
pub use super::header::{MajorType, Width};

/// What bounds the items a [`Decoder`] may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole buffer; ends when the buffer is exhausted.
    TopLevel,
    /// A counted array or map.
    Definite,
    /// An array or map terminated by a break byte.
    Indefinite,
}

impl Scope {
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::TopLevel)
    }

    pub fn is_indefinite(&self) -> bool {
        matches!(self, Self::Indefinite)
    }
}

/// A cursor over a borrowed CBOR buffer.
///
/// Every accessor either consumes one complete item and advances, or fails
/// and leaves the cursor exactly where it was, so a caller can retry a
/// different accessor at the same position.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
    scope: Scope,
    remaining: usize,
    config: Config,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, Config::default())
    }

    pub fn with_config(data: &'a [u8], config: Config) -> Self {
        Self {
            data,
            offset: 0,
            scope: Scope::TopLevel,
            remaining: 0,
            config,
        }
    }

    /// Offset of the next unread byte within the whole buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Items still expected by a definite container; maps count keys and
    /// values separately.
    pub fn remaining(&self) -> Option<usize> {
        match self.scope {
            Scope::Definite => Some(self.remaining),
            _ => None,
        }
    }

    /// Peeks at the major type of the next item.
    pub fn get_type(&self) -> Result<MajorType, Error> {
        self.data
            .get(self.offset)
            .map(|&b| MajorType::of(b))
            .ok_or(Error::End)
    }

    /// Checks whether the current scope has no more items.
    ///
    /// Inside an indefinite container this consumes the break byte when it
    /// is found; subsequent calls keep returning `true`.
    pub fn at_end(&mut self) -> bool {
        match self.scope {
            Scope::TopLevel => self.offset >= self.data.len(),
            Scope::Definite => self.remaining == 0,
            Scope::Indefinite => {
                if self.remaining == 0 {
                    return true;
                }
                if self.data.get(self.offset) == Some(&BREAK) {
                    self.offset += 1;
                    self.remaining = 0;
                    return true;
                }
                false
            }
        }
    }

    /// The unread bytes, provided the scope has room for another item.
    pub(crate) fn item(&self) -> Result<&'a [u8], Error> {
        if self.scope.is_container() && self.remaining == 0 {
            return Err(Error::End);
        }
        Ok(&self.data[self.offset..])
    }

    /// Moves past a tag header, which does not count as an item by itself.
    pub(crate) fn advance_header(&mut self, len: usize) {
        self.offset += len;
    }

    /// Moves past one complete item.
    pub(crate) fn advance(&mut self, len: usize) {
        self.offset += len;
        if self.scope == Scope::Definite {
            self.remaining -= 1;
        }
    }

    fn read_uint(&self, max: Width, major: MajorType) -> Result<(u64, usize), Error> {
        read_header(self.item()?, max, major)
    }

    fn get_unsigned<T: FromPrimitive>(&mut self, width: Width) -> Result<T, Error> {
        let (value, len) = self.read_uint(width, MajorType::UnsignedInteger)?;
        let value = T::from_u64(value).ok_or(Error::Overflow)?;
        self.advance(len);
        Ok(value)
    }

    fn get_signed<T: FromPrimitive>(&mut self, width: Width) -> Result<T, Error> {
        let (value, len) = match self.read_uint(width, MajorType::UnsignedInteger) {
            Ok((value, len)) => (i64::try_from(value).map_err(|_| Error::Overflow)?, len),
            Err(Error::InvalidType) => {
                let (magnitude, len) = self.read_uint(width, MajorType::NegativeInteger)?;
                let magnitude = i64::try_from(magnitude).map_err(|_| Error::Overflow)?;
                (-1 - magnitude, len)
            }
            Err(e) => return Err(e),
        };
        let value = T::from_i64(value).ok_or(Error::Overflow)?;
        self.advance(len);
        Ok(value)
    }

    pub fn get_uint8(&mut self) -> Result<u8, Error> {
        self.get_unsigned(Width::U8)
    }

    pub fn get_uint16(&mut self) -> Result<u16, Error> {
        self.get_unsigned(Width::U16)
    }

    pub fn get_uint32(&mut self) -> Result<u32, Error> {
        self.get_unsigned(Width::U32)
    }

    pub fn get_uint64(&mut self) -> Result<u64, Error> {
        self.get_unsigned(Width::U64)
    }

    pub fn get_int8(&mut self) -> Result<i8, Error> {
        self.get_signed(Width::U8)
    }

    pub fn get_int16(&mut self) -> Result<i16, Error> {
        self.get_signed(Width::U16)
    }

    pub fn get_int32(&mut self) -> Result<i32, Error> {
        self.get_signed(Width::U32)
    }

    pub fn get_int64(&mut self) -> Result<i64, Error> {
        self.get_signed(Width::U64)
    }

    fn get_simple(&mut self, expected: u8, mask: u8) -> Result<u8, Error> {
        let initial = *self.item()?.first().ok_or(Error::End)?;
        if initial & mask != expected {
            return Err(Error::InvalidType);
        }
        self.advance(1);
        Ok(initial)
    }

    pub fn get_bool(&mut self) -> Result<bool, Error> {
        self.get_simple(FALSE, !1).map(|b| b & 1 == 1)
    }

    pub fn get_null(&mut self) -> Result<(), Error> {
        self.get_simple(NULL, 0xFF).map(|_| ())
    }

    pub fn get_undefined(&mut self) -> Result<(), Error> {
        self.get_simple(UNDEFINED, 0xFF).map(|_| ())
    }

    fn peek_string(&self, major: MajorType) -> Result<(&'a [u8], usize), Error> {
        let item = self.item()?;
        match item.first() {
            None => Err(Error::End),
            Some(&b) if MajorType::of(b) == major && b & 0x1F == INDEFINITE => {
                Err(Error::InvalidType)
            }
            Some(_) => definite_string(item, major),
        }
    }

    /// Reads a definite-length byte string as a slice of the input.
    ///
    /// Indefinite-length strings are rejected with [`Error::InvalidType`];
    /// use [`get_bstr_chunks`](Self::get_bstr_chunks) for those.
    pub fn get_bstr(&mut self) -> Result<&'a [u8], Error> {
        let (payload, len) = self.peek_string(MajorType::ByteString)?;
        self.advance(len);
        Ok(payload)
    }

    /// Reads a definite-length UTF-8 text string as a slice of the input.
    pub fn get_tstr(&mut self) -> Result<&'a str, Error> {
        let (payload, len) = self.peek_string(MajorType::TextString)?;
        let s = core::str::from_utf8(payload)?;
        self.advance(len);
        Ok(s)
    }

    /// Reads a byte string of either length discipline.
    ///
    /// The whole item is validated before the cursor moves.
    pub fn get_bstr_chunks(&mut self) -> Result<ByteChunks<'a>, Error> {
        let item = self.item()?;
        let len = string_len(item, MajorType::ByteString, false)?;
        self.advance(len);
        Ok(ByteChunks::new(&item[..len], MajorType::ByteString))
    }

    /// Reads a text string of either length discipline, checking that each
    /// chunk is valid UTF-8.
    pub fn get_tstr_chunks(&mut self) -> Result<TextChunks<'a>, Error> {
        let item = self.item()?;
        let len = string_len(item, MajorType::TextString, true)?;
        self.advance(len);
        Ok(TextChunks::new(&item[..len]))
    }

    fn enter_container(&self, major: MajorType) -> Result<Decoder<'a>, Error> {
        let item = self.item()?;
        let initial = *item.first().ok_or(Error::End)?;
        if MajorType::of(initial) != major {
            return Err(Error::InvalidType);
        }

        let (scope, remaining, header) = if initial & 0x1F == INDEFINITE {
            (Scope::Indefinite, usize::MAX, 1)
        } else {
            let (count, header) = read_header(item, SIZE_WIDTH, major)?;
            let count = usize::try_from(count).map_err(|_| Error::Overflow)?;
            (Scope::Definite, count, header)
        };

        Ok(Decoder {
            data: self.data,
            offset: self.offset + header,
            scope,
            remaining,
            config: self.config,
        })
    }

    pub fn enter_array(&mut self) -> Result<Container<'_, 'a>, Error> {
        let inner = self.enter_container(MajorType::Array)?;
        Ok(Container {
            parent: self,
            inner,
        })
    }

    pub fn enter_map(&mut self) -> Result<Container<'_, 'a>, Error> {
        let mut inner = self.enter_container(MajorType::Map)?;
        if inner.scope == Scope::Definite {
            let entries = inner.remaining;
            inner.remaining = entries.checked_mul(2).ok_or_else(|| {
                tracing::trace!("Map of {entries} entries overflows the item count");
                Error::Overflow
            })?;
        }
        Ok(Container {
            parent: self,
            inner,
        })
    }

    /// Takes back the cursor from a finished child.
    ///
    /// Only a definite parent counts the child as one of its items;
    /// an indefinite parent relies on its break byte alone.
    fn leave_container(&mut self, child: Decoder<'a>) {
        self.offset = child.offset;
        if self.scope == Scope::Definite {
            self.remaining -= 1;
        }
    }

    /// Enters an array, hands it to `f`, then leaves it whatever `f` returns.
    pub fn parse_array<T, F, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, E>,
        E: From<Error>,
    {
        let mut array = self.enter_array()?;
        let r = f(&mut *array);
        array.leave();
        r
    }

    /// Enters a map, hands it to `f`, then leaves it whatever `f` returns.
    ///
    /// Keys and values are read alternately from the child.
    pub fn parse_map<T, F, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, E>,
        E: From<Error>,
    {
        let mut map = self.enter_map()?;
        let r = f(&mut *map);
        map.leave();
        r
    }
}

/// A nested array or map being decoded.
///
/// Holds its parent exclusively until [`leave`](Self::leave) hands the
/// advanced cursor back. Dropping it without leaving abandons the child's
/// progress and leaves the parent on the container's header.
#[derive(Debug)]
pub struct Container<'p, 'a> {
    parent: &'p mut Decoder<'a>,
    inner: Decoder<'a>,
}

impl Container<'_, '_> {
    pub fn leave(self) {
        self.parent.leave_container(self.inner)
    }
}

impl<'a> Deref for Container<'_, 'a> {
    type Target = Decoder<'a>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Container<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
