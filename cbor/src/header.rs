use super::error::Error;

pub(crate) const INDEFINITE: u8 = 31;
pub(crate) const BREAK: u8 = 0xFF;

pub(crate) const FALSE: u8 = (7 << 5) | 20;
pub(crate) const NULL: u8 = (7 << 5) | 22;
pub(crate) const UNDEFINED: u8 = (7 << 5) | 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MajorType {
    UnsignedInteger = 0,
    NegativeInteger = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl MajorType {
    /// Major type of an initial byte.
    pub const fn of(initial: u8) -> Self {
        match initial >> 5 {
            0 => Self::UnsignedInteger,
            1 => Self::NegativeInteger,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }
}

impl From<MajorType> for u8 {
    fn from(value: MajorType) -> Self {
        value as u8
    }
}

/// Number of argument bytes following an initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }
}

/// Parses the header of the item at the start of `data`.
///
/// Returns the argument and the number of header bytes, without looking at
/// any payload that follows. Indefinite-length selectors are rejected here;
/// callers that accept them must check for [`INDEFINITE`] first.
pub(crate) fn read_header(data: &[u8], max: Width, expected: MajorType) -> Result<(u64, usize), Error> {
    let initial = *data.first().ok_or(Error::End)?;
    if MajorType::of(initial) != expected {
        return Err(Error::InvalidType);
    }

    let minor = initial & 0x1F;
    let bytes = match minor {
        0..24 => return Ok((minor as u64, 1)),
        24..=27 => 1usize << (minor - 24),
        _ => return Err(Error::InvalidType),
    };
    if bytes > max.bytes() {
        return Err(Error::Overflow);
    }

    let arg = data.get(1..=bytes).ok_or(Error::End)?;
    let mut be = [0u8; 8];
    be[8 - bytes..].copy_from_slice(arg);
    Ok((u64::from_be_bytes(be), 1 + bytes))
}
