use super::config::SIZE_WIDTH;
use super::error::Error;
use super::header::*;

/// Splits a definite-length string at the start of `data` into its payload
/// and the total number of bytes it occupies.
pub(crate) fn definite_string(data: &[u8], major: MajorType) -> Result<(&[u8], usize), Error> {
    let (len, header) = read_header(data, SIZE_WIDTH, major)?;
    let len = usize::try_from(len).map_err(|_| Error::Overflow)?;
    if data.len() - header < len {
        tracing::trace!("String of {len} bytes overruns the buffer");
        return Err(Error::End);
    }
    Ok((&data[header..header + len], header + len))
}

/// Measures a complete string item, definite or indefinite, optionally
/// checking that every chunk is valid UTF-8.
pub(crate) fn string_len(data: &[u8], major: MajorType, utf8: bool) -> Result<usize, Error> {
    let initial = *data.first().ok_or(Error::End)?;
    if MajorType::of(initial) != major {
        return Err(Error::InvalidType);
    }

    if initial & 0x1F != INDEFINITE {
        let (payload, len) = definite_string(data, major)?;
        if utf8 {
            core::str::from_utf8(payload)?;
        }
        return Ok(len);
    }

    let mut offset = 1;
    loop {
        match data.get(offset) {
            None => return Err(Error::End),
            Some(&BREAK) => return Ok(offset + 1),
            // Chunks must themselves be definite
            Some(b) if b & 0x1F == INDEFINITE => return Err(Error::InvalidType),
            Some(_) => {}
        }
        let (payload, len) = definite_string(&data[offset..], major)?;
        if utf8 {
            core::str::from_utf8(payload)?;
        }
        offset += len;
    }
}

/// Chunks of a byte string that has already been validated.
///
/// A definite-length string yields exactly one chunk.
#[derive(Debug, Clone)]
pub struct ByteChunks<'a> {
    data: &'a [u8],
    offset: usize,
    major: MajorType,
    indefinite: bool,
}

impl<'a> ByteChunks<'a> {
    /// `item` must be exactly one string item that passed [`string_len`].
    pub(crate) fn new(item: &'a [u8], major: MajorType) -> Self {
        let indefinite = item.first().is_some_and(|b| b & 0x1F == INDEFINITE);
        Self {
            data: if indefinite { &item[1..] } else { item },
            offset: 0,
            major,
            indefinite,
        }
    }

    pub fn is_indefinite(&self) -> bool {
        self.indefinite
    }
}

impl<'a> Iterator for ByteChunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.data.get(self.offset..)?;
        if rest.first().is_none_or(|&b| b == BREAK) {
            return None;
        }
        let (chunk, len) = definite_string(rest, self.major).ok()?;
        self.offset += len;
        Some(chunk)
    }
}

/// Chunks of a text string that has already been validated as UTF-8.
#[derive(Debug, Clone)]
pub struct TextChunks<'a>(ByteChunks<'a>);

impl<'a> TextChunks<'a> {
    pub(crate) fn new(item: &'a [u8]) -> Self {
        Self(ByteChunks::new(item, MajorType::TextString))
    }

    pub fn is_indefinite(&self) -> bool {
        self.0.is_indefinite()
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().and_then(|c| core::str::from_utf8(c).ok())
    }
}
