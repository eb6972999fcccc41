use hardy_cbor_lite::decode::*;

#[cfg(test)]
mod corpus;

/// Skips every top-level item, checking the cursor only ever moves forward.
pub fn skip_all(data: &[u8]) -> Result<usize, Error> {
    let mut decoder = Decoder::new(data);
    while !decoder.at_end() {
        let before = decoder.offset();
        decoder.skip()?;
        assert!(decoder.offset() > before);
    }
    assert_eq!(decoder.offset(), data.len());
    Ok(decoder.offset())
}

/// Decodes every top-level item with the typed accessors, then checks that
/// `skip` agrees wherever the accessors succeeded.
pub fn walk_all(data: &[u8]) {
    let mut decoder = Decoder::new(data);
    while !decoder.at_end() {
        let start = decoder.clone();
        let depth = decoder.config().max_recursion;
        if walk(&mut decoder, depth).is_err() {
            break;
        }

        let mut skipped = start;
        assert_eq!(skipped.skip(), Ok(()));
        assert_eq!(skipped.offset(), decoder.offset());
    }
    assert!(decoder.offset() <= data.len());
}

fn walk(decoder: &mut Decoder<'_>, depth: u8) -> Result<(), Error> {
    if depth == 0 {
        return Err(Error::Recursion);
    }
    match decoder.get_type()? {
        MajorType::UnsignedInteger => decoder.get_uint64().map(drop),
        MajorType::NegativeInteger => match decoder.get_int64() {
            Err(Error::Overflow) => decoder.skip_simple(),
            r => r.map(drop),
        },
        MajorType::ByteString => decoder.get_bstr_chunks().map(|c| c.for_each(drop)),
        MajorType::TextString => decoder.get_tstr_chunks().map(|c| c.for_each(drop)),
        MajorType::Array => decoder.parse_array(|a| {
            while !a.at_end() {
                walk(a, depth - 1)?;
            }
            Ok(())
        }),
        MajorType::Map => decoder.parse_map(|m| {
            while !m.at_end() {
                walk(m, depth - 1)?;
            }
            Ok(())
        }),
        MajorType::Tag => decoder.skip_limited(depth),
        MajorType::Simple => decoder
            .get_bool()
            .map(drop)
            .or_else(|_| decoder.get_null())
            .or_else(|_| decoder.get_undefined())
            .or_else(|_| decoder.skip_simple()),
    }
}
