use super::chunks::string_len;
use super::decode::*;
use super::header::read_header;

impl Decoder<'_> {
    /// Consumes the next item, however deeply nested, without decoding it.
    ///
    /// Nesting is limited by [`Config::max_recursion`](crate::config::Config).
    pub fn skip(&mut self) -> Result<(), Error> {
        self.skip_limited(self.config().max_recursion)
    }

    /// As [`skip`](Self::skip), with an explicit nesting budget.
    ///
    /// A budget of zero fails before anything is read. Containers are left
    /// even when one of their items fails, so on error the cursor reflects
    /// however far the walk got.
    pub fn skip_limited(&mut self, limit: u8) -> Result<(), Error> {
        if limit == 0 {
            tracing::trace!("Recursion limit reached at offset {}", self.offset());
            return Err(Error::Recursion);
        }

        match self.get_type()? {
            major @ (MajorType::ByteString | MajorType::TextString) => {
                let len = string_len(self.item()?, major, false)?;
                self.advance(len);
                Ok(())
            }
            major @ (MajorType::Array | MajorType::Map) => {
                let mut container = if major == MajorType::Map {
                    self.enter_map()?
                } else {
                    self.enter_array()?
                };
                let mut r = Ok(());
                while !container.at_end() {
                    r = container.skip_limited(limit - 1);
                    if r.is_err() {
                        break;
                    }
                }
                container.leave();
                r
            }
            MajorType::Tag => self.skip_tagged(limit),
            _ => self.skip_simple(),
        }
    }

    /// A tag and the item it wraps count as a single item of the scope.
    fn skip_tagged(&mut self, limit: u8) -> Result<(), Error> {
        let (_, header) = read_header(self.item()?, Width::U64, MajorType::Tag)?;
        let saved = self.clone();
        self.advance_header(header);
        let r = self.skip_limited(limit - 1);
        if r.is_err() {
            *self = saved;
        }
        r
    }

    /// Consumes a single header and its argument, discarding the value.
    ///
    /// Only meaningful for items without payload: integers, tags (without
    /// the tagged item), and simple values including floats.
    pub fn skip_simple(&mut self) -> Result<(), Error> {
        let major = self.get_type()?;
        let (_, len) = read_header(self.item()?, Width::U64, major)?;
        self.advance(len);
        Ok(())
    }
}
