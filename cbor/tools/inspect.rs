/*!
Inspect command - display CBOR data in diagnostic notation

Items the decoder does not interpret (tags, floats and unassigned simple
values) are skipped whole and shown as `<h'...'>` with their raw encoding.
*/

use super::io::{Input, Output};
use clap::Parser;
use hardy_cbor_lite::{
    config::Config,
    decode::{self, Decoder, MajorType},
};
use std::fmt::Write;

#[derive(Parser, Debug)]
#[command(about = "Display CBOR data in diagnostic notation", long_about = None)]
pub struct Command {
    /// Treat the input as hex text rather than binary
    #[arg(long)]
    hex: bool,

    /// Deepest nesting of arrays, maps and tags to accept
    #[arg(long, value_name = "N", default_value_t = hardy_cbor_lite::config::RECURSION_MAX)]
    max_recursion: u8,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_cbor(self.hex)?;
        let config = Config::new().with_max_recursion(self.max_recursion);

        let output_text = format_sequence(&data, config)?;

        let output = self.output.unwrap_or(Output::Stdout);
        output.write_str(&output_text)?;
        Ok(())
    }
}

/// Formats each top-level item on its own line.
pub fn format_sequence(data: &[u8], config: Config) -> anyhow::Result<String> {
    let mut decoder = Decoder::with_config(data, config);
    let mut out = String::new();
    while !decoder.at_end() {
        let start = decoder.offset();
        format_item(&mut decoder, data, &mut out, config.max_recursion)
            .map_err(|e| anyhow::anyhow!("Failed to inspect item at offset {start}: {e}"))?;
        out.push('\n');
    }
    Ok(out)
}

fn format_item(
    decoder: &mut Decoder<'_>,
    data: &[u8],
    out: &mut String,
    depth: u8,
) -> anyhow::Result<()> {
    if depth == 0 {
        return Err(decode::Error::Recursion.into());
    }

    match decoder.get_type()? {
        MajorType::UnsignedInteger => write!(out, "{}", decoder.get_uint64()?)?,
        MajorType::NegativeInteger => match decoder.get_int64() {
            Ok(n) => write!(out, "{n}")?,
            // Magnitudes beyond i64 still have a well-defined encoding
            Err(decode::Error::Overflow) => format_raw(decoder, data, out, |d| d.skip_simple())?,
            Err(e) => return Err(e.into()),
        },
        MajorType::ByteString => {
            let chunks = decoder.get_bstr_chunks()?;
            if chunks.is_indefinite() {
                out.push_str("(_");
                for (i, chunk) in chunks.enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(out, "{sep}h'{}'", hex::encode(chunk))?;
                }
                out.push(')');
            } else {
                let bytes: Vec<u8> = chunks.flatten().copied().collect();
                write!(out, "h'{}'", hex::encode(bytes))?;
            }
        }
        MajorType::TextString => {
            let chunks = decoder.get_tstr_chunks()?;
            if chunks.is_indefinite() {
                out.push_str("(_");
                for (i, chunk) in chunks.enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(out, "{sep}{chunk:?}")?;
                }
                out.push(')');
            } else {
                let text: String = chunks.collect();
                write!(out, "{text:?}")?;
            }
        }
        MajorType::Array => decoder.parse_array(|array| {
            out.push_str(if array.scope().is_indefinite() { "[_ " } else { "[" });
            let mut first = true;
            while !array.at_end() {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                format_item(array, data, out, depth - 1)?;
            }
            out.push(']');
            Ok::<_, anyhow::Error>(())
        })?,
        MajorType::Map => decoder.parse_map(|map| {
            out.push_str(if map.scope().is_indefinite() { "{_ " } else { "{" });
            let mut first = true;
            while !map.at_end() {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                format_item(map, data, out, depth - 1)?;
                out.push_str(": ");
                format_item(map, data, out, depth - 1)?;
            }
            out.push('}');
            Ok::<_, anyhow::Error>(())
        })?,
        MajorType::Tag => format_raw(decoder, data, out, |d| d.skip_limited(depth))?,
        MajorType::Simple => {
            if let Ok(b) = decoder.get_bool() {
                write!(out, "{b}")?;
            } else if decoder.get_null().is_ok() {
                out.push_str("null");
            } else if decoder.get_undefined().is_ok() {
                out.push_str("undefined");
            } else {
                format_raw(decoder, data, out, |d| d.skip_simple())?;
            }
        }
    }
    Ok(())
}

/// Consumes an item with `skip` and shows its raw encoding.
fn format_raw<F>(
    decoder: &mut Decoder<'_>,
    data: &[u8],
    out: &mut String,
    skip: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&mut Decoder<'_>) -> Result<(), decode::Error>,
{
    let start = decoder.offset();
    skip(&mut *decoder)?;
    tracing::debug!("Uninterpreted item at offset {start}");
    write!(out, "<h'{}'>", hex::encode(&data[start..decoder.offset()]))?;
    Ok(())
}
