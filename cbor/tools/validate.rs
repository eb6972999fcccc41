/*!
Validate command - check a CBOR sequence is well-formed
*/

use super::io::Input;
use clap::Parser;
use hardy_cbor_lite::{config::Config, decode::Decoder};

#[derive(Parser, Debug)]
#[command(about = "Check that every item of a CBOR sequence is well-formed", long_about = None)]
pub struct Command {
    /// Treat the input as hex text rather than binary
    #[arg(long)]
    hex: bool,

    /// Deepest nesting of arrays, maps and tags to accept
    #[arg(long, value_name = "N", default_value_t = hardy_cbor_lite::config::RECURSION_MAX)]
    max_recursion: u8,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_cbor(self.hex)?;
        let config = Config::new().with_max_recursion(self.max_recursion);

        let count = count_items(&data, config)?;
        println!("{count} item(s), {} byte(s)", data.len());
        Ok(())
    }
}

/// Skips every top-level item, failing with the offset of the first bad one.
pub fn count_items(data: &[u8], config: Config) -> anyhow::Result<usize> {
    let mut decoder = Decoder::with_config(data, config);
    let mut count = 0;
    while !decoder.at_end() {
        let start = decoder.offset();
        decoder
            .skip()
            .map_err(|e| anyhow::anyhow!("Invalid CBOR item {count} at offset {start}: {e}"))?;
        tracing::debug!("Item {count}: {} byte(s) at offset {start}", decoder.offset() - start);
        count += 1;
    }
    Ok(count)
}
