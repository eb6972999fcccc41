/*!
I/O utilities for reading files or stdin and writing files or stdout
*/

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Input source - either stdin or a file
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Read all bytes from the input source
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                io::stdin().read_to_end(&mut buffer)?;
                Ok(buffer)
            }
            Input::File(path) => fs::read(path),
        }
    }

    /// Read the CBOR bytes, either raw or as hex text
    ///
    /// Whitespace is ignored in hex text, so wrapped dumps can be pasted as-is.
    pub fn read_cbor(&self, is_hex: bool) -> anyhow::Result<Vec<u8>> {
        let data = self.read_all()?;
        if !is_hex {
            return Ok(data);
        }

        let text: Vec<u8> = data
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        hex::decode(text).map_err(|e| anyhow::anyhow!("Invalid hex input: {e}"))
    }
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::File(PathBuf::from(s)))
        }
    }
}

/// Output destination - either stdout or a file
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Write a string to the output destination
    pub fn write_str(&self, data: &str) -> io::Result<()> {
        match self {
            Output::Stdout => io::stdout().write_all(data.as_bytes()),
            Output::File(path) => fs::write(path, data),
        }
    }
}

impl FromStr for Output {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "-" {
            Ok(Output::Stdout)
        } else {
            Ok(Output::File(PathBuf::from(s)))
        }
    }
}
