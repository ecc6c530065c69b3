//! Reading record bytes from files

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::error::Error;
use std::fs;
use std::path::Path;

/// How the bytes of an input file are encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    Binary,
    Hex,
    Base64,
}

impl InputFormat {
    /// Map a command-line flag to a format, if it names one
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--binary" => Some(InputFormat::Binary),
            "--hex" => Some(InputFormat::Hex),
            "--base64" => Some(InputFormat::Base64),
            _ => None,
        }
    }

    /// Decode file contents into raw record bytes
    ///
    /// Text encodings ignore surrounding whitespace, so files ending in a
    /// newline decode as expected.
    pub fn decode(self, contents: Vec<u8>) -> Result<Vec<u8>, Box<dyn Error>> {
        match self {
            InputFormat::Binary => Ok(contents),
            InputFormat::Hex => {
                let text = std::str::from_utf8(&contents)?;
                Ok(hex::decode(text.trim())?)
            }
            InputFormat::Base64 => {
                let text = std::str::from_utf8(&contents)?;
                Ok(STANDARD.decode(text.trim())?)
            }
        }
    }
}

/// Read a file and decode it according to `format`
pub fn read_input(path: impl AsRef<Path>, format: InputFormat) -> Result<Vec<u8>, Box<dyn Error>> {
    let path = path.as_ref();
    let contents = fs::read(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    tracing::debug!("read {} bytes from {}", contents.len(), path.display());
    format.decode(contents)
}
