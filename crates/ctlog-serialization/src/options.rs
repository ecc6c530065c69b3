//! Decoding options

/// Options for the slice-based decode entry points
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Accept bytes left over after a complete structure
    pub allow_trailing_data: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailing_data_allowed(mut self) -> Self {
        self.allow_trailing_data = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_options_default() {
        let opts = DecodeOptions::default();
        assert!(!opts.allow_trailing_data);
    }

    #[test]
    fn test_decode_options_builder() {
        let opts = DecodeOptions::new().with_trailing_data_allowed();
        assert!(opts.allow_trailing_data);
    }
}
