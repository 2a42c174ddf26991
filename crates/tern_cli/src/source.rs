use std::path::{Path, PathBuf};

use tern_ast::LanguageVariant;

use crate::error::CliError;

/// A source file read from disk and checked to be parseable text.
#[derive(Debug)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

impl SourceText {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let bytes = std::fs::read(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, bytes)
    }

    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, CliError> {
        if u32::try_from(bytes.len()).is_err() {
            return Err(CliError::TooLarge {
                path: path.to_path_buf(),
                len: bytes.len(),
            });
        }
        if simdutf8::basic::from_utf8(&bytes).is_err() {
            return Err(CliError::InvalidUtf8 {
                path: path.to_path_buf(),
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| CliError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// JSX for `.tsx` and `.jsx` files.
    pub fn inferred_variant(&self) -> LanguageVariant {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx" | "jsx") => LanguageVariant::Jsx,
            _ => LanguageVariant::Standard,
        }
    }

    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_extension() {
        let source = |name: &str| SourceText::from_bytes(Path::new(name), b"x".to_vec()).unwrap();
        assert_eq!(source("a.tsx").inferred_variant(), LanguageVariant::Jsx);
        assert_eq!(source("a.jsx").inferred_variant(), LanguageVariant::Jsx);
        assert_eq!(source("a.ts").inferred_variant(), LanguageVariant::Standard);
        assert_eq!(source("noext").inferred_variant(), LanguageVariant::Standard);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = SourceText::from_bytes(Path::new("bad.ts"), vec![b'a', 0xFF, b'b']);
        assert!(matches!(result, Err(CliError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = SourceText::load(Path::new("/nonexistent/tern/input.ts"));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
