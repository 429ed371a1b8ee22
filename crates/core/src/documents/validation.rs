//! Input validation for the document proxies
//!
//! Both proxies forward a caller-supplied name to the upstream, so the name
//! is checked here before any request is built.

use once_cell::sync::Lazy;
use regex::Regex;
use veriprint_domain::constants::MAX_DOCUMENT_PATH_LENGTH;
use veriprint_domain::{Result, VeriprintError};

static CATALOGUE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._/ -]+$").expect("CATALOGUE_CHARS should compile - this is a bug")
});

static HERO_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}\.html$")
        .expect("HERO_FILE should compile - this is a bug")
});

/// A catalogue path that is safe to append to the documents base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CataloguePath(String);

impl CataloguePath {
    /// Validate a relative PDF path.
    ///
    /// # Errors
    ///
    /// Returns [`VeriprintError::InvalidInput`] for empty, overlong, absolute
    /// or traversing paths, disallowed characters, or a non-PDF extension.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid =
            |reason: &str| VeriprintError::InvalidInput(format!("catalogue path {reason}"));

        if raw.is_empty() {
            return Err(invalid("is empty"));
        }
        if raw.len() > MAX_DOCUMENT_PATH_LENGTH {
            return Err(invalid("is too long"));
        }
        if raw.starts_with('/') || raw.contains('\\') {
            return Err(invalid("must be relative"));
        }
        if raw.split('/').any(|segment| segment == ".." || segment == "." || segment.is_empty()) {
            return Err(invalid("contains an invalid segment"));
        }
        if !CATALOGUE_CHARS.is_match(raw) {
            return Err(invalid("contains disallowed characters"));
        }
        if !raw.to_ascii_lowercase().ends_with(".pdf") {
            return Err(invalid("must point to a .pdf file"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as the download filename.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// A hero fragment filename matching the allow-listed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFileName(String);

impl HeroFileName {
    /// # Errors
    ///
    /// Returns [`VeriprintError::InvalidInput`] if the name does not match
    /// `name.html` with a short alphanumeric/dash/underscore stem.
    pub fn parse(raw: &str) -> Result<Self> {
        if HERO_FILE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(VeriprintError::InvalidInput(format!("hero file name not allowed: {raw:?}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
