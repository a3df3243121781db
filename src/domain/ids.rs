//! Domain identifier types with validation
//!
//! Newtype wrappers keep host sheet ids, temp tokens and batch ids from
//! being mixed up with each other or with user-facing sheet numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reserved prefix carried by every temp token.
///
/// Sheet numbers and names are user-entered; the prefix keeps a temp token
/// from being mistaken for one of them during reconciliation.
pub const TEMP_TOKEN_PREFIX: &str = "SBTMP_";

/// Number of random characters following [`TEMP_TOKEN_PREFIX`]
pub const TEMP_TOKEN_BODY_LEN: usize = 8;

/// Host-assigned sheet identifier
///
/// Stable for the lifetime of a batch. The value is opaque to the core and
/// is only handed back to the host exporter.
///
/// # Examples
///
/// ```
/// use sheetbatch::domain::ids::SheetId;
/// use std::str::FromStr;
///
/// let id = SheetId::from_str("312047").unwrap();
/// assert_eq!(id.as_str(), "312047");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SheetId(String);

impl SheetId {
    /// Creates a new SheetId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(SheetId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Sheet ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the sheet ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SheetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SheetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Throwaway export-time alias for a sheet
///
/// Format: `SBTMP_` followed by 8 uppercase Crockford base32 characters.
/// Issued by the temp token allocator; parsing exists so that leftovers in
/// an output folder can be recognised.
///
/// # Examples
///
/// ```
/// use sheetbatch::domain::ids::TempToken;
///
/// let token = TempToken::new("SBTMP_7K2M9QX4").unwrap();
/// assert_eq!(token.body(), "7K2M9QX4");
/// assert!(TempToken::new("A101").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TempToken(String);

impl TempToken {
    /// Creates a TempToken, checking prefix and body shape
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        let body = token.strip_prefix(TEMP_TOKEN_PREFIX).ok_or_else(|| {
            format!("Temp token must start with '{TEMP_TOKEN_PREFIX}', got: {token}")
        })?;

        if body.len() != TEMP_TOKEN_BODY_LEN || !body.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(format!(
                "Temp token body must be {TEMP_TOKEN_BODY_LEN} alphanumeric characters, got: {token}"
            ));
        }

        Ok(Self(token))
    }

    /// Builds a token from a body already drawn from the token alphabet
    pub(crate) fn from_body(body: &str) -> Self {
        Self(format!("{TEMP_TOKEN_PREFIX}{body}"))
    }

    /// Returns the full token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the random part of the token
    pub fn body(&self) -> &str {
        &self.0[TEMP_TOKEN_PREFIX.len()..]
    }

    /// Whether a file name carries any temp token prefix
    pub fn is_temp_name(file_name: &str) -> bool {
        file_name.contains(TEMP_TOKEN_PREFIX)
    }
}

impl fmt::Display for TempToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TempToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TempToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of one orchestrator run, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Generates a fresh random batch id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
