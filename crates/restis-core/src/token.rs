//! REST token minting.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::TokenError;

/// Random bytes drawn per token.
pub const TOKEN_BYTES: usize = 48;

/// Length of an encoded token. 48 bytes encode to 64 base64 characters with
/// no padding.
pub const TOKEN_LEN: usize = TOKEN_BYTES / 3 * 4;

/// Generate an opaque token from the operating system's CSPRNG.
///
/// Tokens use the URL-safe base64 alphabet. No uniqueness check is made
/// against previously issued tokens; 384 random bits make a collision
/// negligible.
pub fn generate_token() -> Result<String, TokenError> {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(URL_SAFE.encode(buf))
}
