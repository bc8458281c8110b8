//! Input validation helpers for API-facing lookups.

/// Expected length of a 0x-prefixed wallet address string.
const ADDRESS_LENGTH: usize = 42;

/// Validate a wallet address query parameter.
///
/// Accepts a 42-character 0x-prefixed hex string in any casing and returns
/// the lowercase normalized form used as a profile key. Returns None for
/// anything else (wrong length, missing prefix, non-hex characters).
pub fn validate_wallet_address(input: &str) -> Option<String> {
    if input.len() != ADDRESS_LENGTH {
        return None;
    }
    let hex_part = input.strip_prefix("0x")?;
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(input.to_lowercase())
}
