use thiserror::Error;

const HEX_PREFIX: &str = "0x";

/// Widest digit run (after leading zeros) that can still fit in an `i64`.
const MAX_SIGNIFICANT_DIGITS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexHeightError {
    #[error("failed to parse hex string: {0:?}")]
    MalformedHex(String),
    #[error("hex value too large for int64: {0}")]
    Overflow(String),
}

/// Parses a node-supplied quantity such as `"0x1b4"` into a block height.
///
/// Only a lowercase `0x` prefix is stripped. The digits may be arbitrarily wide as long
/// as the value fits in an `i64`; anything larger is reported as [`HexHeightError::Overflow`]
/// rather than truncated.
pub fn parse_block_height(raw: &str) -> Result<i64, HexHeightError> {
    let digits = raw.strip_prefix(HEX_PREFIX).unwrap_or(raw);

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(HexHeightError::MalformedHex(digits.to_owned()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    if significant.len() > MAX_SIGNIFICANT_DIGITS {
        return Err(HexHeightError::Overflow(digits.to_owned()));
    }

    let value = u64::from_str_radix(significant, 16)
        .map_err(|_| HexHeightError::MalformedHex(digits.to_owned()))?;
    i64::try_from(value).map_err(|_| HexHeightError::Overflow(digits.to_owned()))
}
