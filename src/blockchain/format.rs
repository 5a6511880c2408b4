//! Display formatting for explorer data.
//!
//! Everything here is pure: amounts are handled as exact 256-bit integers and
//! rendered as decimal strings, so nothing is lost to floating point.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, SecondsFormat};
use ethers_core::abi::{decode, ParamType, Token};
use ethers_core::types::U256;
use serde::Serialize;
use serde_json::{json, Value};

pub const NATIVE_SYMBOL: &str = "ETH";
pub const NATIVE_DECIMALS: u32 = 18;
pub const GWEI_DECIMALS: u32 = 9;
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;
/// Largest exponent for which `10^n` fits in a `U256`.
pub const MAX_DECIMALS: u32 = 77;
pub const MAX_DISPLAY_DECIMALS: u32 = 6;
pub const DEFAULT_TOKEN_NAME: &str = "Unknown Token";
pub const DEFAULT_TOKEN_SYMBOL: &str = "UNKNOWN";
/// What the explorer returns for empty calldata results and code-less accounts.
pub const EMPTY_HEX: &str = "0x";

/// A native-currency amount in every shape the tools report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAmount {
    pub wei: String,
    /// Rounded to 6 decimal places.
    pub eth: String,
    pub eth_full_precision: String,
    /// Full precision with the unit suffix, e.g. `1.5 ETH`.
    pub formatted: String,
}

/// A token amount scaled by the token's own decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub raw: String,
    /// Rounded to `min(decimals, 6)` places.
    pub formatted: String,
    pub full_precision: String,
}

/// Result of classifying an address by its deployed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressType {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub has_code: bool,
    /// Bytes of deployed code.
    pub code_size: usize,
}

fn pow10(exp: u32) -> U256 {
    U256::exp10(exp as usize)
}

fn check_decimals(decimals: u32) -> Result<()> {
    if decimals > MAX_DECIMALS {
        bail!("unsupported decimals {}", decimals);
    }
    Ok(())
}

/// Parse a decimal-string integer such as an explorer `balance` field.
pub fn parse_amount(raw: &str) -> Result<U256> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid amount '{}'", raw);
    }
    U256::from_dec_str(digits).map_err(|_| anyhow!("amount out of range '{}'", raw))
}

/// Parse a `0x`-prefixed (or bare) hex quantity.
pub fn parse_hex_u256(raw: &str) -> Result<U256> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() {
        bail!("invalid hex quantity '{}'", raw);
    }
    U256::from_str_radix(digits, 16).map_err(|_| anyhow!("invalid hex quantity '{}'", raw))
}

/// Hex quantity that must fit in 64 bits: block numbers, gas, indices.
pub fn parse_hex_u64(raw: &str) -> Result<u64> {
    let value = parse_hex_u256(raw)?;
    if value.bits() > 64 {
        bail!("hex quantity too large '{}'", raw);
    }
    Ok(value.as_u64())
}

/// Decimal integer field such as an explorer `blockNumber`.
pub fn parse_u64(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid integer '{}'", raw))
}

/// Parse a decimal string like `"0.01"` into integer units of `10^-decimals`.
/// Fraction digits beyond `decimals` are truncated.
pub fn parse_units(raw: &str, decimals: u32) -> Result<U256> {
    check_decimals(decimals)?;
    let trimmed = raw.trim();
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        bail!("invalid decimal '{}'", raw);
    }

    let whole = if int_part.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(int_part).map_err(|_| anyhow!("decimal out of range '{}'", raw))?
    };
    let frac_digits: String = frac_part
        .chars()
        .chain(std::iter::repeat('0'))
        .take(decimals as usize)
        .collect();
    let frac = if frac_digits.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(&frac_digits).map_err(|_| anyhow!("decimal out of range '{}'", raw))?
    };

    whole
        .checked_mul(pow10(decimals))
        .and_then(|scaled| scaled.checked_add(frac))
        .ok_or_else(|| anyhow!("decimal out of range '{}'", raw))
}

/// Insert a decimal point `places` digits from the right, left-padding with zeros.
fn place_point(units: U256, places: u32) -> (String, String) {
    let digits = units.to_string();
    let places = places as usize;
    let padded = if digits.len() <= places {
        format!("{}{}", "0".repeat(places + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - places);
    (int_part.to_string(), frac_part.to_string())
}

/// Exact `value / 10^decimals` with trailing fractional zeros removed.
pub fn to_decimal_string(value: U256, decimals: u32) -> Result<String> {
    check_decimals(decimals)?;
    let (int_part, frac_part) = place_point(value, decimals);
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        Ok(int_part)
    } else {
        Ok(format!("{}.{}", int_part, frac))
    }
}

/// `value / 10^decimals` rounded half-up to exactly `places` fractional digits.
pub fn to_fixed(value: U256, decimals: u32, places: u32) -> Result<String> {
    check_decimals(decimals)?;

    let kept = places.min(decimals);
    let divisor = pow10(decimals - kept);
    let (quotient, remainder) = value.div_mod(divisor);
    let rounded = if !remainder.is_zero() && remainder >= divisor - remainder {
        quotient + U256::one()
    } else {
        quotient
    };

    let (int_part, mut frac_part) = place_point(rounded, kept);
    frac_part.push_str(&"0".repeat((places - kept) as usize));
    if frac_part.is_empty() {
        Ok(int_part)
    } else {
        Ok(format!("{}.{}", int_part, frac_part))
    }
}

/// Format a wei amount given as a decimal string.
pub fn native_amount(wei: &str) -> Result<NativeAmount> {
    let value = parse_amount(wei)?;
    native_amount_from(value, wei.trim().to_string())
}

/// Format a wei amount given as a hex quantity (proxy responses).
pub fn native_amount_from_hex(wei_hex: &str) -> Result<NativeAmount> {
    let value = parse_hex_u256(wei_hex)?;
    native_amount_from(value, value.to_string())
}

fn native_amount_from(value: U256, wei: String) -> Result<NativeAmount> {
    let full = to_decimal_string(value, NATIVE_DECIMALS)?;
    Ok(NativeAmount {
        wei,
        eth: to_fixed(value, NATIVE_DECIMALS, MAX_DISPLAY_DECIMALS)?,
        formatted: format!("{} {}", full, NATIVE_SYMBOL),
        eth_full_precision: full,
    })
}

/// Format a raw token amount using the token's decimals.
pub fn token_amount(raw: &str, decimals: u32) -> Result<TokenAmount> {
    let value = parse_amount(raw)?;
    Ok(TokenAmount {
        raw: raw.trim().to_string(),
        formatted: to_fixed(value, decimals, decimals.min(MAX_DISPLAY_DECIMALS))?,
        full_precision: to_decimal_string(value, decimals)?,
    })
}

/// Wei → gwei with two decimal places.
pub fn gwei_string(wei: U256) -> Result<String> {
    to_fixed(wei, GWEI_DECIMALS, 2)
}

/// JSON number when it fits in 64 bits, decimal string otherwise.
pub fn u256_json(value: U256) -> Value {
    if value.bits() <= 64 {
        json!(value.as_u64())
    } else {
        json!(value.to_string())
    }
}

/// Decode the hex result of a `string`-returning contract call.
///
/// Accepts the standard ABI dynamic encoding and, failing that, a 32-byte
/// `bytes32` return as used by some older tokens. NUL bytes are stripped.
/// `None` for empty results, malformed hex, or text that ends up empty.
pub fn decode_abi_string(result: Option<&str>) -> Option<String> {
    let trimmed = result?.trim();
    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if body.is_empty() {
        return None;
    }
    let bytes = hex::decode(body).ok()?;

    let text = match decode(&[ParamType::String], &bytes) {
        Ok(tokens) => match tokens.into_iter().next() {
            Some(Token::String(s)) => s,
            _ => return None,
        },
        Err(_) if bytes.len() == 32 => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => return None,
    };

    let text = text.replace('\0', "");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn token_name(result: Option<&str>) -> String {
    decode_abi_string(result).unwrap_or_else(|| DEFAULT_TOKEN_NAME.to_string())
}

pub fn token_symbol(result: Option<&str>) -> String {
    decode_abi_string(result).unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.to_string())
}

/// Decode a `decimals()` call result; anything unusable means 18.
pub fn decode_decimals(result: Option<&str>) -> u32 {
    result
        .filter(|r| !r.is_empty() && *r != EMPTY_HEX)
        .and_then(|r| parse_hex_u256(r).ok())
        .filter(|d| *d <= U256::from(MAX_DECIMALS))
        .map(|d| d.as_u32())
        .unwrap_or(DEFAULT_TOKEN_DECIMALS)
}

/// Unix seconds (as the explorer sends them) to an ISO-8601 UTC instant.
pub fn unix_to_iso(raw: &str) -> Result<String> {
    let seconds: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid timestamp '{}'", raw))?;
    let instant = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow!("timestamp out of range '{}'", raw))?;
    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Classify an address from its `eth_getCode` result.
pub fn classify_code(code: Option<&str>) -> AddressType {
    match code.filter(|c| *c != EMPTY_HEX && c.len() > EMPTY_HEX.len()) {
        Some(code) => AddressType {
            kind: "contract",
            description: "Smart Contract",
            has_code: true,
            code_size: (code.len() - EMPTY_HEX.len()) / 2,
        },
        None => AddressType {
            kind: "eoa",
            description: "Externally Owned Account",
            has_code: false,
            code_size: 0,
        },
    }
}

/// `^0x[a-fA-F0-9]{40}$`. No checksum validation.
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|digits| digits.len() == 40 && hex::decode(digits).is_ok())
}
