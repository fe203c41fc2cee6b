// src/util.rs
use ethers_core::types::{Address, U256};
use ethers_core::utils::WEI_IN_ETHER;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Lowercase 0x-prefixed hex of an address.
pub fn addr_to_0x(addr: &Address) -> String {
    format!("{:#x}", addr)
}

/// `0x1234...abcd`
pub fn short_address(addr: &Address) -> String {
    shorten_hex(&addr_to_0x(addr))
}

/// First six and last four characters of an ASCII hex string, case kept.
pub fn shorten_hex(hex: &str) -> String {
    if hex.len() <= 10 || !hex.is_ascii() {
        return hex.to_string();
    }
    format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

/// Whole US dollars with thousands separators, rounded half-up: `$5,000,000`.
pub fn format_usd(value_wei: U256) -> String {
    let half = WEI_IN_ETHER / 2;
    let dollars = value_wei.saturating_add(half) / WEI_IN_ETHER;
    format!("${}", group_thousands(&dollars.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// RFC 3339 UTC, or the raw number if out of range.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok())
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| secs.to_string())
}
