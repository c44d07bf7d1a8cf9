// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::ADDRESS_HEX_LEN;
use crate::domain::error::AppError;
use alloy::primitives::Address;
use std::str::FromStr;

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parses a `0x`-prefixed 20-byte address.
///
/// All-lowercase and all-uppercase digits are taken as-is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn parse_checked_address(raw: &str) -> Result<Address, AppError> {
    let trimmed = raw.trim();
    let digits = strip_0x(trimmed);
    if digits.len() == trimmed.len() {
        return Err(AppError::InvalidAddress(trimmed.to_string()));
    }
    if digits.len() != ADDRESS_HEX_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::InvalidAddress(trimmed.to_string()));
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = format!("0x{digits}");
        return Address::parse_checksummed(&checksummed, None)
            .map_err(|_| AppError::InvalidAddress(trimmed.to_string()));
    }

    Address::from_str(digits).map_err(|_| AppError::InvalidAddress(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    #[test]
    fn strip_0x_handles_both_prefix_cases() {
        assert_eq!(strip_0x("0Xabcd"), "abcd");
        assert_eq!(strip_0x("0xabcd"), "abcd");
        assert_eq!(strip_0x("abcd"), "abcd");
    }

    #[test]
    fn accepts_checksummed_and_single_case_addresses() {
        let checksummed = parse_checked_address(WETH).unwrap();
        let lower = parse_checked_address(&WETH.to_lowercase()).unwrap();
        let upper = parse_checked_address(&format!("0x{}", WETH[2..].to_uppercase())).unwrap();
        assert_eq!(checksummed, lower);
        assert_eq!(checksummed, upper);
        assert_eq!(checksummed.to_checksum(None), WETH);
    }

    #[test]
    fn default_contract_address_is_checksummed() {
        use crate::domain::constants::DEFAULT_CONTRACT_ADDRESS;
        let addr = parse_checked_address(DEFAULT_CONTRACT_ADDRESS).unwrap();
        assert_eq!(addr.to_checksum(None), DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn rejects_bad_checksum() {
        let bad = "0xc02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
        assert!(matches!(
            parse_checked_address(bad),
            Err(AppError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_wrong_length_or_prefix() {
        for raw in [
            "0x1234",
            "C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2ff",
            "0xg02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "",
        ] {
            let err = parse_checked_address(raw).unwrap_err();
            assert!(err.is_validation(), "{raw} should be rejected");
        }
    }
}
