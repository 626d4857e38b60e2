//! Parsers for command-line arguments.

use alloy::primitives::Address;
use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size such as "1GB", "500MB" or "1024KiB" into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	match Byte::from_str(s) {
		Ok(byte) => Ok(byte.as_u64()),
		Err(e) => Err(format!("Invalid size format: '{}'. Error: {}", s, e)),
	}
}

/// Parses a `0x`-prefixed, 20-byte EVM address.
pub fn parse_evm_address(s: &str) -> Result<Address, String> {
	let trimmed = s.trim();
	if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
		return Err(format!("Invalid address '{}': missing 0x prefix", s));
	}
	Address::from_str(trimmed).map_err(|e| format!("Invalid address '{}': {}", s, e))
}
