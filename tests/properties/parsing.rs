use alloy::primitives::Address;
use proptest::{prelude::*, test_runner::Config};

use token_indexer_sdk::utils::{parse_evm_address, parse_string_to_bytes_size};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_address_parses_in_any_case(bytes in any::<[u8; 20]>(), upper in any::<bool>()) {
		let address = Address::from(bytes);
		let hex = alloy::hex::encode(bytes);
		let input = if upper {
			format!("0x{}", hex.to_uppercase())
		} else {
			format!("  0x{}  ", hex)
		};

		prop_assert_eq!(parse_evm_address(&input), Ok(address));
	}

	#[test]
	fn prop_address_without_prefix_is_rejected(bytes in any::<[u8; 20]>()) {
		prop_assert!(parse_evm_address(&alloy::hex::encode(bytes)).is_err());
	}

	#[test]
	fn prop_size_units_scale(value in 0u64..1_000_000) {
		prop_assert_eq!(parse_string_to_bytes_size(&format!("{}B", value)), Ok(value));
		prop_assert_eq!(parse_string_to_bytes_size(&format!("{}KiB", value)), Ok(value * 1024));
		prop_assert_eq!(parse_string_to_bytes_size(&format!("{}MB", value)), Ok(value * 1_000_000));
	}
}
