//! Minimal contract-call ABI helpers
//!
//! The two contracts this client talks to expose a handful of functions, so
//! calldata is built by hand: a 4-byte keccak selector followed by 32-byte
//! big-endian words. Return data is decoded the same way, word by word.

use alloy::primitives::{keccak256, Address, U256};

/// 4-byte function selector for a canonical signature string,
/// e.g. `"balanceOf(address)"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Start calldata for a function with the given signature.
pub fn calldata(signature: &str) -> Vec<u8> {
    selector(signature).to_vec()
}

/// Append an address argument, left-padded to a 32-byte word.
pub fn push_address(calldata: &mut Vec<u8>, address: Address) {
    calldata.extend_from_slice(&[0u8; 12]);
    calldata.extend_from_slice(address.as_slice());
}

/// Append a uint argument as a 32-byte big-endian word.
pub fn push_u256(calldata: &mut Vec<u8>, value: U256) {
    calldata.extend_from_slice(&value.to_be_bytes::<32>());
}

/// Decode the `index`-th 32-byte word of return data as a U256.
pub fn word_u256(data: &[u8], index: usize) -> Option<U256> {
    let start = index * 32;
    data.get(start..start + 32).map(U256::from_be_slice)
}

/// Decode the `index`-th word as a bool (any non-zero word is true).
pub fn word_bool(data: &[u8], index: usize) -> Option<bool> {
    word_u256(data, index).map(|w| !w.is_zero())
}

/// Decode the `index`-th word as an address (last 20 bytes of the word).
pub fn word_address(data: &[u8], index: usize) -> Option<Address> {
    let start = index * 32;
    data.get(start + 12..start + 32)
        .map(Address::from_slice)
}

/// Format a U256 value with decimals as a decimal string,
/// trimming trailing zeros ("1.5" rather than "1.500000000000000000").
pub fn format_units(value: U256, decimals: u32) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let remainder_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = remainder_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}

/// Format a wei amount as an ether decimal string.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, 18)
}

/// Parse a revert reason out of an RPC error message.
///
/// Providers wrap reverts in wildly different envelopes; this extracts the
/// human-readable reason when one is present and otherwise returns the raw
/// error text so nothing is swallowed.
pub fn parse_revert_reason(error: &str) -> String {
    use alloy::hex;

    if error.contains("execution reverted") {
        if let Some(start) = error.find("revert: ") {
            let reason = &error[start + 8..];
            if let Some(end) = reason.find('"') {
                return reason[..end].to_string();
            }
            return reason.to_string();
        }
        if let Some(start) = error.find("0x") {
            let hex_data = &error[start..];
            if let Some(end) = hex_data.find(|c: char| !c.is_ascii_hexdigit() && c != 'x') {
                let hex_str = &hex_data[..end];
                // Error(string) selector is 0x08c379a0
                if hex_str.starts_with("0x08c379a0") && hex_str.len() > 138 {
                    if let Ok(decoded) = hex::decode(&hex_str[138..]) {
                        let filtered: Vec<u8> = decoded.into_iter().filter(|&b| b != 0).collect();
                        if let Ok(s) = String::from_utf8(filtered) {
                            return s;
                        }
                    }
                }
                return format!("Reverted with data: {}", hex_str);
            }
        }
        return "execution reverted".to_string();
    }

    error.to_string()
}
