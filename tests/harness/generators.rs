// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for attack simulation.

use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of peer IP addresses for testing.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// Generate a pool of application user identifiers.
pub fn generate_user_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("user-{i}")).collect()
}

/// Input strings with the kinds of whitespace and control noise the
/// sanitizer is expected to clean up.
pub fn generate_messy_inputs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("  plain text  ", "plain text"),
        ("\n\ttabbed\t\n", "tabbed"),
        ("bell\u{0007}inside", "bellinside"),
        ("keep\tinterior\nbreaks", "keep\tinterior\nbreaks"),
        ("", ""),
        ("   ", ""),
    ]
}

/// Request bodies that must fail JSON parsing at the boundary.
pub fn generate_malformed_bodies() -> Vec<&'static [u8]> {
    vec![
        b"",
        b"not json",
        b"{\"input\": ",
        b"[1, 2, 3]",
        b"\"just a string\"",
        b"{\"input\": 42}",
        &[0xFF, 0xFE, 0x00],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ips_are_unique() {
        let ips = generate_ips(256);
        assert_eq!(ips.len(), 256);
        let unique: std::collections::HashSet<_> = ips.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn generated_user_ids_are_unique() {
        let users = generate_user_ids(100);
        assert_eq!(users.len(), 100);
        let unique: std::collections::HashSet<_> = users.iter().collect();
        assert_eq!(unique.len(), 100);
    }
}
