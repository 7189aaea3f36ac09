//! Key factories

use mintgate::PrivateKey;

/// A well-formed prefixed key, unique per `n`
pub fn prefixed_key(n: u64) -> String {
    format!("0x{:064x}", n)
}

/// A well-formed key without the `0x` prefix
pub fn bare_key(n: u64) -> String {
    format!("{:064x}", n)
}

/// `count` distinct validated keys
pub fn parsed_keys(count: u64) -> Vec<PrivateKey> {
    (1..=count)
        .map(|n| PrivateKey::parse(&prefixed_key(n)).expect("factory key is well-formed"))
        .collect()
}
