//! IPv4 dotted-quad matching.

use regex::Regex;
use std::sync::LazyLock;

/// Four decimal octets in `0..=255` separated by single dots.
///
/// Octets with a leading zero (`01`, `007`) are rejected.
static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((25[0-5]|(2[0-4]|1\d|[1-9]|)\d)\.){3}(25[0-5]|(2[0-4]|1\d|[1-9]|)\d)$")
        .expect("IPv4 pattern is valid")
});

/// Returns `true` if `value` is an IPv4 address in dotted-quad form.
pub fn is_ipv4(value: &str) -> bool {
    IPV4_REGEX.is_match(value)
}
