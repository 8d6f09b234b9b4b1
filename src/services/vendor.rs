use eui48::MacAddress;

use crate::registry;
use crate::services::shorten::shorten;

/// Resolve a MAC address to its manufacturer, abbreviated.
///
/// The IEEE registries are consulted before the U/L bit: a handful of
/// assignments predate the 802 standards and carry the bit despite being
/// globally registered (02-E6-D3 is the classic case).
pub fn mac_vendor(mac_addr: &str) -> String {
    let mac = match MacAddress::parse_str(mac_addr) {
        Ok(mac) => mac,
        Err(_) => return "Invalid MAC".to_string(),
    };
    let octets = mac.to_array();

    if let Some(org) = registry::global().lookup(&octets) {
        return shorten(&org);
    }

    // Unregistered prefix: the second-least-significant bit of the first
    // octet marks a locally administered address.
    if octets[0] & 0x02 != 0 {
        "LA address".to_string()
    } else {
        "unknown vendor".to_string()
    }
}
