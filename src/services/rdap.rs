use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

/// Well-known bootstrapping endpoint; it redirects to whichever RIR holds
/// the record, so the client needs no registry map of its own.
const DEFAULT_BOOTSTRAP_URL: &str = "https://rdap.db.ripe.net/ip/";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Network registration objects carry a `name` identifier assigned by the
/// registration holder (RFC 7483 5.4); the rest of the body is ignored.
#[derive(Deserialize)]
struct RdapNetwork {
    name: Option<String>,
}

enum AddrClass {
    LinkLocal,
    Private,
    Global,
}

/// Resolve an IP address to the name of its registered address block.
/// Link-local and private space is answered locally; everything else is a
/// single bounded RDAP query. Failures are logged and come back as an
/// empty string, never as an error.
pub async fn netname(ip_addr: &str) -> String {
    let ip: IpAddr = match ip_addr.parse() {
        Ok(ip) => ip,
        Err(_) => {
            tracing::warn!("{} - invalid IP address", ip_addr);
            return String::new();
        }
    };

    match classify(ip) {
        AddrClass::LinkLocal => "Link-local address".to_string(),
        AddrClass::Private => "Private address".to_string(),
        AddrClass::Global => query_registry(ip).await,
    }
}

fn classify(ip: IpAddr) -> AddrClass {
    match ip {
        IpAddr::V4(v4) => classify_v4(v4),
        IpAddr::V6(v6) => classify_v6(v6),
    }
}

fn classify_v4(ip: Ipv4Addr) -> AddrClass {
    if ip.is_link_local() {
        return AddrClass::LinkLocal;
    }
    let o = ip.octets();
    let private = ip.is_private()
        || ip.is_loopback()
        || ip.is_broadcast()
        || ip.is_documentation()
        // 0.0.0.0/8, "this network"
        || o[0] == 0
        // 100.64.0.0/10, carrier-grade NAT shared space
        || (o[0] == 100 && (o[1] & 0xc0) == 64)
        // 192.0.0.0/24, IETF protocol assignments
        || (o[0] == 192 && o[1] == 0 && o[2] == 0)
        // 198.18.0.0/15, benchmarking
        || (o[0] == 198 && (o[1] & 0xfe) == 18)
        // 240.0.0.0/4, reserved
        || o[0] >= 240;
    if private {
        AddrClass::Private
    } else {
        AddrClass::Global
    }
}

fn classify_v6(ip: Ipv6Addr) -> AddrClass {
    // IPv4 clients reach the dual-stack listener as v4-mapped addresses;
    // classify those as the embedded IPv4 address.
    if let Some(v4) = ip.to_ipv4_mapped() {
        return classify_v4(v4);
    }
    let s = ip.segments();
    // fe80::/10
    if s[0] & 0xffc0 == 0xfe80 {
        return AddrClass::LinkLocal;
    }
    // Unique local fc00::/7, loopback, unspecified, 2001:db8::/32 docs.
    if s[0] & 0xfe00 == 0xfc00
        || ip.is_loopback()
        || ip.is_unspecified()
        || (s[0] == 0x2001 && s[1] == 0xdb8)
    {
        return AddrClass::Private;
    }
    AddrClass::Global
}

async fn query_registry(ip: IpAddr) -> String {
    let base =
        env::var("RDAP_BOOTSTRAP_URL").unwrap_or_else(|_| DEFAULT_BOOTSTRAP_URL.to_string());

    let client = match Client::builder().timeout(LOOKUP_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Error: {}", e);
            return String::new();
        }
    };

    let response = match client.get(format!("{}{}", base, ip)).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            tracing::error!("Timeout: {}", e);
            return String::new();
        }
        Err(e) if e.is_connect() => {
            tracing::error!("Connection error: {}", e);
            return String::new();
        }
        Err(e) => {
            tracing::error!("Error: {}", e);
            return String::new();
        }
    };

    // An unsuccessful status is a lookup failure, not a protocol error.
    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("HTTP error: {}", e);
            return String::new();
        }
    };

    let network: RdapNetwork = match response.json().await {
        Ok(network) => network,
        Err(e) => {
            tracing::error!("Error: {}", e);
            return String::new();
        }
    };

    match network.name {
        Some(name) => sanitize_netname(&name),
        None => "-".to_string(),
    }
}

static NETNAME_RE: OnceLock<Regex> = OnceLock::new();

/// RIR databases already restrict netname to a small ASCII set; stripping
/// here keeps a misbehaving server from reflecting arbitrary bytes.
fn sanitize_netname(name: &str) -> String {
    let re = NETNAME_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());
    re.replace_all(name, "").chars().take(20).collect()
}
