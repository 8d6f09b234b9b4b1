use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{RegistryError, VendorRegistry};

#[derive(Clone, Copy)]
pub enum RegistryKind {
    /// MA-L: 24-bit assignments.
    Oui,
    /// Individual Address Blocks: 12 extra bits under an umbrella OUI.
    Iab,
}

pub struct Source {
    pub file: &'static str,
    pub url: &'static str,
    pub kind: RegistryKind,
}

pub const SOURCES: &[Source] = &[
    Source {
        file: "oui.txt",
        url: "https://standards-oui.ieee.org/oui/oui.txt",
        kind: RegistryKind::Oui,
    },
    Source {
        file: "iab.txt",
        url: "https://standards-oui.ieee.org/iab/iab.txt",
        kind: RegistryKind::Iab,
    },
];

pub async fn download(url: &str, path: &Path) -> Result<(), RegistryError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let content = response.text().await?;

    let mut file = fs::File::create(path).await?;
    file.write_all(content.as_bytes()).await?;
    Ok(())
}

pub async fn load_file(
    path: &Path,
    kind: RegistryKind,
    registry: &VendorRegistry,
) -> Result<usize, RegistryError> {
    let contents = fs::read_to_string(path).await?;
    let count = match kind {
        RegistryKind::Oui => parse_oui(&contents, registry),
        RegistryKind::Iab => parse_iab(&contents, registry),
    };
    Ok(count)
}

/// MA-L entries look like `28-6F-B9   (hex)\t\tJuniper Networks`; the
/// `(base 16)` companion lines repeat the same assignment and are skipped.
pub fn parse_oui(contents: &str, registry: &VendorRegistry) -> usize {
    let mut count = 0;
    for line in contents.lines() {
        if !line.contains("(hex)") {
            continue;
        }
        let mut parts = line.splitn(2, "(hex)");
        let prefix = parts.next().unwrap_or("").trim().replace('-', "");
        let org = parts.next().unwrap_or("").trim();
        if org.is_empty() {
            continue;
        }
        if let Some(bits) = parse_hex24(&prefix) {
            registry.insert(bits, 24, org.to_string());
            count += 1;
        }
    }
    count
}

/// IAB entries pair an umbrella-OUI line with a range line:
///
///   00-50-C2   (hex)            T.L.S. Corp.
///   51A000-51AFFF     (base 16) T.L.S. Corp.
///
/// The first three hex digits of the range start are the 12-bit block
/// extension under the umbrella OUI.
pub fn parse_iab(contents: &str, registry: &VendorRegistry) -> usize {
    let mut count = 0;
    let mut umbrella: Option<u64> = None;
    for line in contents.lines() {
        if line.contains("(hex)") {
            let prefix = line
                .splitn(2, "(hex)")
                .next()
                .unwrap_or("")
                .trim()
                .replace('-', "");
            umbrella = parse_hex24(&prefix);
        } else if line.contains("(base 16)") {
            let mut parts = line.splitn(2, "(base 16)");
            let range = parts.next().unwrap_or("").trim();
            let org = parts.next().unwrap_or("").trim();
            let Some(oui) = umbrella else { continue };
            if org.is_empty() {
                continue;
            }
            let Some(ext_hex) = range.get(..3) else { continue };
            if let Ok(ext) = u64::from_str_radix(ext_hex, 16) {
                registry.insert((oui << 12) | ext, 36, org.to_string());
                count += 1;
            }
        }
    }
    count
}

fn parse_hex24(s: &str) -> Option<u64> {
    if s.len() != 6 {
        return None;
    }
    u64::from_str_radix(s, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ma_l_hex_lines() {
        let registry = VendorRegistry::new();
        let text = "\
OUI/MA-L                                                    Organization
company_id                                                  Organization
                                                            Address

28-6F-B9   (hex)\t\tJuniper Networks
286FB9     (base 16)\t\tJuniper Networks
\t\t\t\t1133 Innovation Way
\t\t\t\tSunnyvale  CA  94089
\t\t\t\tUS

00-00-0C   (hex)\t\tCisco Systems, Inc
00000C     (base 16)\t\tCisco Systems, Inc
";
        assert_eq!(parse_oui(text, &registry), 2);
        assert_eq!(
            registry.lookup(&[0x28, 0x6F, 0xB9, 0, 0, 1]).as_deref(),
            Some("Juniper Networks")
        );
        assert_eq!(
            registry.lookup(&[0x00, 0x00, 0x0C, 0, 0, 1]).as_deref(),
            Some("Cisco Systems, Inc")
        );
    }

    #[test]
    fn parses_iab_range_pairs() {
        let registry = VendorRegistry::new();
        let text = "\
00-50-C2   (hex)\t\tT.L.S. Corp.
51A000-51AFFF     (base 16)\t\tT.L.S. Corp.
\t\t\t\t1325 Capital Parkway
\t\t\t\tCarrollton  TX  75006
\t\t\t\tUS

40-D8-55   (hex)\t\tDEUTA-WERKE GmbH
0E7000-0E7FFF     (base 16)\t\tDEUTA-WERKE GmbH
";
        assert_eq!(parse_iab(text, &registry), 2);
        assert_eq!(
            registry.lookup(&[0x00, 0x50, 0xC2, 0x51, 0xA0, 0x01]).as_deref(),
            Some("T.L.S. Corp.")
        );
        assert_eq!(
            registry.lookup(&[0x40, 0xD8, 0x55, 0x0E, 0x70, 0xFF]).as_deref(),
            Some("DEUTA-WERKE GmbH")
        );
        // Same umbrella, unassigned extension: nothing.
        assert_eq!(registry.lookup(&[0x40, 0xD8, 0x55, 0x0F, 0x00, 0x00]), None);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let registry = VendorRegistry::new();
        let text = "\
ZZ-XX-YY   (hex)\t\tBroken Hex Vendor
28-6F   (hex)\t\tToo Short
28-6F-B9   (hex)\t\t
";
        assert_eq!(parse_oui(text, &registry), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn range_line_without_umbrella_is_ignored() {
        let registry = VendorRegistry::new();
        let text = "51A000-51AFFF     (base 16)\t\tOrphan Corp.\n";
        assert_eq!(parse_iab(text, &registry), 0);
    }
}
