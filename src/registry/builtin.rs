use super::VendorRegistry;

/// Fallback assignments used when no IEEE registry file could be loaded.
/// A small slice of the real registries: common NIC, hypervisor and SBC
/// vendors, two IAB blocks, and 02-E6-D3 — a pre-802 assignment whose
/// U/L bit is set even though it is globally registered.
const BUILTIN: &[(u64, u8, &str)] = &[
    (0x000000, 24, "Xerox Corporation"),
    (0x00000C, 24, "Cisco Systems, Inc"),
    (0x000569, 24, "VMware, Inc."),
    (0x000C29, 24, "VMware, Inc."),
    (0x005056, 24, "VMware, Inc."),
    (0x00155D, 24, "Microsoft Corporation"),
    (0x001B63, 24, "Apple, Inc."),
    (0x00A0C9, 24, "Intel Corporation"),
    (0x02E6D3, 24, "Nixdorf Computer Corporation"),
    (0x080027, 24, "PCS Systemtechnik GmbH"),
    (0x08002B, 24, "Digital Equipment Corporation"),
    // 08-00-30 is listed by several registrants; the first one wins.
    (0x080030, 24, "Network Research Corporation"),
    (0x080030, 24, "CERN"),
    (0x286FB9, 24, "Juniper Networks"),
    (0xB827EB, 24, "Raspberry Pi Foundation"),
    (0xDCA632, 24, "Raspberry Pi Trading Ltd"),
    (0x0050C2000, 36, "T.L.S. Corp."),
    (0x40D8550E7, 36, "DEUTA-WERKE GmbH"),
];

pub fn load(registry: &VendorRegistry) {
    for &(prefix, prefix_len, org) in BUILTIN {
        registry.insert(prefix, prefix_len, org.to_string());
    }
}
