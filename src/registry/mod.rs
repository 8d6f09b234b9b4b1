pub mod builtin;
pub mod error;
pub mod loader;

use std::env;
use std::path::Path;
use std::sync::OnceLock;

use dashmap::DashMap;

pub use error::RegistryError;

static REGISTRY: OnceLock<VendorRegistry> = OnceLock::new();

/// Process-wide registry instance. Read-only after `init`, so request
/// tasks share it without any locking of their own.
pub fn global() -> &'static VendorRegistry {
    REGISTRY.get_or_init(VendorRegistry::new)
}

/// Prefix → organization store for the IEEE registries. IAB blocks carry
/// 36 significant bits, OUI blocks 24; lookups try the more specific
/// class first. A bucketed table, not a hierarchy.
pub struct VendorRegistry {
    iab: DashMap<u64, String>,
    oui: DashMap<u64, String>,
}

impl VendorRegistry {
    pub fn new() -> Self {
        Self {
            iab: DashMap::new(),
            oui: DashMap::new(),
        }
    }

    /// Register a prefix (right-aligned bits). The first registration for
    /// a prefix wins; later duplicates are dropped. That keeps the
    /// tie-break stable for the handful of prefixes the registry files
    /// list more than once (08-00-30 being the best-known).
    pub fn insert(&self, prefix: u64, prefix_len: u8, org: String) {
        match prefix_len {
            36 => {
                self.iab.entry(prefix).or_insert(org);
            }
            24 => {
                self.oui.entry(prefix).or_insert(org);
            }
            other => tracing::warn!("unsupported prefix length {}, entry dropped", other),
        }
    }

    /// Most-specific-prefix match over the address's first octets.
    pub fn lookup(&self, octets: &[u8; 6]) -> Option<String> {
        let bits = octets.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        if let Some(org) = self.iab.get(&(bits >> 12)) {
            return Some(org.clone());
        }
        self.oui.get(&(bits >> 24)).map(|org| org.clone())
    }

    pub fn len(&self) -> usize {
        self.iab.len() + self.oui.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the OUI and IAB registries into memory, downloading the IEEE
/// exports on first run. Every failure is logged and absorbed; the
/// built-in table keeps lookups working when nothing could be loaded.
pub async fn init() {
    let registry = global();
    let dir = env::var("OUI_DATA_DIR").unwrap_or_else(|_| ".".to_string());

    for source in loader::SOURCES {
        let path = Path::new(&dir).join(source.file);
        if !path.exists() {
            tracing::info!("{} not found. Downloading from IEEE...", source.file);
            if let Err(e) = loader::download(source.url, &path).await {
                tracing::error!("Failed to download {}: {}", source.file, e);
                continue;
            }
        }
        match loader::load_file(&path, source.kind, registry).await {
            Ok(count) => tracing::info!("Loaded {} records from {}", count, source.file),
            Err(e) => tracing::error!("Failed to read {}: {}", source.file, e),
        }
    }

    if registry.is_empty() {
        tracing::warn!("no registry files available, using the built-in table");
        builtin::load(registry);
    }
    tracing::info!("vendor registry ready ({} prefixes)", registry.len());
}
