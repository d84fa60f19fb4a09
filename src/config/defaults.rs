//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        Some("https://bestlinuxdistros.com".into())
    }
}

// ============================================================================
// [dataset] Section Defaults
// ============================================================================

pub mod dataset {
    use std::path::PathBuf;

    pub fn path() -> String {
        "api/linux_distros_full.json".into()
    }

    pub fn bundled() -> PathBuf {
        "js/distro-data.js".into()
    }

    pub fn timeout_secs() -> u64 {
        10
    }
}

// ============================================================================
// [storage] Section Defaults
// ============================================================================

pub mod storage {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        ".tuxdex".into()
    }

    pub fn ttl_hours() -> u64 {
        12
    }

    pub mod keys {
        pub fn dataset() -> String {
            "bld-distro-cache-v1".into()
        }

        pub fn compare() -> String {
            "bld-compare-queue".into()
        }

        pub fn recent() -> String {
            "bld-recently-viewed".into()
        }
    }
}

// ============================================================================
// [catalog] Section Defaults
// ============================================================================

pub mod catalog {
    use crate::query::SortKey;

    pub fn debounce_ms() -> u64 {
        180
    }

    pub fn sort() -> SortKey {
        SortKey::Popularity
    }
}
