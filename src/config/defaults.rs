//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [nav] Section Defaults
// ============================================================================

pub mod nav {
    use std::path::PathBuf;

    pub fn source() -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// [session] Section Defaults
// ============================================================================

pub mod session {
    use std::path::PathBuf;

    pub fn key() -> String {
        crate::sidebar::SCROLL_KEY.into()
    }

    pub fn file() -> PathBuf {
        ".tocbar-session.json".into()
    }
}

// ============================================================================
// [layout] Section Defaults
// ============================================================================

pub mod layout {
    pub fn row_height() -> f64 {
        24.0
    }

    pub fn viewport_height() -> f64 {
        600.0
    }
}
