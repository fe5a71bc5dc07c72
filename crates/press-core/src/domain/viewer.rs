//! Viewer stub.

use serde::{Deserialize, Serialize};

/// Root-level entity anchoring per-viewer fields in a query root that cannot
/// be nodeless. There is no authentication, so it is always anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: u64,
    pub name: String,
}

impl Viewer {
    /// The only viewer there is.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: 1,
            name: "Anonymous".to_string(),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::anonymous()
    }
}
