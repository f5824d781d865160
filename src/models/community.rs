//! Community model.

use serde::{Deserialize, Serialize};

/// A community hosting one or more coaching teams. Listed so a caller can
/// drive team selection explicitly; community administration itself lives
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}
