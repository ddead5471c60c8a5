// Directory lookup types.
//
// The booking form populates its customer/vendor/agent/airline/employee
// pickers from these lean records; full party management lives elsewhere.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Which directory a lookup searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    Customers,
    Vendors,
    Agents,
    Airlines,
    Employees,
}

impl DirectoryKind {
    /// Backing table for this directory
    pub fn table(&self) -> &'static str {
        match self {
            DirectoryKind::Customers => "customers",
            DirectoryKind::Vendors => "vendors",
            DirectoryKind::Agents => "agents",
            DirectoryKind::Airlines => "airlines",
            DirectoryKind::Employees => "employees",
        }
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl FromStr for DirectoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customers" => Ok(DirectoryKind::Customers),
            "vendors" => Ok(DirectoryKind::Vendors),
            "agents" => Ok(DirectoryKind::Agents),
            "airlines" => Ok(DirectoryKind::Airlines),
            "employees" => Ok(DirectoryKind::Employees),
            other => Err(format!("Unknown directory: {}", other)),
        }
    }
}

/// One row in a lookup result
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    /// Short code (airline designator, vendor code) where the directory has one
    pub code: Option<String>,
    pub phone: Option<String>,
}
