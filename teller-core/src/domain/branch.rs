//! Branch identity

use serde::{Deserialize, Serialize};

/// Identity of the bank branch that owns the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub bank_name: String,
    pub branch_code: String,
    pub branch_address: String,
}

impl Branch {
    pub fn new(
        bank_name: impl Into<String>,
        branch_code: impl Into<String>,
        branch_address: impl Into<String>,
    ) -> Self {
        Self {
            bank_name: bank_name.into(),
            branch_code: branch_code.into(),
            branch_address: branch_address.into(),
        }
    }

    /// Validate branch data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.bank_name.trim().is_empty() {
            return Err("bank name cannot be empty");
        }
        if self.branch_code.trim().is_empty() {
            return Err("branch code cannot be empty");
        }
        Ok(())
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::new("SBI", "SBI001", "700 Olive Way")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_validation() {
        let mut branch = Branch::default();
        assert!(branch.validate().is_ok());

        branch.branch_code = "  ".to_string();
        assert!(branch.validate().is_err());
    }

    #[test]
    fn test_branch_serializes_camel_case() {
        let json = serde_json::to_value(Branch::default()).unwrap();
        assert_eq!(json["branchCode"], "SBI001");
        assert_eq!(json["bankName"], "SBI");
    }
}
