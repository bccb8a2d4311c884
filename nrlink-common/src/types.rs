//! Protocol identifier types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Radio Network Temporary Identifier of a UE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rnti(pub u16);

impl fmt::Display for Rnti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rnti={}", self.0)
    }
}

/// Logical channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lcid(pub u8);

impl fmt::Display for Lcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lcid={}", self.0)
    }
}

/// HARQ process identifier, opaque to the RLC layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HarqProcessId(pub u8);

/// Component carrier identifier, opaque to the RLC layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComponentCarrierId(pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rnti(17)), "rnti=17");
        assert_eq!(format!("{}", Lcid(3)), "lcid=3");
    }
}
