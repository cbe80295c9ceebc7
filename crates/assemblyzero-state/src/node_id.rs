//! Fixed node identities (spec.md §4.4, §4.5).

use serde::{Deserialize, Serialize};

/// Identity of one of the ten fixed workflow nodes, plus the terminal sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeId {
    N0LoadLld,
    N1ReviewTestPlan,
    N2ScaffoldTests,
    N2_5ValidateTestsMechanical,
    N3VerifyRed,
    N4ImplementCode,
    N4bCompletenessGate,
    N5VerifyGreen,
    N6E2eValidation,
    N7Finalize,
    N8Document,
    End,
}

impl NodeId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N0LoadLld => "N0_load_lld",
            Self::N1ReviewTestPlan => "N1_review_test_plan",
            Self::N2ScaffoldTests => "N2_scaffold_tests",
            Self::N2_5ValidateTestsMechanical => "N2.5_validate_tests_mechanical",
            Self::N3VerifyRed => "N3_verify_red",
            Self::N4ImplementCode => "N4_implement_code",
            Self::N4bCompletenessGate => "N4b_completeness_gate",
            Self::N5VerifyGreen => "N5_verify_green",
            Self::N6E2eValidation => "N6_e2e_validation",
            Self::N7Finalize => "N7_finalize",
            Self::N8Document => "N8_document",
            Self::End => "end",
        }
    }

    /// Parse the canonical node name back into an identity, the inverse of
    /// [`NodeId::as_str`]. Used by the engine to resume from a checkpoint's
    /// persisted `node_name` column.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "N0_load_lld" => Self::N0LoadLld,
            "N1_review_test_plan" => Self::N1ReviewTestPlan,
            "N2_scaffold_tests" => Self::N2ScaffoldTests,
            "N2.5_validate_tests_mechanical" => Self::N2_5ValidateTestsMechanical,
            "N3_verify_red" => Self::N3VerifyRed,
            "N4_implement_code" => Self::N4ImplementCode,
            "N4b_completeness_gate" => Self::N4bCompletenessGate,
            "N5_verify_green" => Self::N5VerifyGreen,
            "N6_e2e_validation" => Self::N6E2eValidation,
            "N7_finalize" => Self::N7Finalize,
            "N8_document" => Self::N8Document,
            "end" => Self::End,
            _ => return None,
        })
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
