//! The node registry (C4, spec.md §4.4): the `Node` trait plus the eleven
//! fixed node implementations (N0…N8, including the fractional/lettered
//! N2.5 and N4b extensions).
//!
//! Each node is a pure function `state -> partial_state` that may invoke
//! external collaborators but must never panic or propagate an error out of
//! `run` — failures are translated to `StateUpdate { error_message, .. }`
//! (spec.md §4.4 Failure semantics, §7 Propagation policy).

pub mod node;

mod n0_load_lld;
mod n1_review_test_plan;
mod n2_5_validate_tests_mechanical;
mod n3_verify_red;
mod n4_implement_code;
mod n4b_completeness_gate;
mod n5_verify_green;
mod n6_e2e_validation;
mod n7_finalize;
mod n8_document;

pub use node::Node;

pub use n0_load_lld::LoadLld;
pub use n1_review_test_plan::ReviewTestPlan;
pub use n2_5_validate_tests_mechanical::{mechanical_validate, ValidateTestsMechanical};
pub use n2_scaffold_tests::ScaffoldTests;
pub use n3_verify_red::VerifyRed;
pub use n4_implement_code::ImplementCode;
pub use n4b_completeness_gate::CompletenessGateNode;
pub use n5_verify_green::VerifyGreen;
pub use n6_e2e_validation::E2eValidation;
pub use n7_finalize::Finalize;
pub use n8_document::Document;
