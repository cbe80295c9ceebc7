//! The conditional-edge router (C5, spec.md §4.5): a pure function from a
//! just-completed node and the state it produced to the next node (or the
//! terminal sink).
//!
//! The hard loop caps are graph properties, not node properties (spec.md
//! §4.5 Tie-breaks): `route` re-derives the N2.5 retry/escalate decision
//! and the N4b/N6 cap checks directly from state rather than trusting a
//! node to have applied them, so the cap can never be bypassed by a node
//! that forgets to check it.

use assemblyzero_nodes::mechanical_validate;
use assemblyzero_state::{CompletenessVerdict, NodeId, TestPlanStatus, WorkflowState};

/// What the router decided after a node completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Advance to the named node.
    Next(NodeId),
    /// Terminate the workflow. `Some(reason)` is stamped into
    /// `error_message` by the engine if the state doesn't already carry one
    /// (spec.md §7: `LoopCapExceeded` "surface reason in `error_message`").
    End(Option<String>),
}

const VALIDATION_ATTEMPT_CAP: u32 = 3;
const COMPLETENESS_ITERATION_CAP: u32 = 3;

/// Decide the next node given the node that just ran and the state it
/// produced (after the node's `StateUpdate` has been merged in).
///
/// Invariant 3 (spec.md §3): a non-empty `error_message` always wins,
/// checked first regardless of `node`.
#[must_use]
pub fn route(node: NodeId, state: &WorkflowState) -> RouteDecision {
    if state.is_fatal() {
        return RouteDecision::End(None);
    }

    match node {
        NodeId::N0LoadLld => RouteDecision::Next(NodeId::N1ReviewTestPlan),

        NodeId::N1ReviewTestPlan => route_n1(state),
        NodeId::N2ScaffoldTests => route_n2(state),
        NodeId::N2_5ValidateTestsMechanical => route_n2_5(state),
        NodeId::N3VerifyRed => route_hinted(state, &[(NodeId::N4ImplementCode, false)]),

        NodeId::N4ImplementCode => RouteDecision::Next(NodeId::N4bCompletenessGate),
        NodeId::N4bCompletenessGate => route_n4b(state),

        NodeId::N5VerifyGreen => {
            route_hinted(state, &[(NodeId::N6E2eValidation, false), (NodeId::N7Finalize, false), (NodeId::N4ImplementCode, false)])
        }
        NodeId::N6E2eValidation => route_n6(state),

        NodeId::N7Finalize => route_n7(state),
        NodeId::N8Document => RouteDecision::End(None),
        NodeId::End => RouteDecision::End(None),
    }
}

fn route_n1(state: &WorkflowState) -> RouteDecision {
    match state.test_plan_status {
        Some(TestPlanStatus::Blocked) if !state.auto_mode => RouteDecision::End(None),
        _ => RouteDecision::Next(NodeId::N2ScaffoldTests),
    }
}

fn route_n2(state: &WorkflowState) -> RouteDecision {
    if state.scaffold_only {
        RouteDecision::End(None)
    } else {
        RouteDecision::Next(NodeId::N2_5ValidateTestsMechanical)
    }
}

/// N2.5 is a deterministic, re-runnable check: rather than threading a
/// transient pass/fail result through `StateUpdate`, the router re-derives
/// the outcome directly from `test_files` (spec.md §4.3's reducer reserves
/// no field for it).
fn route_n2_5(state: &WorkflowState) -> RouteDecision {
    let problems = mechanical_validate(&state.test_files);

    if problems.is_empty() {
        return RouteDecision::Next(NodeId::N3VerifyRed);
    }

    if state.validation_attempts < VALIDATION_ATTEMPT_CAP {
        RouteDecision::Next(NodeId::N2ScaffoldTests)
    } else {
        // ValidationExhausted (spec.md §7): escalate forward rather than
        // terminate.
        RouteDecision::Next(NodeId::N4ImplementCode)
    }
}

fn route_n4b(state: &WorkflowState) -> RouteDecision {
    match state.completeness_verdict {
        Some(CompletenessVerdict::Pass) | Some(CompletenessVerdict::Warn) => {
            RouteDecision::Next(NodeId::N5VerifyGreen)
        }
        Some(CompletenessVerdict::Block) => {
            if state.completeness_iteration_count < COMPLETENESS_ITERATION_CAP {
                RouteDecision::Next(NodeId::N4ImplementCode)
            } else {
                RouteDecision::End(Some(format!(
                    "LoopCapExceeded: completeness gate still BLOCK after {} iterations; \
                     human intervention required",
                    state.completeness_iteration_count
                )))
            }
        }
        None => RouteDecision::End(Some(
            "completeness gate produced no verdict for N4b".to_string(),
        )),
    }
}

fn route_n6(state: &WorkflowState) -> RouteDecision {
    match state.next_node.as_deref() {
        Some(hint) if hint == NodeId::N4ImplementCode.as_str() => {
            if state.iteration_count < state.max_iterations {
                RouteDecision::Next(NodeId::N4ImplementCode)
            } else {
                RouteDecision::End(Some(format!(
                    "LoopCapExceeded: e2e_validation did not pass after {} iterations",
                    state.max_iterations
                )))
            }
        }
        _ => RouteDecision::Next(NodeId::N7Finalize),
    }
}

fn route_n7(state: &WorkflowState) -> RouteDecision {
    if state.skip_docs {
        RouteDecision::End(None)
    } else {
        RouteDecision::Next(NodeId::N8Document)
    }
}

/// Dispatch on `state.next_node`, the mechanism hint-accepting edges use
/// (spec.md §4.5 Tie-breaks: "A node may set `next_node` to hint routing
/// only where the router documents acceptance of that hint"). Unrecognized
/// hints fall through to `End`, matching "unrecognized hints are ignored".
///
/// The `bool` in each candidate is unused by any current edge (reserved for
/// a future cap-gated hint) and kept so new hint-accepting branches don't
/// need a signature change.
fn route_hinted(state: &WorkflowState, candidates: &[(NodeId, bool)]) -> RouteDecision {
    let Some(hint) = state.next_node.as_deref() else {
        return RouteDecision::End(None);
    };

    for (candidate, _reserved) in candidates {
        if hint == candidate.as_str() {
            return RouteDecision::Next(*candidate);
        }
    }

    RouteDecision::End(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorkflowState {
        WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10)
    }

    #[test]
    fn test_error_message_wins_over_every_node() {
        let mut s = state();
        s.error_message = "boom".to_string();
        for node in [NodeId::N0LoadLld, NodeId::N4bCompletenessGate, NodeId::N8Document] {
            assert_eq!(route(node, &s), RouteDecision::End(None));
        }
    }

    #[test]
    fn test_n0_always_goes_to_n1() {
        assert_eq!(route(NodeId::N0LoadLld, &state()), RouteDecision::Next(NodeId::N1ReviewTestPlan));
    }

    #[test]
    fn test_n1_blocked_non_auto_ends() {
        let mut s = state();
        s.test_plan_status = Some(TestPlanStatus::Blocked);
        assert_eq!(route(NodeId::N1ReviewTestPlan, &s), RouteDecision::End(None));
    }

    #[test]
    fn test_n1_blocked_auto_mode_continues() {
        let mut s = state();
        s.auto_mode = true;
        s.test_plan_status = Some(TestPlanStatus::Blocked);
        assert_eq!(
            route(NodeId::N1ReviewTestPlan, &s),
            RouteDecision::Next(NodeId::N2ScaffoldTests)
        );
    }

    #[test]
    fn test_n2_scaffold_only_ends() {
        let mut s = state();
        s.scaffold_only = true;
        assert_eq!(route(NodeId::N2ScaffoldTests, &s), RouteDecision::End(None));
    }

    #[test]
    fn test_n2_5_clean_scaffold_goes_to_n3() {
        let mut s = state();
        s.test_files = vec!["test_a.py".to_string()];
        assert_eq!(
            route(NodeId::N2_5ValidateTestsMechanical, &s),
            RouteDecision::Next(NodeId::N3VerifyRed)
        );
    }

    #[test]
    fn test_n2_5_retries_under_cap() {
        let mut s = state();
        s.validation_attempts = 1;
        assert_eq!(
            route(NodeId::N2_5ValidateTestsMechanical, &s),
            RouteDecision::Next(NodeId::N2ScaffoldTests)
        );
    }

    #[test]
    fn test_n2_5_escalates_at_cap() {
        let mut s = state();
        s.validation_attempts = 3;
        assert_eq!(
            route(NodeId::N2_5ValidateTestsMechanical, &s),
            RouteDecision::Next(NodeId::N4ImplementCode)
        );
    }

    #[test]
    fn test_n3_hint_to_n4() {
        let mut s = state();
        s.next_node = Some("N4_implement_code".to_string());
        assert_eq!(route(NodeId::N3VerifyRed, &s), RouteDecision::Next(NodeId::N4ImplementCode));
    }

    #[test]
    fn test_n3_unrecognized_hint_ends() {
        let mut s = state();
        s.next_node = Some("N7_finalize".to_string());
        assert_eq!(route(NodeId::N3VerifyRed, &s), RouteDecision::End(None));
    }

    #[test]
    fn test_n4_always_goes_to_n4b() {
        assert_eq!(route(NodeId::N4ImplementCode, &state()), RouteDecision::Next(NodeId::N4bCompletenessGate));
    }

    #[test]
    fn test_n4b_pass_goes_to_n5() {
        let mut s = state();
        s.completeness_verdict = Some(CompletenessVerdict::Pass);
        assert_eq!(route(NodeId::N4bCompletenessGate, &s), RouteDecision::Next(NodeId::N5VerifyGreen));
    }

    #[test]
    fn test_n4b_warn_goes_to_n5() {
        let mut s = state();
        s.completeness_verdict = Some(CompletenessVerdict::Warn);
        assert_eq!(route(NodeId::N4bCompletenessGate, &s), RouteDecision::Next(NodeId::N5VerifyGreen));
    }

    #[test]
    fn test_n4b_block_under_cap_loops_to_n4() {
        let mut s = state();
        s.completeness_verdict = Some(CompletenessVerdict::Block);
        s.completeness_iteration_count = 1;
        assert_eq!(route(NodeId::N4bCompletenessGate, &s), RouteDecision::Next(NodeId::N4ImplementCode));
    }

    #[test]
    fn test_n4b_block_at_cap_ends_with_reason() {
        let mut s = state();
        s.completeness_verdict = Some(CompletenessVerdict::Block);
        s.completeness_iteration_count = 3;
        let decision = route(NodeId::N4bCompletenessGate, &s);
        match decision {
            RouteDecision::End(Some(reason)) => assert!(reason.contains("LoopCapExceeded")),
            other => panic!("expected End with reason, got {other:?}"),
        }
    }

    #[test]
    fn test_n5_hints_are_all_honored() {
        for (hint, expected) in [
            ("N6_e2e_validation", NodeId::N6E2eValidation),
            ("N7_finalize", NodeId::N7Finalize),
            ("N4_implement_code", NodeId::N4ImplementCode),
        ] {
            let mut s = state();
            s.next_node = Some(hint.to_string());
            assert_eq!(route(NodeId::N5VerifyGreen, &s), RouteDecision::Next(expected));
        }
    }

    #[test]
    fn test_n6_default_goes_to_n7() {
        assert_eq!(route(NodeId::N6E2eValidation, &state()), RouteDecision::Next(NodeId::N7Finalize));
    }

    #[test]
    fn test_n6_loop_hint_respects_cap() {
        let mut s = state();
        s.next_node = Some("N4_implement_code".to_string());
        s.iteration_count = 9;
        s.max_iterations = 10;
        assert_eq!(route(NodeId::N6E2eValidation, &s), RouteDecision::Next(NodeId::N4ImplementCode));

        s.iteration_count = 10;
        match route(NodeId::N6E2eValidation, &s) {
            RouteDecision::End(Some(reason)) => assert!(reason.contains("LoopCapExceeded")),
            other => panic!("expected End with reason, got {other:?}"),
        }
    }

    #[test]
    fn test_n7_skip_docs_ends() {
        let mut s = state();
        s.skip_docs = true;
        assert_eq!(route(NodeId::N7Finalize, &s), RouteDecision::End(None));
    }

    #[test]
    fn test_n7_default_goes_to_n8() {
        assert_eq!(route(NodeId::N7Finalize, &state()), RouteDecision::Next(NodeId::N8Document));
    }

    #[test]
    fn test_n8_always_ends() {
        assert_eq!(route(NodeId::N8Document, &state()), RouteDecision::End(None));
    }

    #[test]
    fn test_router_is_deterministic() {
        let mut s = state();
        s.completeness_verdict = Some(CompletenessVerdict::Block);
        s.completeness_iteration_count = 1;
        let first = route(NodeId::N4bCompletenessGate, &s);
        let second = route(NodeId::N4bCompletenessGate, &s);
        assert_eq!(first, second);
    }
}
