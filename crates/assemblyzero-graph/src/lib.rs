//! Graph & Router (C5, spec.md §4.5): the static topology over the fixed
//! node identities plus the conditional-edge router, and the `Engine` that
//! drives a workflow by alternating node execution with persistence and
//! routing (spec.md §9: "routing and persistence are interposed between
//! node invocations — not inside them").

mod engine;
mod error;
mod router;

pub use engine::Engine;
pub use error::{EngineError, Result};
pub use router::{route, RouteDecision};
