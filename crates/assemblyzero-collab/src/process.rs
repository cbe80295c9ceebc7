//! Process-backed collaborators (ambient, spec.md §6): each trait is
//! satisfied by shelling out to an external, operator-configured command,
//! argv-style (no shell string evaluation, mirroring the reference
//! workspace's `CommandSpec::to_tokio_command` discipline), with a JSON
//! request written to stdin and a JSON response read from stdout, under a
//! bounded timeout.
//!
//! This is the one concrete implementation the workspace ships: it is not
//! itself a language model, a test runner, or an issue tracker client — it
//! is the adapter boundary the collaborator contracts describe, so the
//! runtime can actually be driven end to end while leaving what happens
//! inside `program` entirely up to whatever the operator points it at.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::{
    CodeImplementer, CollabError, IssueFiler, RequirementFinding, SemanticReviewResult,
    SemanticReviewer, TestPlanReviewer, TestPlanVerdict, TestRunResult, TestRunner,
    TestScaffolder,
};
use assemblyzero_state::ReviewMaterials;

/// One external command invoked as `program arg1 arg2 ...`, fed a JSON
/// request on stdin and expected to print a single JSON response on
/// stdout before exiting zero.
#[derive(Debug, Clone)]
pub struct ProcessCollaborator {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ProcessCollaborator {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    async fn call<Req, Resp>(&self, request: &Req) -> Result<Resp, CollabError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let body = serde_json::to_vec(request).map_err(|e| CollabError::Failed(e.into()))?;
        let program = self.program.clone();

        timeout(self.timeout, self.spawn_and_exchange(body))
            .await
            .map_err(|_| CollabError::Timeout(self.timeout))?
            .and_then(|stdout| {
                serde_json::from_slice(&stdout).map_err(|e| {
                    CollabError::Failed(anyhow::anyhow!("{program}: malformed response: {e}"))
                })
            })
    }

    async fn spawn_and_exchange(&self, body: Vec<u8>) -> Result<Vec<u8>, CollabError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CollabError::Failed(anyhow::anyhow!("spawning {}: {e}", self.program)))?;

        let mut stdin = child.stdin.take().expect("stdin configured as piped");
        stdin
            .write_all(&body)
            .await
            .map_err(|e| CollabError::Failed(e.into()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CollabError::Failed(e.into()))?;

        if !output.status.success() {
            return Err(CollabError::Failed(anyhow::anyhow!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(output.stdout)
    }
}

#[derive(Serialize)]
struct TestPlanRequest<'a> {
    lld_contents: &'a str,
}

#[derive(Deserialize)]
#[serde(tag = "verdict", rename_all = "UPPERCASE")]
enum TestPlanResponse {
    Approved,
    Blocked { details: String },
}

#[async_trait]
impl TestPlanReviewer for ProcessCollaborator {
    async fn review(&self, lld_contents: &str) -> Result<TestPlanVerdict, CollabError> {
        let response: TestPlanResponse = self.call(&TestPlanRequest { lld_contents }).await?;
        Ok(match response {
            TestPlanResponse::Approved => TestPlanVerdict::Approved,
            TestPlanResponse::Blocked { details } => TestPlanVerdict::Blocked { details },
        })
    }
}

#[derive(Serialize)]
struct ScaffoldRequest<'a> {
    lld_contents: &'a str,
}

#[derive(Deserialize)]
struct ScaffoldResponse {
    test_files: Vec<String>,
}

#[async_trait]
impl TestScaffolder for ProcessCollaborator {
    async fn scaffold(&self, lld_contents: &str) -> Result<Vec<String>, CollabError> {
        let response: ScaffoldResponse = self.call(&ScaffoldRequest { lld_contents }).await?;
        Ok(response.test_files)
    }
}

#[derive(Serialize)]
struct TestRunRequest<'a> {
    test_files: &'a [String],
}

#[derive(Deserialize)]
struct TestRunResponse {
    #[serde(default)]
    all_red: bool,
    #[serde(default)]
    all_green: bool,
    #[serde(default)]
    failures: Vec<String>,
}

#[async_trait]
impl TestRunner for ProcessCollaborator {
    async fn run(&self, test_files: &[String]) -> Result<TestRunResult, CollabError> {
        let response: TestRunResponse = self.call(&TestRunRequest { test_files }).await?;
        Ok(TestRunResult {
            all_red: response.all_red,
            all_green: response.all_green,
            failures: response.failures,
        })
    }
}

#[derive(Serialize)]
struct ImplementRequest<'a> {
    lld_contents: &'a str,
    test_files: &'a [String],
    prior_failures: &'a [String],
}

#[derive(Deserialize)]
struct ImplementResponse {
    implementation_files: Vec<String>,
}

#[async_trait]
impl CodeImplementer for ProcessCollaborator {
    async fn implement(
        &self,
        lld_contents: &str,
        test_files: &[String],
        prior_failures: &[String],
    ) -> Result<Vec<String>, CollabError> {
        let response: ImplementResponse = self
            .call(&ImplementRequest {
                lld_contents,
                test_files,
                prior_failures,
            })
            .await?;
        Ok(response.implementation_files)
    }
}

#[derive(Deserialize)]
struct SemanticReviewResponse {
    findings: Vec<RequirementFindingWire>,
}

#[derive(Deserialize)]
struct RequirementFindingWire {
    requirement_id: String,
    satisfied: bool,
    #[serde(default)]
    notes: String,
}

#[async_trait]
impl SemanticReviewer for ProcessCollaborator {
    async fn review(&self, materials: &ReviewMaterials) -> Result<SemanticReviewResult, CollabError> {
        let response: SemanticReviewResponse = self.call(materials).await?;
        Ok(SemanticReviewResult {
            findings: response
                .findings
                .into_iter()
                .map(|f| RequirementFinding {
                    requirement_id: f.requirement_id,
                    satisfied: f.satisfied,
                    notes: f.notes,
                })
                .collect(),
        })
    }
}

#[derive(Serialize)]
struct IssueFilerRequest<'a> {
    draft: &'a str,
}

#[derive(Deserialize)]
struct IssueFilerResponse {
    url: String,
}

#[async_trait]
impl IssueFiler for ProcessCollaborator {
    async fn file(&self, draft: &str) -> Result<String, CollabError> {
        let response: IssueFilerResponse = self.call(&IssueFilerRequest { draft }).await?;
        Ok(response.url)
    }
}
