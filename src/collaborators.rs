//! Wires the configured process-backed collaborators (spec.md §6) into the
//! `Collaborators` bundle the engine threads through every node.
//!
//! Each role is optional in configuration but mandatory at call time: a
//! workflow that reaches a node needing an unconfigured collaborator fails
//! fast with a message naming the missing `.agentos/config.toml` key,
//! rather than silently no-opping.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use assemblyzero_collab::{Collaborators, ProcessCollaborator};

use crate::config::CollaboratorsConfig;

/// Build the `Collaborators` bundle from configuration, erroring out with a
/// precise message for the first role that has no command configured.
pub fn build(cfg: &CollaboratorsConfig) -> Result<Collaborators> {
    Ok(Collaborators {
        test_plan_reviewer: Arc::new(backend(&cfg.test_plan_reviewer, "collaborators.test_plan_reviewer")?),
        test_scaffolder: Arc::new(backend(&cfg.test_scaffolder, "collaborators.test_scaffolder")?),
        test_runner: Arc::new(backend(&cfg.test_runner, "collaborators.test_runner")?),
        code_implementer: Arc::new(backend(&cfg.code_implementer, "collaborators.code_implementer")?),
        semantic_reviewer: Arc::new(backend(&cfg.semantic_reviewer, "collaborators.semantic_reviewer")?),
        issue_filer: Arc::new(backend(&cfg.issue_filer, "collaborators.issue_filer")?),
    })
}

fn backend(
    configured: &Option<crate::config::CollaboratorCommand>,
    key: &str,
) -> Result<ProcessCollaborator> {
    let command = configured.as_ref().with_context(|| {
        format!(
            "no command configured for `{key}` in .agentos/config.toml; \
             add a `[{key}]` table with a `command = [...]` array"
        )
    })?;

    let Some((program, args)) = command.command.split_first() else {
        bail!("`{key}.command` is empty");
    };

    Ok(ProcessCollaborator::new(
        program.clone(),
        args.to_vec(),
        command.timeout(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollaboratorCommand;

    #[test]
    fn test_missing_role_names_the_config_key() {
        let cfg = CollaboratorsConfig::default();
        let err = build(&cfg).unwrap_err();
        assert!(err.to_string().contains("collaborators.test_plan_reviewer"));
    }

    #[test]
    fn test_fully_configured_bundle_builds() {
        let command = CollaboratorCommand {
            command: vec!["true".to_string()],
            timeout_secs: 5,
        };
        let cfg = CollaboratorsConfig {
            test_plan_reviewer: Some(command.clone()),
            test_scaffolder: Some(command.clone()),
            test_runner: Some(command.clone()),
            code_implementer: Some(command.clone()),
            semantic_reviewer: Some(command.clone()),
            issue_filer: Some(command),
        };
        assert!(build(&cfg).is_ok());
    }

    #[test]
    fn test_empty_command_array_is_rejected() {
        let cfg = CollaboratorsConfig {
            test_plan_reviewer: Some(CollaboratorCommand {
                command: vec![],
                timeout_secs: 5,
            }),
            ..Default::default()
        };
        let err = build(&cfg).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
