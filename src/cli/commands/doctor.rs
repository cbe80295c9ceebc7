//! `assemblyzero doctor` (spec.md §6): ambient environment health checks.
//!
//! Verifies git is callable, the checkpoint location resolves, and the
//! audit/report directories are writable. Never touches the 2/3 exit codes
//! the workflow driver uses — it performs no workflow action, so it only
//! ever reports 0 (all checks passed) or 1 (at least one failed).

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub ok: bool,
    pub checks: Vec<DoctorCheck>,
}

pub async fn execute(json: bool) -> bool {
    let mut checks = Vec::new();

    checks.push(check_git().await);
    let (location_check, resolved) = check_checkpoint_location().await;
    checks.push(location_check);
    if let Some(db_path) = resolved {
        checks.push(check_writable_dir("checkpoint directory", db_path.parent()));
        let repo_root = super::common::repo_root_from(&db_path);
        if let Some(repo_root) = camino::Utf8Path::from_path(&repo_root) {
            let report_dir = repo_root.join("docs").join("reports").join("active");
            checks.push(check_writable_dir("report directory", Some(&report_dir)));
        }
    }

    let ok = checks.iter().all(|c| c.ok);
    let report = DoctorReport { ok, checks };

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        for check in &report.checks {
            let marker = if check.ok { "OK" } else { "FAIL" };
            println!("[{marker}] {}: {}", check.name, check.detail);
        }
        println!();
        println!(
            "{}",
            if ok {
                "all checks passed"
            } else {
                "some checks failed; see above"
            }
        );
    }

    ok
}

async fn check_git() -> DoctorCheck {
    let result = tokio::process::Command::new("git").arg("--version").output().await;
    match result {
        Ok(output) if output.status.success() => DoctorCheck {
            name: "git".to_string(),
            ok: true,
            detail: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        },
        Ok(output) => DoctorCheck {
            name: "git".to_string(),
            ok: false,
            detail: format!("git exited with {}", output.status),
        },
        Err(e) => DoctorCheck {
            name: "git".to_string(),
            ok: false,
            detail: format!("git is not on PATH: {e}"),
        },
    }
}

async fn check_checkpoint_location() -> (DoctorCheck, Option<camino::Utf8PathBuf>) {
    match super::common::resolve_checkpoint_path().await {
        Ok(path) => (
            DoctorCheck {
                name: "checkpoint location".to_string(),
                ok: true,
                detail: path.to_string(),
            },
            Some(path),
        ),
        Err(e) => (
            DoctorCheck {
                name: "checkpoint location".to_string(),
                ok: false,
                detail: e.to_string(),
            },
            None,
        ),
    }
}

fn check_writable_dir(name: &str, dir: Option<&camino::Utf8Path>) -> DoctorCheck {
    let Some(dir) = dir else {
        return DoctorCheck {
            name: name.to_string(),
            ok: false,
            detail: "no path to check".to_string(),
        };
    };

    match std::fs::create_dir_all(dir.as_std_path()) {
        Ok(()) => DoctorCheck {
            name: name.to_string(),
            ok: true,
            detail: dir.to_string(),
        },
        Err(e) => DoctorCheck {
            name: name.to_string(),
            ok: false,
            detail: format!("{dir}: {e}"),
        },
    }
}
