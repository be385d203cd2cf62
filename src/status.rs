use std::process::Command;

use crate::config::Config;

/// Health of one external collaborator.
#[derive(Debug, Clone)]
pub struct CollaboratorStatus {
    pub name: &'static str,
    pub status: String,
    /// `None` when the collaborator is only configured, not contacted.
    pub healthy: Option<bool>,
}

pub fn collect_status(config: &Config) -> Vec<CollaboratorStatus> {
    let mut rows = vec![
        probe_program("git", &config.repository.git_program),
        probe_program("tracker", &config.tracker.program),
    ];

    rows.push(match &config.repository.full_name {
        Some(name) => CollaboratorStatus {
            name: "repository",
            status: format!("{} @ {}", name, config.repository.branch),
            healthy: Some(true),
        },
        None => CollaboratorStatus {
            name: "repository",
            status: "NOT CONFIGURED".to_string(),
            healthy: Some(false),
        },
    });

    rows.push(CollaboratorStatus {
        name: "notes root",
        status: config.repository.root.display().to_string(),
        healthy: Some(config.repository.root.is_dir()),
    });

    rows.push(CollaboratorStatus {
        name: "metadata",
        status: format!("configured, not checked ({})", config.metadata.endpoint),
        healthy: None,
    });

    rows
}

pub fn print_status(config: &Config) {
    println!("{:<12} {:<7} STATUS", "COLLABORATOR", "HEALTHY");
    for row in collect_status(config) {
        let healthy = match row.healthy {
            Some(true) => "true",
            Some(false) => "false",
            None => "-",
        };
        println!("{:<12} {:<7} {}", row.name, healthy, row.status);
    }
}

fn probe_program(name: &'static str, program: &str) -> CollaboratorStatus {
    match Command::new(program).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout);
            CollaboratorStatus {
                name,
                status: version.lines().next().unwrap_or(program).trim().to_string(),
                healthy: Some(true),
            }
        }
        Ok(_) => CollaboratorStatus {
            name,
            status: format!("{} --version failed", program),
            healthy: Some(false),
        },
        Err(_) => CollaboratorStatus {
            name,
            status: format!("NOT FOUND ({})", program),
            healthy: Some(false),
        },
    }
}
