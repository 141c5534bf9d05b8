//! Development asset pipeline: one CSS build at startup, then a watcher.
//!
//! Both steps shell out to the package manager (`<npm> run build` and
//! `<npm> run dev`). Failures are logged and never stop the server.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not start `{program} {script}`: {source}")]
    Spawn {
        program: String,
        script: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program} {script}` exited with {status}")]
    Exit {
        program: String,
        script: &'static str,
        status: ExitStatus,
    },
}

#[derive(Debug, Clone)]
pub struct AssetPipeline {
    program: String,
    enabled: bool,
}

impl AssetPipeline {
    pub fn new(program: impl Into<String>, enabled: bool) -> Self {
        Self {
            program: program.into(),
            enabled,
        }
    }

    /// Run the one-off CSS build and wait for it.
    pub async fn build(&self) -> Result<(), AssetError> {
        if !self.enabled {
            return Ok(());
        }
        info!(program = %self.program, "building css (initial build)");
        run_script(&self.program, "build").await
    }

    /// Start the CSS watcher in the background.
    ///
    /// The task lives until the watcher exits or the process ends; the
    /// returned handle is never awaited by the server.
    pub fn spawn_watcher(&self) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }
        let program = self.program.clone();
        Some(tokio::spawn(async move {
            info!(program = %program, "starting css watcher");
            match run_script(&program, "dev").await {
                Ok(()) => info!("css watcher exited"),
                Err(e @ AssetError::Exit { .. }) => warn!(err = %e, "css watcher stopped"),
                Err(e) => error!(err = %e, "css watcher failed"),
            }
        }))
    }
}

async fn run_script(program: &str, script: &'static str) -> Result<(), AssetError> {
    let status = Command::new(program)
        .args(["run", script])
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| AssetError::Spawn {
            program: program.to_string(),
            script,
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(AssetError::Exit {
            program: program.to_string(),
            script,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_pipeline_does_nothing() {
        let p = AssetPipeline::new("definitely-not-installed-xyz", false);
        assert!(p.build().await.is_ok());
        assert!(p.spawn_watcher().is_none());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let p = AssetPipeline::new("definitely-not-installed-xyz", true);
        let err = p.build().await.unwrap_err();
        assert!(matches!(err, AssetError::Spawn { script: "build", .. }));
    }

    #[tokio::test]
    async fn watcher_failure_stays_inside_its_task() {
        let p = AssetPipeline::new("definitely-not-installed-xyz", true);
        let handle = p.spawn_watcher().unwrap();
        assert!(handle.await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_is_reported() {
        assert!(AssetPipeline::new("true", true).build().await.is_ok());
        let err = AssetPipeline::new("false", true).build().await.unwrap_err();
        assert!(matches!(err, AssetError::Exit { .. }));
    }
}
