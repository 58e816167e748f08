//! Detached launch of the dashboard server.

use casewatch_common::{CaseWatchError, Result};
use std::process::{Command, Stdio};
use tracing::info;

use crate::cli::LauncherArgs;

/// Command line for `<program> serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLauncher {
    program: String,
    port: u16,
    target: String,
    allow_websocket_origin: String,
    extra_args: Vec<String>,
}

impl Default for DashboardLauncher {
    fn default() -> Self {
        Self {
            program: "panel".to_string(),
            port: 5009,
            target: "covid-interactive.ipynb".to_string(),
            allow_websocket_origin: "*".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl From<&LauncherArgs> for DashboardLauncher {
    fn from(args: &LauncherArgs) -> Self {
        Self {
            program: args.program.clone(),
            port: args.port,
            target: args.target.clone(),
            allow_websocket_origin: args.allow_websocket_origin.clone(),
            extra_args: args.extra_args.clone(),
        }
    }
}

impl DashboardLauncher {
    pub fn new(program: impl Into<String>, port: u16, target: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            port,
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program name.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "serve".to_string(),
            "--port".to_string(),
            self.port.to_string(),
            self.target.clone(),
            format!("--allow-websocket-origin={}", self.allow_websocket_origin),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Full command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Starts the server and returns its PID without waiting on it.
    #[allow(clippy::zombie_processes)]
    pub fn spawn(&self) -> Result<u32> {
        let child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| {
                CaseWatchError::launch_with_source(format!("Failed to start '{}'", self.program), e)
            })?;

        let pid = child.id();
        info!(pid, command = %self.command_line(), "Dashboard server started");
        Ok(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_line() {
        let launcher = DashboardLauncher::default();
        assert_eq!(
            launcher.args(),
            vec![
                "serve",
                "--port",
                "5009",
                "covid-interactive.ipynb",
                "--allow-websocket-origin=*",
            ]
        );
        assert_eq!(
            launcher.command_line(),
            "panel serve --port 5009 covid-interactive.ipynb --allow-websocket-origin=*"
        );
    }

    #[test]
    fn test_extra_args_appended() {
        let mut launcher = DashboardLauncher::new("bokeh", 5011, "county.ipynb");
        launcher.extra_args = vec!["--show".to_string()];

        assert_eq!(launcher.program(), "bokeh");
        assert_eq!(launcher.args().last().map(String::as_str), Some("--show"));
        assert_eq!(launcher.args()[2], "5011");
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let launcher = DashboardLauncher::new("casewatch-no-such-program", 5009, "x.ipynb");
        let err = launcher.spawn().unwrap_err();
        assert!(matches!(err, CaseWatchError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_returns_pid() {
        let launcher = DashboardLauncher::new("true", 5009, "x.ipynb");
        let pid = launcher.spawn().unwrap();
        assert!(pid > 0);
    }
}
