// Best-effort browser collaborator for the decorative break tools
//
// Failures here are logged and swallowed; they never reach the state
// machine or the tool response.

use tokio::process::Command;

#[cfg(target_os = "macos")]
const OPEN_COMMAND: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const OPEN_COMMAND: &[&str] = &["cmd", "/C", "start", ""];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPEN_COMMAND: &[&str] = &["xdg-open"];

/// Open a URL in the default browser without blocking the caller.
pub fn open_in_background(url: &str) {
    let url = url.to_string();
    tokio::spawn(async move {
        match Command::new(OPEN_COMMAND[0])
            .args(&OPEN_COMMAND[1..])
            .arg(&url)
            .spawn()
        {
            Ok(mut child) => match child.wait().await {
                Ok(status) if status.success() => {
                    tracing::debug!(%url, "opened in browser");
                }
                Ok(status) => {
                    tracing::warn!(%url, %status, "browser open exited with failure");
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "failed to wait for browser open");
                }
            },
            Err(e) => {
                tracing::warn!(%url, error = %e, "failed to launch browser");
            }
        }
    });
}
