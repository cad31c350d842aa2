//! Direct media URL extraction via the `yt-dlp` command-line tool.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Resolves a watch page to a directly playable stream URL.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// `None` when no direct URL could be obtained; callers fall back to the
    /// embeddable URL.
    async fn resolve(&self, watch_url: &str) -> Option<String>;
}

/// Runs `yt-dlp -g -f best[ext=mp4] <url>` raced against a timeout.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    path: String,
    timeout: Duration,
    enabled: bool,
}

impl YtDlpResolver {
    #[must_use]
    pub fn new(path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
            enabled: true,
        }
    }

    /// A resolver for runtimes that cannot spawn subprocesses.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            path: String::new(),
            timeout: Duration::ZERO,
            enabled: false,
        }
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn resolve(&self, watch_url: &str) -> Option<String> {
        if !self.enabled {
            tracing::debug!(url = watch_url, "media extraction disabled; using embed fallback");
            return None;
        }

        tracing::debug!(url = watch_url, "spawning yt-dlp for direct media URL");
        let mut cmd = Command::new(&self.path);
        cmd.args(["-g", "-f", "best[ext=mp4]", watch_url]);
        run_bounded(cmd, self.timeout, watch_url).await
    }
}

/// Run `cmd` to completion within `timeout`, returning the first non-empty
/// stdout line on a zero exit.
///
/// The child is killed when the timer wins.
pub(crate) async fn run_bounded(mut cmd: Command, timeout: Duration, url: &str) -> Option<String> {
    cmd.kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => {
            tracing::warn!(url, timeout_secs = timeout.as_secs(), "media extraction timed out; falling back");
            return None;
        }
        Ok(Err(e)) => {
            tracing::warn!(url, error = %e, "could not run media extractor");
            return None;
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: String = stderr.trim().chars().take(100).collect();
        tracing::warn!(
            url,
            code = ?output.status.code(),
            stderr = %stderr,
            "media extractor failed"
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let direct = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string);

    if direct.is_some() {
        tracing::debug!(url, "extracted direct media URL");
    }
    direct
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }

    #[tokio::test]
    async fn returns_first_stdout_line_on_success() {
        let out = run_bounded(
            sh("echo https://cdn.example/v.mp4; echo https://cdn.example/a.m4a"),
            Duration::from_secs(5),
            "https://www.youtube.com/watch?v=x",
        )
        .await;
        assert_eq!(out.as_deref(), Some("https://cdn.example/v.mp4"));
    }

    #[tokio::test]
    async fn non_zero_exit_yields_none() {
        let out = run_bounded(sh("echo boom >&2; exit 1"), Duration::from_secs(5), "u").await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn empty_stdout_yields_none() {
        let out = run_bounded(sh("true"), Duration::from_secs(5), "u").await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn timeout_yields_none_promptly() {
        let start = std::time::Instant::now();
        let out = run_bounded(sh("sleep 5"), Duration::from_millis(200), "u").await;
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn missing_binary_yields_none() {
        let resolver = YtDlpResolver::new(
            "/nonexistent/definitely-not-yt-dlp",
            Duration::from_secs(1),
        );
        assert!(resolver.resolve("https://www.youtube.com/watch?v=x").await.is_none());
    }

    #[tokio::test]
    async fn disabled_resolver_returns_none() {
        assert!(YtDlpResolver::disabled()
            .resolve("https://www.youtube.com/watch?v=x")
            .await
            .is_none());
    }
}
