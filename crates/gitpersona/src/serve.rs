//! JSON-lines request loop.
//!
//! Each input line is one `Request`; each output line is the matching
//! `Reply`. Requests are answered in order. A line that is not UTF-8 or not
//! a valid request is answered with a validation error and the loop goes on.

use anyhow::{Context, Result};
use gitpersona_core::{Bridge, CommandRunner, ErrorKind, Reply, Request};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

/// Serve requests from `reader` until EOF, writing replies to `writer`.
pub async fn run<C, R, W>(bridge: &Bridge<C>, mut reader: R, mut writer: W) -> Result<()>
where
    C: CommandRunner,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Serving requests");

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read request")?;
        if read == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match serde_json::from_str::<Request>(line) {
                Ok(request) => bridge.handle(request).await,
                Err(e) => {
                    warn!("Rejected malformed request: {e}");
                    Reply::Error {
                        kind: ErrorKind::Validation,
                        message: format!("Malformed request: {e}"),
                    }
                }
            },
            Err(e) => {
                warn!("Rejected request that is not UTF-8: {e}");
                Reply::Error {
                    kind: ErrorKind::Validation,
                    message: format!("Request is not valid UTF-8: {e}"),
                }
            }
        };

        let mut out = serde_json::to_vec(&reply)?;
        out.push(b'\n');
        writer
            .write_all(&out)
            .await
            .context("failed to write reply")?;
        writer.flush().await?;
    }

    info!("Input closed, stopping");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gitpersona_core::{AccountRepository, Config, IdentityUpdater};

    async fn replies(input: &[u8]) -> Vec<serde_json::Value> {
        let dir = tempfile::tempdir().unwrap();
        let bridge = Bridge::new(
            AccountRepository::new(dir.path().join("accounts.json")),
            IdentityUpdater::from_config(&Config::default()),
        );

        let mut out = Vec::new();
        run(&bridge, input, &mut out).await.unwrap();

        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn answers_each_request_in_order() {
        let input = b"{\"op\":\"save-account\",\"name\":\"Jo\",\"email\":\"jo@x.com\"}\n\
                      {\"op\":\"list-accounts\"}\n";
        let replies = replies(input).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["message"], "Account saved.");
        assert_eq!(replies[1]["data"][0]["email"], "jo@x.com");
    }

    #[tokio::test]
    async fn invalid_utf8_line_gets_error_and_loop_continues() {
        let input = b"{\"op\":\"list-accounts\"}\n\xff\xfe\n{\"op\":\"list-accounts\"}\n";
        let replies = replies(input).await;
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["status"], "ok");
        assert_eq!(replies[1]["status"], "error");
        assert_eq!(replies[1]["kind"], "validation");
        assert_eq!(replies[2]["status"], "ok");
    }

    #[tokio::test]
    async fn malformed_json_and_blank_lines() {
        let input = b"\n   \n{\"op\":\"nope\"}\n{\"op\":\"list-accounts\"}";
        let replies = replies(input).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["kind"], "validation");
        assert_eq!(replies[1]["data"], serde_json::json!([]));
    }
}
