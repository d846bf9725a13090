//! HTTP transports to the ILS
//!
//! [`HttpTransport`] talks to the ILS directly. [`SshProxyTransport`] runs
//! the same request with `curl` on a trusted host over `ssh`, for
//! development machines outside the network the ILS accepts requests from.

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::process::Command;

use crate::error::GatewayError;

/// Status and body of an ILS response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx and 3xx count as success
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, GatewayError>;

    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<HttpReply, GatewayError>;
}

// ---------------------------------------------------------------------------
// Direct HTTP
// ---------------------------------------------------------------------------

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn reply(response: reqwest::Response) -> Result<HttpReply, GatewayError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, GatewayError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        Self::reply(response).await
    }

    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<HttpReply, GatewayError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(classify)?;
        Self::reply(response).await
    }
}

/// Sort a reqwest failure into the gateway's error kinds
fn classify(error: reqwest::Error) -> GatewayError {
    let message = error.to_string();
    if error.is_timeout() {
        return GatewayError::Timeout(message);
    }

    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            match io_error.kind() {
                io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe => return GatewayError::ConnectionReset(message),
                io::ErrorKind::UnexpectedEof => return GatewayError::PrematureEof(message),
                _ => {}
            }
        }
        let text = cause.to_string().to_lowercase();
        if text.contains("connection reset") {
            return GatewayError::ConnectionReset(message);
        }
        if text.contains("before message completed") || text.contains("unexpected eof") {
            return GatewayError::PrematureEof(message);
        }
        source = cause.source();
    }

    GatewayError::Transport(message)
}

// ---------------------------------------------------------------------------
// curl over ssh
// ---------------------------------------------------------------------------

/// Separates the body from the status code curl appends
const STATUS_MARKER: &str = "\n--curl-status:";

pub struct SshProxyTransport {
    host: String,
    user: Option<String>,
    timeout: Duration,
}

impl SshProxyTransport {
    pub fn new(host: impl Into<String>, user: Option<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            user,
            timeout,
        }
    }

    /// Remote command line: one shell-quoted curl invocation
    fn curl_command(&self, url: &str, form: Option<&[(String, String)]>) -> String {
        let mut parts = vec![
            "curl".to_string(),
            "--silent".to_string(),
            "--show-error".to_string(),
            "--max-time".to_string(),
            self.timeout.as_secs().max(1).to_string(),
            "--write-out".to_string(),
            shell_quote(&format!("{}%{{http_code}}", STATUS_MARKER)),
        ];
        if let Some(form) = form {
            parts.push("--request".to_string());
            parts.push("POST".to_string());
            for (name, value) in form {
                parts.push("--data-urlencode".to_string());
                parts.push(shell_quote(&format!("{}={}", name, value)));
            }
        }
        parts.push(shell_quote(url));
        parts.join(" ")
    }

    async fn run(&self, remote_command: String) -> Result<HttpReply, GatewayError> {
        let mut command = Command::new("ssh");
        command.arg("-o").arg("BatchMode=yes");
        if let Some(user) = &self.user {
            command.arg("-l").arg(user);
        }
        command.arg(&self.host).arg(remote_command).kill_on_drop(true);

        tracing::debug!("Proxying ILS request through {}", self.host);

        // Leave curl room to report its own timeout first
        let deadline = self.timeout + Duration::from_secs(5);
        let output = tokio::time::timeout(deadline, command.output())
            .await
            .map_err(|_| GatewayError::Timeout(format!("ssh proxy via {} timed out", self.host)))?
            .map_err(|e| GatewayError::Transport(format!("Failed to run ssh: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        match output.status.code() {
            Some(0) => parse_curl_output(&stdout),
            Some(code) => Err(curl_failure(code, stderr)),
            None => Err(GatewayError::Transport("ssh terminated by signal".to_string())),
        }
    }
}

#[async_trait]
impl Transport for SshProxyTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, GatewayError> {
        self.run(self.curl_command(url, None)).await
    }

    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<HttpReply, GatewayError> {
        self.run(self.curl_command(url, Some(form))).await
    }
}

fn parse_curl_output(stdout: &str) -> Result<HttpReply, GatewayError> {
    let (body, status) = stdout
        .rsplit_once(STATUS_MARKER)
        .ok_or_else(|| GatewayError::PrematureEof("curl output ended before the status line".to_string()))?;
    let status = status
        .trim()
        .parse::<u16>()
        .map_err(|_| GatewayError::Transport(format!("unreadable curl status '{}'", status.trim())))?;
    Ok(HttpReply::new(status, body))
}

/// Map curl (or ssh) exit codes onto gateway errors
fn curl_failure(code: i32, stderr: String) -> GatewayError {
    match code {
        // Recv failure, typically "Connection reset by peer"
        56 | 55 => GatewayError::ConnectionReset(stderr),
        // Partial file, empty reply
        18 | 52 => GatewayError::PrematureEof(stderr),
        28 => GatewayError::Timeout(stderr),
        _ => GatewayError::Transport(format!("proxy exited with {}: {}", code, stderr)),
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
