//! Subprocess helpers with bounded waits

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// How long to keep collecting output once the direct child is gone
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Captured result of a finished (or killed) command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }

    /// stderr and stdout joined, trimmed; validators print to either
    pub fn combined(&self) -> String {
        let parts: Vec<&str> = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        parts.join("\n")
    }
}

fn build(argv: &[String]) -> io::Result<Command> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty command line")
    })?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Read `source` to EOF on a worker thread; invalid UTF-8 is replaced, not dropped
fn drain<R: Read + Send + 'static>(source: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            if let Err(err) = source.read_to_end(&mut buf) {
                tracing::debug!(error = %err, "reading command output failed");
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Output read so far; a grandchild still holding the pipe must not stall us
fn collect(rx: &Receiver<String>, until: Instant) -> String {
    let wait = until.saturating_duration_since(Instant::now());
    rx.recv_timeout(wait).unwrap_or_default()
}

#[cfg(unix)]
fn isolate(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn isolate(_cmd: &mut Command) {}

/// Kill the child and, on unix, everything it forked into its group
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        let group = format!("-{}", child.id());
        let killed = Command::new("kill")
            .args(["-KILL", "--", &group])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if let Err(err) = killed {
            tracing::debug!(error = %err, "killing process group failed");
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `argv`, capturing output, killing it once `timeout` has elapsed
pub fn run_with_timeout(argv: &[String], timeout: Duration) -> io::Result<CommandOutput> {
    tracing::debug!(command = %argv.join(" "), timeout_ms = timeout.as_millis() as u64, "spawning");

    let mut cmd = build(argv)?;
    isolate(&mut cmd);
    let mut child: Child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let mut timed_out = false;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break Some(status),
            None if Instant::now() >= deadline => {
                timed_out = true;
                terminate(&mut child);
                break None;
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let until = deadline.max(Instant::now()) + DRAIN_GRACE;
    let output = CommandOutput {
        code: status.and_then(|s| s.code()),
        stdout: collect(&stdout, until),
        stderr: collect(&stderr, until),
        timed_out,
    };
    if timed_out {
        tracing::warn!(command = %argv.join(" "), "command timed out and was killed");
    }
    Ok(output)
}

/// Run `argv` with the operator's terminal attached
pub fn run_streaming(argv: &[String]) -> io::Result<ExitStatus> {
    tracing::debug!(command = %argv.join(" "), "running");
    build(argv)?
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
}

/// Substitute `{name}` placeholders in every argument
pub fn expand(argv: &[String], name: &str, value: &str) -> Vec<String> {
    let placeholder = format!("{{{}}}", name);
    argv.iter().map(|a| a.replace(&placeholder, value)).collect()
}
