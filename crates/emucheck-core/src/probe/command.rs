//! Subprocess helpers shared by the live probe.
//!
//! Every command runs with a deadline. A command that fails to start, exits
//! non-zero, prints nothing or overruns its deadline resolves to `None`.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Poll interval while waiting for a child process.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Run `program` with `args` and return its trimmed stdout.
///
/// Stdout is drained on a helper thread so a chatty command cannot stall on
/// a full pipe while we poll for its exit.
pub fn run_command(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::debug!("failed to spawn {program}: {e}");
            return None;
        }
    };

    let reader = child.stdout.take().map(|mut stdout| {
        std::thread::spawn(move || {
            let mut out = Vec::new();
            let _ = stdout.read_to_end(&mut out);
            out
        })
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    log::warn!(
                        "{program} {args:?} timed out after {}ms",
                        timeout.as_millis()
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                log::debug!("waiting on {program} failed: {e}");
                let _ = child.kill();
                return None;
            }
        }
    };

    if !status.success() {
        log::debug!("{program} {args:?} exited with {status}");
        return None;
    }

    let out = reader.and_then(|handle| handle.join().ok())?;
    let s = String::from_utf8_lossy(&out).trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// Run a full command line through `shell -c`.
pub fn run_shell_line(shell: &str, line: &str, timeout: Duration) -> Option<String> {
    run_command(shell, &["-c", line], timeout)
}

/// Check whether a program can be started at all.
pub fn program_exists(program: &str) -> bool {
    Command::new(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|mut child| {
            let _ = child.kill();
            let _ = child.wait();
            true
        })
        .unwrap_or(false)
}
