// src/core/lookup/ping.rs

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one ICMP echo via the system `ping` binary and returns the reported
/// round-trip time in milliseconds, or `None` when it cannot be determined.
pub async fn ping_time(host: &str) -> Option<String> {
    let windows = cfg!(target_os = "windows");
    let count_flag = if windows { "-n" } else { "-c" };

    let mut command = Command::new("ping");
    command.args([count_flag, "1", host]).kill_on_drop(true);

    let output = match tokio::time::timeout(PING_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!(host, error = %e, "Could not run ping.");
            return None;
        }
        Err(_) => {
            debug!(host, "Ping timed out.");
            return None;
        }
    };

    if !output.status.success() {
        debug!(host, status = %output.status, "Ping exited unsuccessfully.");
        return None;
    }
    parse_ping_time(&String::from_utf8_lossy(&output.stdout), windows)
}

/// Extracts the round-trip time from `ping` output.
///
/// Windows prints `Average = 12ms`; everything else prints `time=12.3 ms`.
pub fn parse_ping_time(output: &str, windows: bool) -> Option<String> {
    let value = if windows {
        let (_, tail) = output.rsplit_once("Average = ")?;
        tail.split("ms").next()?
    } else {
        let (_, tail) = output.rsplit_once("time=")?;
        tail.split(" ms").next()?
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unix_output() {
        let output = "PING example.com (93.184.216.34) 56(84) bytes of data.\n\
                      64 bytes from 93.184.216.34: icmp_seq=1 ttl=56 time=11.8 ms\n\n\
                      --- example.com ping statistics ---\n";
        assert_eq!(parse_ping_time(output, false).as_deref(), Some("11.8"));
    }

    #[test]
    fn parses_windows_output() {
        let output = "Ping statistics for 93.184.216.34:\r\n\
                      Approximate round trip times in milli-seconds:\r\n    \
                      Minimum = 12ms, Maximum = 12ms, Average = 12ms\r\n";
        assert_eq!(parse_ping_time(output, true).as_deref(), Some("12"));
    }

    #[test]
    fn no_timing_yields_none() {
        assert_eq!(parse_ping_time("Request timed out.", true), None);
        assert_eq!(parse_ping_time("100% packet loss", false), None);
    }
}
