/// Desktop notifications for Pomodoro interval changes.
/// macOS goes through osascript, Linux through notify-send.
use std::process::Command;

pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Shells out to the platform notification tool. Failures are logged and
/// otherwise ignored.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        let result = platform_command(title, body).map(|mut cmd| cmd.output());
        match result {
            Some(Ok(output)) if output.status.success() => {
                tracing::debug!(title, "notification sent");
            }
            Some(Ok(output)) => {
                tracing::warn!(title, status = %output.status, "notification command failed");
            }
            Some(Err(e)) => tracing::warn!(title, error = %e, "could not run notification command"),
            None => tracing::debug!(title, "notifications unsupported on this platform"),
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_command(title: &str, body: &str) -> Option<Command> {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        escape_quotes(body),
        escape_quotes(title)
    );
    let mut cmd = Command::new("osascript");
    cmd.arg("-e").arg(script);
    Some(cmd)
}

#[cfg(target_os = "linux")]
fn platform_command(title: &str, body: &str) -> Option<Command> {
    let mut cmd = Command::new("notify-send");
    cmd.arg("--app-name=Taskitto").arg(title).arg(body);
    Some(cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn platform_command(_title: &str, _body: &str) -> Option<Command> {
    None
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Used when notifications are turned off in the config
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _title: &str, _body: &str) {}
}

/// Keeps every notification in memory
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub sent: std::rc::Rc<std::cell::RefCell<Vec<(String, String)>>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.sent
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_quotes(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_quotes(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::default();
        let mut handle = notifier.clone();
        handle.notify("Break time!", "Time for a 5-minute break");
        assert_eq!(notifier.sent.borrow().len(), 1);
        assert_eq!(notifier.sent.borrow()[0].0, "Break time!");
    }
}
