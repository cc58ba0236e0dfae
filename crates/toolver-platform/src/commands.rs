#[cfg(windows)]
use std::os::windows::process::CommandExt;
use std::path::Path;
use std::process::Command;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Keeps plugin subprocesses from flashing a console window on Windows.
pub trait HideWindow {
    fn hide_window(&mut self) -> &mut Self;
}

impl HideWindow for Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

/// Build a command that runs `script` through the POSIX shell.
///
/// Plugin scripts are not required to carry the executable bit, so they are
/// always handed to `sh` rather than executed directly.
#[must_use]
pub fn script_command(script: &Path) -> Command {
    let shell = which::which("sh").unwrap_or_else(|_| "sh".into());
    let mut command = Command::new(shell);
    command.arg(script);
    command.hide_window();
    command
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{HideWindow, script_command};

    #[test]
    fn std_command_hide_window_is_chainable() {
        let mut cmd = std::process::Command::new("echo");
        let before = &raw mut cmd;
        let after = cmd.hide_window() as *mut std::process::Command;
        assert_eq!(before, after);
    }

    #[test]
    fn script_command_passes_script_as_first_argument() {
        let command = script_command(Path::new("/plugins/java/bin/list-all"));

        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec![Path::new("/plugins/java/bin/list-all").as_os_str()]);
        assert!(command.get_program().to_string_lossy().ends_with("sh"));
    }
}
