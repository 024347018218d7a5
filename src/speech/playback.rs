use std::path::Path;
use std::process::{Command, Stdio};

use crate::errors::PlaybackError;

/// Something that can play an audio file
pub trait AudioSink {
    fn play(&self, artifact: &Path) -> Result<(), PlaybackError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// macOS: `afplay`, blocks until playback ends
pub struct Afplay;

/// Linux: `mpg123`, blocks until playback ends
pub struct Mpg123;

/// Everything else: hand the file to the shell's default handler
pub struct ShellStart;

impl Afplay {
    pub fn command(&self, artifact: &Path) -> Command {
        let mut command = Command::new("afplay");
        command.arg(artifact);
        command
    }
}

impl Mpg123 {
    pub fn command(&self, artifact: &Path) -> Command {
        let mut command = Command::new("mpg123");
        command.arg("-q").arg(artifact);
        command
    }
}

impl ShellStart {
    pub fn command(&self, artifact: &Path) -> Command {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(artifact);
        command
    }
}

fn run(player: &'static str, mut command: Command) -> Result<(), PlaybackError> {
    let status = command
        .stdin(Stdio::null())
        .status()
        .map_err(|source| PlaybackError::Launch { player, source })?;

    if status.success() {
        Ok(())
    } else {
        Err(PlaybackError::Failed { player, status })
    }
}

impl AudioSink for Afplay {
    fn play(&self, artifact: &Path) -> Result<(), PlaybackError> {
        run(self.name(), self.command(artifact))
    }

    fn name(&self) -> &'static str {
        "afplay"
    }
}

impl AudioSink for Mpg123 {
    fn play(&self, artifact: &Path) -> Result<(), PlaybackError> {
        run(self.name(), self.command(artifact))
    }

    fn name(&self) -> &'static str {
        "mpg123"
    }
}

impl AudioSink for ShellStart {
    fn play(&self, artifact: &Path) -> Result<(), PlaybackError> {
        run(self.name(), self.command(artifact))
    }

    fn name(&self) -> &'static str {
        "start"
    }
}

/// Pick the player for an operating system name as reported by
/// `std::env::consts::OS`
pub fn select_sink(os: &str) -> Box<dyn AudioSink> {
    match os {
        "macos" => Box::new(Afplay),
        "linux" => Box::new(Mpg123),
        _ => Box::new(ShellStart),
    }
}

pub fn default_sink() -> Box<dyn AudioSink> {
    select_sink(std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args(command: &Command) -> Vec<&OsStr> {
        command.get_args().collect()
    }

    #[test]
    fn test_select_sink() {
        assert_eq!(select_sink("macos").name(), "afplay");
        assert_eq!(select_sink("linux").name(), "mpg123");
        assert_eq!(select_sink("windows").name(), "start");
        assert_eq!(select_sink("freebsd").name(), "start");
    }

    #[test]
    fn test_player_commands() {
        let artifact = Path::new("/tmp/reply.mp3");

        let command = Afplay.command(artifact);
        assert_eq!(command.get_program(), "afplay");
        assert_eq!(args(&command), vec![OsStr::new("/tmp/reply.mp3")]);

        let command = Mpg123.command(artifact);
        assert_eq!(command.get_program(), "mpg123");
        assert_eq!(args(&command), vec![OsStr::new("-q"), OsStr::new("/tmp/reply.mp3")]);

        let command = ShellStart.command(artifact);
        assert_eq!(command.get_program(), "cmd");
        assert_eq!(
            args(&command),
            vec![
                OsStr::new("/C"),
                OsStr::new("start"),
                OsStr::new(""),
                OsStr::new("/tmp/reply.mp3")
            ]
        );
    }

    #[test]
    fn test_missing_player_reports_launch_error() {
        let result = run(
            "cotton-test-player",
            Command::new("cotton-test-player-that-does-not-exist"),
        );
        assert!(matches!(
            result,
            Err(PlaybackError::Launch { player: "cotton-test-player", .. })
        ));
    }
}
