// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Subprocess-backed programmer client for the `minipro` tool.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rm04_common::programmer::{classify_write_failure, parse_device_id};
use rm04_common::{FlashError, ProgrammerClient, ProgrammerFault};

/// Runs the external programmer once per request. No retries.
pub struct Minipro {
    program: PathBuf,
}

impl Minipro {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn query_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-q");
        cmd
    }

    fn write_command(&self, part: &str, image: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-p").arg(part).arg("-w").arg(image);
        cmd
    }
}

impl ProgrammerClient for Minipro {
    fn query_device_id(&mut self) -> Result<u32, FlashError> {
        let mut cmd = self.query_command();
        log::debug!("running {:?}", cmd);

        let output = cmd.output().map_err(ProgrammerFault::Spawn)?;
        if !output.status.success() {
            log::debug!(
                "query failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(ProgrammerFault::Exited(output.status.code()).into());
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        log::trace!("query output:\n{}", text);

        parse_device_id(&text)
    }

    fn write_image(&mut self, part: &str, image: &Path) -> Result<(), FlashError> {
        let mut cmd = self.write_command(part, image);
        log::debug!("running {:?}", cmd);

        // Progress goes straight to the terminal; only stderr is inspected.
        let child = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ProgrammerFault::Spawn)?;
        let output = child.wait_with_output().map_err(ProgrammerFault::Wait)?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!(
            "write exited with {:?}: {}",
            output.status.code(),
            stderr.trim()
        );
        Err(classify_write_failure(part, &stderr))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::thread;
    use std::time::Duration;

    use tempfile::TempDir;

    /// Write `body` as an executable shell script standing in for minipro.
    fn fake_programmer(body: &str) -> (TempDir, Minipro) {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("minipro");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        (tmp, Minipro::new(path))
    }

    /// Retry while a concurrent fork still holds the fresh script open (ETXTBSY).
    fn run_script<T>(
        mut op: impl FnMut() -> Result<T, FlashError>,
    ) -> Result<T, FlashError> {
        for _ in 0..50 {
            match op() {
                Err(FlashError::Programmer(ProgrammerFault::Spawn(ref e)))
                    if e.raw_os_error() == Some(26) =>
                {
                    thread::sleep(Duration::from_millis(10));
                }
                other => return other,
            }
        }
        op()
    }

    #[test]
    fn test_write_command_arguments() {
        let minipro = Minipro::new("/opt/minipro");
        let cmd = minipro.write_command("W25Q32BV", Path::new("bin/image.bin"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(cmd.get_program(), "/opt/minipro");
        assert_eq!(args, ["-p", "W25Q32BV", "-w", "bin/image.bin"]);
    }

    #[test]
    fn test_query_command_arguments() {
        let minipro = Minipro::new("/opt/minipro");
        let cmd = minipro.query_command();
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["-q"]);
    }

    #[test]
    fn test_missing_programmer_is_io_failure() {
        let mut minipro = Minipro::new("/nonexistent/rm04/minipro");
        let err = minipro.query_device_id().unwrap_err();
        assert!(matches!(
            err,
            FlashError::Programmer(ProgrammerFault::Spawn(_))
        ));
        assert_eq!(err.exit_code(), 8);

        let err = minipro
            .write_image("W25Q32BV", Path::new("image.bin"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 8);
    }

    #[test]
    fn test_query_nonzero_exit_is_io_failure() {
        let mut minipro = Minipro::new("false");
        let err = minipro.query_device_id().unwrap_err();
        assert!(matches!(
            err,
            FlashError::Programmer(ProgrammerFault::Exited(_))
        ));
    }

    #[test]
    fn test_query_without_device_line_is_io_failure() {
        // `true` prints nothing and exits 0.
        let mut minipro = Minipro::new("true");
        let err = minipro.query_device_id().unwrap_err();
        assert!(matches!(
            err,
            FlashError::Programmer(ProgrammerFault::NoDeviceId)
        ));
    }

    #[test]
    fn test_write_zero_exit_is_success() {
        let mut minipro = Minipro::new("true");
        minipro
            .write_image("W25Q32BV", Path::new("image.bin"))
            .unwrap();
    }

    #[test]
    fn test_write_silent_failure_is_io_failure() {
        let mut minipro = Minipro::new("false");
        let err = minipro
            .write_image("W25Q32BV", Path::new("image.bin"))
            .unwrap_err();
        assert!(matches!(
            err,
            FlashError::Programmer(ProgrammerFault::WriteFailed(_))
        ));
    }

    // --- script programmers ---

    #[test]
    fn test_query_parses_device_id() {
        let (_tmp, mut minipro) = fake_programmer(
            r#"[ "$1" = "-q" ] || exit 2
echo 'Found TL866II+ 04.2.86 (0x256)'
echo 'Device Id: 0xEF4016'"#,
        );
        let id = run_script(|| minipro.query_device_id()).unwrap();
        assert_eq!(id, 0xef4016);
    }

    #[test]
    fn test_write_invalid_device_from_stderr() {
        let (_tmp, mut minipro) = fake_programmer(
            r#"[ "$1" = "-p" ] && [ "$2" = "W25Q32BV" ] && [ "$3" = "-w" ] || exit 3
echo "Invalid device, expected 'X' found 'Y'" >&2
exit 1"#,
        );
        let err = run_script(|| minipro.write_image("W25Q32BV", Path::new("image.bin")))
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
        match err {
            FlashError::FlashInvalid { detail, .. } => {
                assert_eq!(detail, "expected 'X' found 'Y'")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_write_large_stderr_is_drained() {
        let (_tmp, mut minipro) =
            fake_programmer("head -c 500000 /dev/zero | tr '\\000' x >&2\nexit 0");
        run_script(|| minipro.write_image("W25Q32BV", Path::new("image.bin"))).unwrap();
    }

    #[test]
    fn test_write_large_stderr_is_classified() {
        let (_tmp, mut minipro) = fake_programmer(
            "echo 'Unknown device: W25Q32BV' >&2\nhead -c 500000 /dev/zero | tr '\\000' x >&2\nexit 1",
        );
        let err = run_script(|| minipro.write_image("W25Q32BV", Path::new("image.bin")))
            .unwrap_err();
        assert!(matches!(err, FlashError::FlashUnknown { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
