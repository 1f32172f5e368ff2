use std::io::Write;
use std::process::{Command, Stdio};

/// System clipboard for copying page URLs out of the browser.
///
/// The arboard handle is opened on first use so that commands which never
/// copy anything do not touch the display server.
#[derive(Default)]
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        // wl-copy and xclip keep the selection alive after we exit;
        // arboard's copy disappears with the process on X11.
        if copy_with_cli(text) {
            return Ok(());
        }

        if self.system.is_none() {
            self.system = Some(arboard::Clipboard::new()?);
        }
        if let Some(cb) = self.system.as_mut() {
            cb.set_text(text.to_string())?;
        }
        Ok(())
    }
}

fn copy_with_cli(text: &str) -> bool {
    let commands: &[&[&str]] = &[&["wl-copy"], &["xclip", "-selection", "clipboard"]];

    for cmd in commands {
        let Ok(mut child) = Command::new(cmd[0])
            .args(&cmd[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        else {
            continue;
        };
        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                continue;
            }
        }
        if matches!(child.wait(), Ok(status) if status.success()) {
            return true;
        }
    }
    false
}
