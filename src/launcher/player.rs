//! External video player for camera streams
//!
//! The terminal can't show video, so each stream panel hands its playback
//! URL to a separate player process (mpv by default), muted. The process is
//! killed when the panel goes away.

use anyhow::{anyhow, Result};
use std::process::{Child, Command, Stdio};
use tracing::{info, warn};

/// Player launch configuration for one stream
pub struct Player {
    url: String,
    command: String,
    muted: bool,
    autoplay: bool,
    child: Option<Child>,
    last_error: Option<String>,
}

impl Player {
    pub fn new(url: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            command: command.into(),
            muted: true,
            autoplay: true,
            child: None,
            last_error: None,
        }
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Is the player process still alive?
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.child = None;
                false
            }
            None => false,
        }
    }

    /// Program and arguments used to play the stream
    pub fn command_line(&self) -> Result<(String, Vec<String>)> {
        let mut parts = self.command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("No video player configured"))?;
        let mut args: Vec<String> = parts.collect();

        if self.muted {
            if let Some(flag) = mute_flag(&program) {
                args.push(flag.to_string());
            }
        }
        args.push(self.url.clone());
        Ok((program, args))
    }

    /// Start (or restart) the player process
    pub fn launch(&mut self) -> Result<()> {
        self.stop();
        let (program, args) = match self.command_line() {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Cannot launch player: {}", e);
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };
        info!("Launching player: {} {}", program, args.join(" "));

        match Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                self.child = Some(child);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to launch {}: {}", program, e);
                self.last_error = Some(format!("{}: {}", program, e));
                Err(e.into())
            }
        }
    }

    /// Kill the player process if it is running
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Mute switch understood by common players
fn mute_flag(program: &str) -> Option<&'static str> {
    let name = program.rsplit('/').next().unwrap_or(program);
    match name {
        "mpv" => Some("--mute=yes"),
        "vlc" | "cvlc" => Some("--no-audio"),
        "ffplay" => Some("-an"),
        _ => None,
    }
}
