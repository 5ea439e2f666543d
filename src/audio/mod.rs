//! Fire-and-forget sound cues.
//!
//! The game queues cues while it processes a tick; the runner hands them to
//! an [`AudioSink`]. Nothing is ever read back.

use std::io::Write;

/// Something worth a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    Crash,
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct Mute;

impl AudioSink for Mute {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell on crashes (and optionally on meals)
#[derive(Debug, Default)]
pub struct TerminalBell {
    pub ring_on_eat: bool,
}

impl TerminalBell {
    pub fn new(ring_on_eat: bool) -> Self {
        Self { ring_on_eat }
    }

    fn should_ring(&self, cue: SoundCue) -> bool {
        match cue {
            SoundCue::Crash => true,
            SoundCue::Eat => self.ring_on_eat,
        }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        if !self.should_ring(cue) {
            return;
        }
        let mut stderr = std::io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            log::debug!("Bell failed: {}", err);
        }
    }
}
