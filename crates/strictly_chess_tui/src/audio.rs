//! Audio cues rendered as terminal bells.

use std::fmt;
use std::io::{self, Stdout, Write};

use strictly_chess::AudioCue;
use tracing::{debug, instrument, warn};

/// Something that can sound a cue. Playing never blocks and never fails
/// loudly; an unavailable device just means no sound.
pub trait CuePlayer: fmt::Debug {
    /// Sounds `cue`.
    fn play(&mut self, cue: AudioCue);
}

/// Rings the terminal bell: once per move or check, twice at game end.
#[derive(Debug)]
pub struct BellCuePlayer<W: Write = Stdout> {
    out: W,
}

impl BellCuePlayer<Stdout> {
    /// Rings the bell on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellCuePlayer<W> {
    /// Rings the bell on `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + fmt::Debug> CuePlayer for BellCuePlayer<W> {
    #[instrument(skip(self))]
    fn play(&mut self, cue: AudioCue) {
        let bells: &[u8] = match cue {
            AudioCue::Move | AudioCue::Check => b"\x07",
            AudioCue::GameEnd => b"\x07\x07",
        };
        if let Err(e) = self.out.write_all(bells).and_then(|()| self.out.flush()) {
            warn!(error = %e, ?cue, "Bell unavailable, cue skipped");
        }
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Plays `cue` only if sound is currently enabled.
pub fn play_cue(player: &mut dyn CuePlayer, cue: AudioCue, sound: bool) {
    if sound {
        player.play(cue);
    } else {
        debug!(?cue, "Sound off, cue muted");
    }
}
