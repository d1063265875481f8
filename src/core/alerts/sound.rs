// Alert sound playback.
//
// Playing is fire-and-forget from the board's point of view: any error is
// logged and dropped there, never retried.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::error::SoundError;

/// Something that can play the alert sound once.
pub trait AlertSink {
    fn play(&self) -> Result<(), SoundError>;
}

impl<T: AlertSink + ?Sized> AlertSink for Box<T> {
    fn play(&self) -> Result<(), SoundError> {
        (**self).play()
    }
}

/// Writes the terminal bell character to stderr.
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play(&self) -> Result<(), SoundError> {
        let mut err = io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}

/// Plays nothing.
pub struct Silent;

impl AlertSink for Silent {
    fn play(&self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Plays the configured sound file, or a short tone, on the default output device.
#[cfg(feature = "audio")]
pub struct RodioPlayer {
    file: Option<PathBuf>,
}

#[cfg(feature = "audio")]
impl RodioPlayer {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }
}

#[cfg(feature = "audio")]
impl AlertSink for RodioPlayer {
    fn play(&self) -> Result<(), SoundError> {
        use std::fs::File;
        use std::io::BufReader;
        use std::time::Duration;

        use rodio::source::{SineWave, Source};
        use rodio::{Decoder, OutputStreamBuilder, Sink};

        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| SoundError::Output(e.to_string()))?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());

        match &self.file {
            Some(path) => {
                let file = File::open(path)?;
                let source = Decoder::new(BufReader::new(file))
                    .map_err(|e| SoundError::Decode(e.to_string()))?;
                sink.append(source);
            }
            None => {
                let tone = SineWave::new(880.0)
                    .take_duration(Duration::from_millis(350))
                    .amplify(0.25);
                sink.append(tone);
            }
        }

        sink.sleep_until_end();
        Ok(())
    }
}

/// Pick the sink for the current build and settings.
pub fn from_settings(enabled: bool, file: Option<PathBuf>) -> Box<dyn AlertSink> {
    if !enabled {
        return Box::new(Silent);
    }

    #[cfg(feature = "audio")]
    {
        Box::new(RodioPlayer::new(file))
    }

    #[cfg(not(feature = "audio"))]
    {
        if let Some(path) = file {
            log::debug!("Built without audio support, ignoring sound file {:?}", path);
        }
        Box::new(TerminalBell)
    }
}
