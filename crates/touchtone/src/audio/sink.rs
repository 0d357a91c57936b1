//! Rodio-backed voice
//!
//! Runs audio output on a dedicated thread, accepting commands via
//! crossbeam channels. The output stream lives on that thread because
//! platform audio handles may be `!Send`.
//!
//! Clip bytes are cached after the first read, so a same-source restart
//! decodes from memory instead of fetching the file again.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use rodio::{Decoder, OutputStreamBuilder, Sink};

use crate::error::ToneError;

use super::voice::{StartError, Voice};

/// A loaded clip: its path plus lazily read, cached bytes
struct Clip {
    path: PathBuf,
    bytes: Option<Arc<[u8]>>,
}

enum VoiceCmd {
    SetSource(PathBuf),
    Pause,
    Start(Sender<Result<(), StartError>>),
    IsFinished(Sender<bool>),
    Shutdown,
}

/// `Voice` implementation over the default audio output device
pub struct RodioVoice {
    cmd_tx: Sender<VoiceCmd>,
    thread: Option<JoinHandle<()>>,
    /// Mirror of the source loaded on the audio thread
    source: Option<PathBuf>,
}

impl RodioVoice {
    /// Open the default output device, spawning the audio thread.
    ///
    /// Blocks until the output stream is initialized (or fails).
    pub fn new() -> Result<Self, ToneError> {
        let (cmd_tx, cmd_rx) = bounded::<VoiceCmd>(16);
        let (init_tx, init_rx) = bounded::<Result<(), String>>(1);

        let thread = thread::Builder::new()
            .name("touchtone-voice".to_string())
            .spawn(move || Self::run(cmd_rx, init_tx))
            .map_err(|e| ToneError::Audio(format!("Failed to spawn voice thread: {}", e)))?;

        match init_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                cmd_tx,
                thread: Some(thread),
                source: None,
            }),
            Ok(Err(msg)) => Err(ToneError::Audio(msg)),
            Err(_) => Err(ToneError::Audio("Voice thread died during init".to_string())),
        }
    }

    fn run(cmd_rx: Receiver<VoiceCmd>, init_tx: Sender<Result<(), String>>) {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = init_tx.send(Err(format!("Failed to open audio output: {}", e)));
                return;
            }
        };
        // Drop messages would corrupt a host TUI
        stream.log_on_drop(false);
        // `stream` must outlive `sink`
        let sink = Sink::connect_new(stream.mixer());

        let _ = init_tx.send(Ok(()));

        let mut clip: Option<Clip> = None;

        for cmd in cmd_rx.iter() {
            match cmd {
                VoiceCmd::SetSource(path) => {
                    // Bytes are read lazily at start; switching sources
                    // just invalidates the cache.
                    if clip.as_ref().map(|c| c.path.as_path()) != Some(path.as_path()) {
                        clip = Some(Clip { path, bytes: None });
                    }
                }
                VoiceCmd::Pause => {
                    sink.pause();
                }
                VoiceCmd::Start(reply) => {
                    let _ = reply.send(Self::start_clip(&sink, &mut clip));
                }
                VoiceCmd::IsFinished(reply) => {
                    let _ = reply.send(sink.empty());
                }
                VoiceCmd::Shutdown => {
                    sink.stop();
                    break;
                }
            }
        }
    }

    /// Decode the current clip and start it from zero
    fn start_clip(sink: &Sink, clip: &mut Option<Clip>) -> Result<(), StartError> {
        let clip = match clip {
            Some(c) => c,
            None => return Err(StartError::Failed("no source loaded".to_string())),
        };

        let bytes = match &clip.bytes {
            Some(b) => b.clone(),
            None => {
                let data = fs::read(&clip.path)
                    .map_err(|e| StartError::Failed(format!("read {:?}: {}", clip.path, e)))?;
                let bytes: Arc<[u8]> = data.into();
                clip.bytes = Some(bytes.clone());
                bytes
            }
        };

        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| StartError::Failed(format!("decode {:?}: {}", clip.path, e)))?;

        // Restart from position zero: drop whatever is queued, then append
        sink.stop();
        sink.append(source);
        sink.play();
        Ok(())
    }
}

impl Voice for RodioVoice {
    fn pause(&mut self) {
        let _ = self.cmd_tx.send(VoiceCmd::Pause);
    }

    fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        let _ = self.cmd_tx.send(VoiceCmd::SetSource(path.to_path_buf()));
    }

    fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn rewind(&mut self) {
        // start_clip always begins from zero; nothing to do here
    }

    fn start(&mut self) -> Result<(), StartError> {
        let (reply_tx, reply_rx) = bounded(1);
        if self.cmd_tx.send(VoiceCmd::Start(reply_tx)).is_err() {
            return Err(StartError::Blocked);
        }
        // The audio thread going away mid-request reads as a platform
        // refusal; the next gesture gets a fresh attempt.
        reply_rx.recv().unwrap_or(Err(StartError::Blocked))
    }

    fn is_finished(&self) -> bool {
        let (reply_tx, reply_rx) = bounded(1);
        if self.cmd_tx.send(VoiceCmd::IsFinished(reply_tx)).is_err() {
            return false;
        }
        reply_rx.recv().unwrap_or(false)
    }
}

impl Drop for RodioVoice {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(VoiceCmd::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
