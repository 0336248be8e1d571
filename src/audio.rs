//! Audio output driver built on rodio
//!
//! A dedicated thread owns the output stream and sink; the rest of the
//! application talks to it through a command channel and hears back through a
//! player event channel. Decoding is rodio's job; this module never touches
//! codec details. Episode audio arrives here as already-downloaded bytes.

use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::mpsc::UnboundedSender;

const POSITION_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Commands accepted by the output thread
pub enum AudioCommand {
    /// Replace whatever is loaded with a new track.
    Load { audio: Vec<u8>, start: bool },
    Play,
    Pause,
    SeekTo(Duration),
    /// Drop the current track without reporting it as ended.
    Stop,
    Shutdown,
}

/// Events reported by the output thread
#[derive(Clone, Debug)]
pub enum PlayerEvent {
    Playing { position_secs: u32 },
    Paused { position_secs: u32 },
    Position { position_secs: u32 },
    /// The sink drained naturally (end of track).
    TrackEnded,
    Error(String),
}

/// Handle to the audio output thread
pub struct AudioBackend {
    cmd_tx: Sender<AudioCommand>,
}

impl AudioBackend {
    /// Spawn the output thread. Player events are delivered on `event_tx`.
    pub fn spawn(event_tx: UnboundedSender<PlayerEvent>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        if let Err(e) = std::thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || run_output_thread(cmd_rx, event_tx))
        {
            tracing::error!(error = %e, "Failed to spawn audio output thread");
        }

        Self { cmd_tx }
    }

    pub fn load(&self, audio: Vec<u8>, start: bool) {
        self.send(AudioCommand::Load { audio, start });
    }

    pub fn play(&self) {
        self.send(AudioCommand::Play);
    }

    pub fn pause(&self) {
        self.send(AudioCommand::Pause);
    }

    pub fn seek_to(&self, position: Duration) {
        self.send(AudioCommand::SeekTo(position));
    }

    pub fn stop(&self) {
        self.send(AudioCommand::Stop);
    }

    pub fn shutdown(&self) {
        self.send(AudioCommand::Shutdown);
    }

    fn send(&self, command: AudioCommand) {
        if self.cmd_tx.send(command).is_err() {
            tracing::warn!("Audio output thread is gone, command dropped");
        }
    }
}

fn run_output_thread(cmd_rx: Receiver<AudioCommand>, event_tx: UnboundedSender<PlayerEvent>) {
    // The stream must stay alive for as long as anything should be audible
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "No audio output device available");
            let _ = event_tx.send(PlayerEvent::Error(format!("Audio init failed: {}", e)));
            return;
        }
    };

    tracing::info!("Audio output thread started");

    let mut sink: Option<Sink> = None;
    let mut track_loaded = false;

    loop {
        match cmd_rx.recv_timeout(POSITION_POLL_INTERVAL) {
            Ok(AudioCommand::Load { audio, start }) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                track_loaded = false;

                let decoder = match Decoder::new(Cursor::new(audio)) {
                    Ok(decoder) => decoder,
                    Err(e) => {
                        tracing::error!(error = %e, "Could not decode episode audio");
                        let _ = event_tx.send(PlayerEvent::Error(format!(
                            "Could not decode episode audio: {}",
                            e
                        )));
                        continue;
                    }
                };

                let new_sink = match Sink::try_new(&handle) {
                    Ok(new_sink) => new_sink,
                    Err(e) => {
                        tracing::error!(error = %e, "Could not open audio sink");
                        let _ = event_tx
                            .send(PlayerEvent::Error(format!("Audio sink failed: {}", e)));
                        continue;
                    }
                };

                new_sink.append(decoder);
                if start {
                    new_sink.play();
                    let _ = event_tx.send(PlayerEvent::Playing { position_secs: 0 });
                } else {
                    new_sink.pause();
                    let _ = event_tx.send(PlayerEvent::Paused { position_secs: 0 });
                }

                tracing::debug!(start, "Track loaded into audio sink");
                sink = Some(new_sink);
                track_loaded = true;
            }
            Ok(AudioCommand::Play) => {
                if let Some(s) = &sink {
                    s.play();
                    let _ = event_tx.send(PlayerEvent::Playing {
                        position_secs: s.get_pos().as_secs() as u32,
                    });
                }
            }
            Ok(AudioCommand::Pause) => {
                if let Some(s) = &sink {
                    s.pause();
                    let _ = event_tx.send(PlayerEvent::Paused {
                        position_secs: s.get_pos().as_secs() as u32,
                    });
                }
            }
            Ok(AudioCommand::SeekTo(position)) => {
                if let Some(s) = &sink {
                    match s.try_seek(position) {
                        Ok(()) => {
                            let _ = event_tx.send(PlayerEvent::Position {
                                position_secs: s.get_pos().as_secs() as u32,
                            });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Seek not supported for this source");
                        }
                    }
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                track_loaded = false;
            }
            Ok(AudioCommand::Shutdown) => {
                tracing::info!("Audio output thread shutting down");
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(s) = &sink {
                    if track_loaded && s.empty() {
                        // Natural end of track
                        track_loaded = false;
                        let _ = event_tx.send(PlayerEvent::TrackEnded);
                    } else if !s.is_paused() && !s.empty() {
                        let _ = event_tx.send(PlayerEvent::Position {
                            position_secs: s.get_pos().as_secs() as u32,
                        });
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
