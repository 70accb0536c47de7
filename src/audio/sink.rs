//! Output device backed by `rodio`.
//!
//! The output stream is opened lazily on `init`, preferring the first track's
//! sample rate. Each track gets its own `Sink` connected to the stream mixer; rodio
//! converts later tracks to the stream rate if theirs differs.

use std::fmt::Display;
use std::sync::Arc;
use std::thread;

use rodio::cpal::BufferSize;
use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};

use crate::error::DeviceError;

use super::backend::OutputDevice;
use super::decoder::RodioStream;
use super::types::{Completion, DeviceConfig};

#[derive(Default)]
pub struct RodioDevice {
    output: Option<OutputStream>,
    sink: Option<Arc<Sink>>,
}

impl RodioDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One way of opening the output, labelled for the log.
pub(super) type Attempt<'a, T, E> = (&'static str, Box<dyn FnOnce() -> Result<T, E> + 'a>);

/// Run `attempts` in order and keep the first one that opens.
pub(super) fn first_open<'a, T, E: Display>(
    attempts: impl IntoIterator<Item = Attempt<'a, T, E>>,
) -> Result<T, DeviceError> {
    let mut last = None;
    for (how, attempt) in attempts {
        match attempt() {
            Ok(opened) => {
                if last.is_some() {
                    tracing::info!(how, "output opened on fallback");
                }
                return Ok(opened);
            }
            Err(e) => {
                tracing::warn!(how, error = %e, "output rejected");
                last = Some(e.to_string());
            }
        }
    }
    Err(DeviceError::Init(
        last.unwrap_or_else(|| "no output to open".to_string()),
    ))
}

/// Open the default output at the first track's rate with a fixed buffer.
/// When the device rejects that, let rodio pick another supported config,
/// then settle for the device default.
fn open_output(config: DeviceConfig) -> Result<OutputStream, DeviceError> {
    let preferred = || {
        OutputStreamBuilder::from_default_device().map(|b| {
            b.with_sample_rate(config.sample_rate)
                .with_buffer_size(BufferSize::Fixed(config.buffer_frames))
        })
    };
    let attempts: [Attempt<'_, OutputStream, StreamError>; 3] = [
        (
            "fixed buffer at track rate",
            Box::new(|| preferred()?.open_stream()),
        ),
        (
            "supported config",
            Box::new(|| preferred()?.open_stream_or_fallback()),
        ),
        ("device default", Box::new(OutputStreamBuilder::open_default_stream)),
    ];

    let mut stream = first_open(attempts)?;
    // rodio logs to stderr when OutputStream is dropped.
    stream.log_on_drop(false);
    Ok(stream)
}

impl OutputDevice for RodioDevice {
    type Stream = RodioStream;

    fn init(&mut self, config: DeviceConfig) -> Result<(), DeviceError> {
        if self.output.is_some() {
            tracing::warn!("output device already initialized; keeping the open stream");
            return Ok(());
        }
        let stream = open_output(config)?;
        tracing::info!(
            sample_rate = config.sample_rate,
            buffer_frames = config.buffer_frames,
            "output device initialized"
        );
        self.output = Some(stream);
        Ok(())
    }

    fn play(&mut self, stream: RodioStream, done: Completion) -> Result<(), DeviceError> {
        self.release();
        let Some(output) = self.output.as_ref() else {
            return Err(DeviceError::Play("output device not initialized".to_string()));
        };

        let sink = Arc::new(Sink::connect_new(output.mixer()));
        sink.append(stream);

        // rodio has no end-of-queue callback; a watcher blocks on the sink
        // instead. It also returns when the sink is stopped, after the race is
        // decided, where the notification goes nowhere.
        let watcher = Arc::clone(&sink);
        thread::Builder::new()
            .name("pomorad-track-end".to_string())
            .spawn(move || {
                watcher.sleep_until_end();
                done.complete();
            })
            .map_err(|e| DeviceError::Play(e.to_string()))?;

        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.stop();
        }
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
