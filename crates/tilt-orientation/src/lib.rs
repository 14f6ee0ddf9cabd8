//! Device orientation to UI rotation.
//!
//! [`transform::compute`] is the pure per-sample step, [`session`] keeps the
//! pivot reading, and [`OrientationClient`] feeds a live sample stream
//! through both. Rotations render as CSS via `Display`, or as `glam`
//! quaternions/matrices via [`RotationDescriptor::to_quat`] and
//! [`RotationDescriptor::to_mat4`] for native renderers.

pub mod protocol;
pub mod session;
pub mod transform;
pub mod types;

use anyhow::Result;
use protocol::SampleParser;
use session::OrientationSession;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use types::{OrientationSample, RotationDescriptor, TransformConfig};

/// Commands sent to the sample processing task.
enum SessionCommand {
    ResetPivot,
}

/// Latest published state, as read by the rendering side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSnapshot {
    /// Raw device orientation.
    pub origin: OrientationSample,
    /// Orientation relative to the pivot.
    pub orientation: OrientationSample,
    /// `None` until the first sample arrives.
    pub rotation: Option<RotationDescriptor>,
    /// Samples processed so far.
    pub samples: u64,
}

impl OrientationSnapshot {
    /// CSS `transform` value. `none` until the first sample.
    pub fn transform_css(&self) -> String {
        match &self.rotation {
            Some(rotation) => rotation.to_string(),
            None => "none".to_string(),
        }
    }
}

impl Default for OrientationSnapshot {
    fn default() -> Self {
        Self {
            origin: OrientationSample::ZERO,
            orientation: OrientationSample::ZERO,
            rotation: None,
            samples: 0,
        }
    }
}

/// Subscription to an orientation sample source.
///
/// Reads the sample stream on a background task, runs every sample through
/// an [`OrientationSession`] and publishes the latest snapshot. Dropping the
/// client stops the task, so no sample is processed after teardown.
pub struct OrientationClient {
    snapshot_rx: watch::Receiver<OrientationSnapshot>,
    command_tx: tokio::sync::mpsc::UnboundedSender<SessionCommand>,
    task: tokio::task::JoinHandle<()>,
}

impl OrientationClient {
    /// Connect to a sample producer over TCP.
    pub async fn connect(addr: &str, config: TransformConfig) -> Result<Self> {
        tracing::info!(%addr, "Connecting to orientation source");

        let stream = TcpStream::connect(addr).await?;
        tracing::info!("Connected to orientation source");

        Ok(Self::from_reader(stream, config))
    }

    /// Start processing samples from any byte stream.
    pub fn from_reader<R>(reader: R, config: TransformConfig) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (snapshot_tx, snapshot_rx) = watch::channel(OrientationSnapshot::default());
        let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();

        let task = tokio::spawn(sample_read_loop(reader, snapshot_tx, command_rx, config));

        Self {
            snapshot_rx,
            command_tx,
            task,
        }
    }

    /// Client for an environment without orientation sensing.
    ///
    /// The snapshot stays at its defaults forever.
    pub fn unsupported() -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(OrientationSnapshot::default());
        let (command_tx, _) = tokio::sync::mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            // Keep the sender alive.
            let _tx = snapshot_tx;
            std::future::pending::<()>().await;
        });
        Self {
            snapshot_rx,
            command_tx,
            task,
        }
    }

    /// Get the latest snapshot (non-blocking).
    pub fn snapshot(&self) -> OrientationSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<OrientationSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Make the next sample the new pivot.
    ///
    /// Nothing is republished until that sample arrives.
    pub fn reset_pivot_orientation(&self) {
        let _ = self.command_tx.send(SessionCommand::ResetPivot);
    }
}

impl Drop for OrientationClient {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Background task: read the stream, parse samples, run the session, publish.
async fn sample_read_loop<R>(
    mut reader: R,
    snapshot_tx: watch::Sender<OrientationSnapshot>,
    mut command_rx: tokio::sync::mpsc::UnboundedReceiver<SessionCommand>,
    config: TransformConfig,
) where
    R: AsyncRead + Unpin,
{
    let mut parser = SampleParser::new();
    let mut session = OrientationSession::new(config);
    let mut buf = [0u8; 4096];
    let mut sample_count: u64 = 0;

    loop {
        tokio::select! {
            // Commands first, so a reset applies to bytes already pending.
            biased;

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    SessionCommand::ResetPivot => session.reset(),
                }
            }
            result = reader.read(&mut buf) => {
                match result {
                    Ok(0) => {
                        tracing::warn!("Orientation source closed");
                        break;
                    }
                    Ok(n) => {
                        parser.push_data(&buf[..n]);

                        // Drain all available samples.
                        while let Some(result) = parser.next_sample() {
                            match result {
                                Ok(raw) => {
                                    let transformed = session.on_sample(raw);
                                    sample_count += 1;
                                    let _ = snapshot_tx.send(OrientationSnapshot {
                                        origin: raw,
                                        orientation: transformed.corrected,
                                        rotation: Some(transformed.rotation),
                                        samples: sample_count,
                                    });
                                    if sample_count % 1000 == 0 {
                                        tracing::debug!(sample_count, "Orientation samples processed");
                                    }
                                }
                                Err(e) => {
                                    tracing::trace!(?e, "Skipping malformed sample");
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(?e, "Orientation source read error");
                        break;
                    }
                }
            }
        }
    }
}
