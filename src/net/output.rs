use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Where user-facing text goes. The game core only ever calls `display`.
pub trait MessageSink {
    fn display(&mut self, message: &str);
}

/// Collects messages in memory
impl MessageSink for Vec<String> {
    fn display(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutFrame {
    /// Regular "in-game" text line
    Line(String),
    /// Input prompt, written without a newline
    Prompt(String),
}

#[derive(Debug, Clone)]
pub struct OutputHandle {
    tx: mpsc::UnboundedSender<(OutFrame, u64)>,
    next_seq: Arc<AtomicU64>,
}

impl OutputHandle {
    pub fn new(tx: mpsc::UnboundedSender<(OutFrame, u64)>) -> Self {
        Self {
            tx,
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a handle together with the writer that drains it.
    pub fn channel() -> (Self, SessionOut) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), SessionOut::new(rx))
    }

    #[inline]
    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn send(&self, frame: OutFrame) {
        // Writer gone means the host is shutting down; nothing left to show
        let _ = self.tx.send((frame, self.next_seq()));
    }

    pub fn line(&self, s: impl Into<String>) {
        self.send(OutFrame::Line(s.into()));
    }

    pub fn prompt(&self, s: impl Into<String>) {
        self.send(OutFrame::Prompt(s.into()));
    }
}

impl MessageSink for OutputHandle {
    fn display(&mut self, message: &str) {
        self.line(message);
    }
}

/// Drains an `OutputHandle` into a writer. Holds no game state.
pub struct SessionOut {
    rx: mpsc::UnboundedReceiver<(OutFrame, u64)>,
}

impl SessionOut {
    pub fn new(rx: mpsc::UnboundedReceiver<(OutFrame, u64)>) -> Self {
        Self { rx }
    }

    /// Runs until every `OutputHandle` is dropped.
    pub async fn run<W>(mut self, mut writer: W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut last_seq = 0;
        while let Some((frame, seq)) = self.rx.recv().await {
            debug_assert!(seq > last_seq, "output frames out of order");
            last_seq = seq;

            match frame {
                OutFrame::Line(s) => {
                    writer.write_all(s.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                }
                OutFrame::Prompt(s) => {
                    writer.write_all(s.as_bytes()).await?;
                }
            }
            writer.flush().await?;
        }

        Ok(())
    }
}
