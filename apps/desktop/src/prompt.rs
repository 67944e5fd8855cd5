//! Line-oriented prompting on an async reader.

use std::io::Write;

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, Lines},
    sync::Mutex,
};

pub struct Prompt<R> {
    lines: Mutex<Lines<R>>,
}

impl<R> Prompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// Prints `label` and reads one line. `None` once input is exhausted.
    pub async fn ask(&self, label: &str) -> Option<String> {
        print!("{label}");
        let _ = std::io::stdout().flush();
        match self.lines.lock().await.next_line().await {
            Ok(line) => line.map(|l| l.trim_end_matches('\r').to_string()),
            Err(error) => {
                tracing::warn!(%error, "failed to read input");
                None
            }
        }
    }

    /// Yes/no question; anything but an explicit yes counts as no.
    pub async fn confirm(&self, question: &str) -> bool {
        self.ask(&format!("{question} [y/N] "))
            .await
            .is_some_and(|answer| is_yes(&answer))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
