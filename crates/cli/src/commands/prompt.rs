//! Terminal confirmation.

use std::io::{self, BufRead, Write};

use pokemart_storefront::shop::{Interaction, Notice, Prompt};

/// Asks y/N questions on stdin and prints notices to stdout.
#[derive(Debug)]
pub struct StdinPrompter {
    assume_yes: bool,
}

impl StdinPrompter {
    /// With `assume_yes`, every prompt is printed and answered yes.
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn read_answer() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Interaction for StdinPrompter {
    async fn confirm(&mut self, prompt: &Prompt) -> bool {
        let mut out = io::stdout();
        let _ = writeln!(out, "{}", prompt.title);
        if self.assume_yes {
            return true;
        }
        let _ = write!(out, "{} [y/N] ", prompt.text);
        let _ = out.flush();

        match tokio::task::spawn_blocking(read_answer).await {
            Ok(Ok(answer)) => is_yes(&answer),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to read answer");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt task failed");
                false
            }
        }
    }

    async fn toast(&mut self, message: &str) {
        let _ = writeln!(io::stdout(), "{message}");
    }

    async fn inform(&mut self, notice: &Notice) {
        let mut out = io::stdout();
        let _ = writeln!(out, "{}", notice.title);
        for line in &notice.lines {
            let _ = writeln!(out, "  {line}");
        }
    }
}
