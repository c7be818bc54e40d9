//! Operator confirmation

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Asks the operator a yes/no question
#[async_trait]
pub trait Confirm: Send {
    /// Ask `prompt` and block until answered. `true` means go ahead.
    async fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// `y` or `yes`, in any case and ignoring surrounding whitespace
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Line-based prompt: writes `<prompt> [y/n]: ` and reads one line
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

/// [`PromptConfirm`] on the process's terminal
pub type StdinConfirm = PromptConfirm<BufReader<Stdin>, Stdout>;

impl<R, W> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl StdinConfirm {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> Confirm for PromptConfirm<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.output
            .write_all(format!("{prompt} [y/n]: ").as_bytes())
            .await?;
        self.output.flush().await?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer).await? == 0 {
            log::warn!("No answer (end of input), treating as no");
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}
