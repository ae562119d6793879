//! Line-oriented read-evaluate-print loop for the countries agent

use crate::agent::AgentPipeline;
use crate::i18n::{tr, Locale, Text};
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reserved inputs that end the loop (compared case-insensitively)
pub const EXIT_TOKENS: [&str; 3] = ["salir", "exit", "quit"];

/// True only when the trimmed line is exactly one of [`EXIT_TOKENS`]
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_TOKENS.iter().any(|token| line.eq_ignore_ascii_case(token))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCommand<'a> {
    Exit,
    Empty,
    Query(&'a str),
}

pub fn classify_line(line: &str) -> LineCommand<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineCommand::Empty
    } else if is_exit_command(trimmed) {
        LineCommand::Exit
    } else {
        LineCommand::Query(trimmed)
    }
}

/// Anything that turns a query into the text shown after the agent label
#[async_trait]
pub trait QueryAgent: Send + Sync {
    async fn answer(&self, query: &str) -> String;
}

#[async_trait]
impl QueryAgent for AgentPipeline {
    async fn answer(&self, query: &str) -> String {
        self.run(query).await.into_message()
    }
}

/// Counters collected over one loop session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplStats {
    /// Queries that went through the agent
    pub completed_runs: usize,
    /// Empty or whitespace-only lines that were rejected
    pub rejected_empty: usize,
}

pub struct Repl<R, W> {
    reader: R,
    writer: W,
    locale: Locale,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, locale: Locale) -> Self {
        Self {
            reader,
            writer,
            locale,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Title, features and example questions
    pub async fn banner(&mut self) -> io::Result<()> {
        let rule = "=".repeat(80);
        let locale = self.locale;
        let text = format!(
            "\n{rule}\n{}\n{rule}\n\n{}\n\n{}\n\n{}\n\n{}\n{rule}\n",
            tr(locale, Text::CountriesTitle),
            tr(locale, Text::CountriesIntro),
            tr(locale, Text::CountriesFeatures),
            tr(locale, Text::CountriesExamples),
            tr(locale, Text::ExitHint),
        );
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    /// Read queries until an exit token or end of input.
    ///
    /// Empty lines never reach `agent`; they are answered with a retry hint.
    pub async fn run(&mut self, agent: &dyn QueryAgent) -> io::Result<ReplStats> {
        let mut stats = ReplStats::default();
        let mut line = String::new();

        loop {
            self.write(&format!("\n{}", tr(self.locale, Text::QueryPrompt)))
                .await?;

            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                tracing::debug!("input closed");
                self.write("\n").await?;
                break;
            }

            match classify_line(&line) {
                LineCommand::Exit => break,
                LineCommand::Empty => {
                    stats.rejected_empty += 1;
                    self.write(&format!("{}\n", tr(self.locale, Text::EmptyQuery)))
                        .await?;
                }
                LineCommand::Query(query) => {
                    tracing::debug!(run = stats.completed_runs + 1, "processing query");
                    let answer = agent.answer(query).await;
                    stats.completed_runs += 1;
                    self.write(&format!(
                        "\n{}{}\n{}\n",
                        tr(self.locale, Text::AgentLabel),
                        answer,
                        "-".repeat(80)
                    ))
                    .await?;
                }
            }
        }

        self.write(&format!("\n{}\n", tr(self.locale, Text::Goodbye)))
            .await?;
        tracing::debug!(
            completed = stats.completed_runs,
            rejected = stats.rejected_empty,
            "session finished"
        );
        Ok(stats)
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_tokens() {
        for token in ["salir", "EXIT", "Quit", "  salir  \n"] {
            assert!(is_exit_command(token), "{token:?} should exit");
        }
    }

    #[test]
    fn test_exit_substrings_do_not_exit() {
        for line in ["sal", "exi", "quitar", "salir ya", "exit()", "please quit", ""] {
            assert!(!is_exit_command(line), "{line:?} should not exit");
        }
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("   \t\n"), LineCommand::Empty);
        assert_eq!(classify_line("Exit\n"), LineCommand::Exit);
        assert_eq!(
            classify_line("  capital de Francia?\n"),
            LineCommand::Query("capital de Francia?")
        );
    }
}
