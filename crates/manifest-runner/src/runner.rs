//! The JSON-lines turn loop.
//!
//! Reads one [`TurnRequest`] per input line and writes exactly one output
//! line per non-blank input line:
//!
//! ```text
//! {"ok": <TurnResponse>}      turn processed (possibly on the fallback)
//! {"error": "<message>"}      line was not a request, or failed validation
//! ```
//!
//! A bad line never stops the loop. Only stream I/O failures do.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use manifest_core::{Clock, ManifestationEngine, SystemClock, TextCompletion};
use manifest_types::{TurnRequest, TurnResponse};

use crate::error::RunnerError;

/// One output line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum TurnOutcome {
    Ok(Box<TurnResponse>),
    Error(String),
}

/// Drives a [`ManifestationEngine`] over a line-oriented stream.
#[derive(Debug)]
pub struct TurnRunner<C, K: Clock = SystemClock> {
    engine: ManifestationEngine<C, K>,
}

impl<C: TextCompletion, K: Clock> TurnRunner<C, K> {
    /// Runner over `engine`.
    pub const fn new(engine: ManifestationEngine<C, K>) -> Self {
        Self { engine }
    }

    /// Answer one input line, or `None` for a blank line.
    pub async fn handle_line(&self, line: &str) -> Option<Result<String, RunnerError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let outcome = match serde_json::from_str::<TurnRequest>(line) {
            Err(e) => {
                warn!(error = %e, "unparseable turn request");
                TurnOutcome::Error(format!("invalid request: {e}"))
            }
            Ok(request) => match self.engine.process_turn(&request).await {
                Ok(response) => TurnOutcome::Ok(Box::new(response)),
                Err(e) => TurnOutcome::Error(e.to_string()),
            },
        };
        Some(serde_json::to_string(&outcome).map_err(RunnerError::from))
    }

    /// Process `reader` to end of input, writing to `writer`.
    ///
    /// Returns the number of lines answered.
    pub async fn run<R, W>(&self, reader: R, writer: &mut W) -> Result<usize, RunnerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut answered: usize = 0;

        while let Some(line) = lines.next_line().await? {
            let Some(output) = self.handle_line(&line).await else {
                continue;
            };
            let output = output?;
            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            answered = answered.saturating_add(1);
            debug!(answered, "turn answered");
        }

        Ok(answered)
    }
}

#[cfg(test)]
mod tests {
    use manifest_core::EngineConfig;

    use super::*;
    use crate::llm::{LlmBackend, create_backend};

    #[allow(clippy::unwrap_used)]
    fn runner() -> TurnRunner<LlmBackend> {
        let engine =
            ManifestationEngine::from_config(EngineConfig::default(), create_backend(None));
        TurnRunner::new(engine.unwrap())
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).unwrap_or_default()
    }

    #[tokio::test]
    async fn one_output_line_per_request() {
        let input = concat!(
            r#"{"conversationHistory": [], "userMessage": "I want more money"}"#,
            "\n",
            "\n",
            "not json\n",
            r#"{"userMessage": "   "}"#,
            "\n",
        );
        let mut output = Vec::new();
        let answered = runner().run(input.as_bytes(), &mut output).await;
        assert_eq!(answered.ok(), Some(3));

        let text = String::from_utf8(output).unwrap_or_default();
        let lines: Vec<serde_json::Value> = text.lines().map(parse).collect();
        assert_eq!(lines.len(), 3);

        let ok = lines.first().and_then(|l| l.get("ok"));
        assert_eq!(
            ok.and_then(|r| r.get("extractedData"))
                .and_then(|d| d.get("coreDesire"))
                .and_then(serde_json::Value::as_str),
            Some("financial abundance")
        );
        assert_eq!(
            ok.and_then(|r| r.get("responseSource"))
                .and_then(serde_json::Value::as_str),
            Some("fallback")
        );
        assert!(
            ok.and_then(|r| r.get("progressVelocity"))
                .is_some_and(serde_json::Value::is_number)
        );

        let error_at = |i: usize| {
            lines
                .get(i)
                .and_then(|l| l.get("error"))
                .and_then(serde_json::Value::as_str)
        };
        assert!(error_at(1).is_some_and(|e| e.starts_with("invalid request")));
        assert!(error_at(2).is_some_and(|e| e.contains("empty")));
    }

    #[tokio::test]
    async fn blank_line_is_skipped() {
        assert!(runner().handle_line("   ").await.is_none());
    }
}
