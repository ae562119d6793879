//! Interactive loop driven from in-memory input

mod common;

use agentica::agent::AgentPipeline;
use agentica::logging::default_filter;
use agentica::repl::{QueryAgent, Repl, ReplStats};
use agentica::Locale;
use async_trait::async_trait;
use common::{client, france, params, ScriptedProvider, StubCountrySource};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Records every query it is asked
#[derive(Default)]
struct RecordingAgent {
    queries: Mutex<Vec<String>>,
}

impl RecordingAgent {
    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryAgent for RecordingAgent {
    async fn answer(&self, query: &str) -> String {
        self.queries.lock().unwrap().push(query.to_string());
        format!("answer to {query}")
    }
}

async fn drive(input: &str, agent: &dyn QueryAgent, locale: Locale) -> (ReplStats, String) {
    let mut repl = Repl::new(input.as_bytes(), Vec::new(), locale);
    let stats = repl.run(agent).await.unwrap();
    let output = String::from_utf8(repl.into_writer()).unwrap();
    (stats, output)
}

#[tokio::test]
async fn test_each_exit_token_ends_the_loop() {
    for token in ["salir", "exit", "quit", "SALIR", "Exit", "  QuIt  "] {
        let agent = RecordingAgent::default();
        let input = format!("{token}\nFrance\n");

        let (stats, output) = drive(&input, &agent, Locale::Spanish).await;

        assert_eq!(stats.completed_runs, 0, "{token:?}");
        assert!(agent.queries().is_empty());
        assert!(output.contains("¡Hasta luego!"));
    }
}

#[tokio::test]
async fn test_exit_substrings_are_queries() {
    let agent = RecordingAgent::default();
    let input = "sal\nexiting\nquit now\nsalir\n";

    let (stats, _) = drive(input, &agent, Locale::English).await;

    assert_eq!(stats.completed_runs, 3);
    assert_eq!(agent.queries(), vec!["sal", "exiting", "quit now"]);
}

#[tokio::test]
async fn test_empty_lines_are_rejected() {
    let agent = RecordingAgent::default();
    let input = "\n   \n\t\nFrance\n\nexit\n";

    let (stats, output) = drive(input, &agent, Locale::Spanish).await;

    assert_eq!(
        stats,
        ReplStats {
            completed_runs: 1,
            rejected_empty: 4,
        }
    );
    assert_eq!(agent.queries(), vec!["France"]);
    assert_eq!(output.matches("Por favor, escribe una consulta.").count(), 4);
}

#[tokio::test]
async fn test_end_of_input_ends_the_loop() {
    let agent = RecordingAgent::default();

    let (stats, output) = drive("Japan\n", &agent, Locale::English).await;

    assert_eq!(stats.completed_runs, 1);
    assert!(output.contains("🤖 Agent: answer to Japan"));
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_banner_lists_exit_hint() {
    let mut repl = Repl::new(&b""[..], Vec::new(), Locale::Spanish);
    repl.banner().await.unwrap();
    let output = String::from_utf8(repl.into_writer()).unwrap();

    assert!(output.contains("AGENTE INTELIGENTE DE INFORMACIÓN DE PAÍSES"));
    assert!(output.contains("Escribe 'salir' para terminar."));
}

#[tokio::test]
async fn test_pipeline_behind_the_loop() {
    let provider = ScriptedProvider::ok(&["France", "Paris is the capital.", "Xyzzyland"]);
    let source = Arc::new(
        StubCountrySource::new()
            .with_record("France", france())
            .with_status("Xyzzyland", 404),
    );
    let pipeline = AgentPipeline::new(
        client(provider.clone()),
        source,
        params(0.3),
        params(0.7),
        Locale::English,
    );

    let input = "capital of France?\n\ncapital of Xyzzyland?\nquit\n";
    let (stats, output) = drive(input, &pipeline, Locale::English).await;

    assert_eq!(stats.completed_runs, 2);
    assert_eq!(stats.rejected_empty, 1);
    assert!(output.contains("Paris is the capital."));
    assert!(output.contains("'Xyzzyland'"));
    assert_eq!(provider.calls(), 3);
}

/// Shared buffer standing in for stderr
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_default_filter_keeps_per_query_events_off_the_console() {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_filter(false)))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    // Third query exhausts the script, so its extraction call fails
    let provider = ScriptedProvider::ok(&["France", "Paris is the capital.", "Xyzzyland"]);
    let source = Arc::new(
        StubCountrySource::new()
            .with_record("France", france())
            .with_status("Xyzzyland", 404),
    );
    let pipeline = AgentPipeline::new(
        client(provider),
        source,
        params(0.3),
        params(0.7),
        Locale::English,
    );

    let input = "capital of France?\ncapital of Xyzzyland?\ncapital of Japan?\nquit\n";
    let (stats, _) = drive(input, &pipeline, Locale::English).await;
    assert_eq!(stats.completed_runs, 3);

    let log = capture.text();
    assert!(log.contains("extraction call failed"), "log was: {log}");
    for quiet in [
        "processing query",
        "country extracted",
        "country lookup failed",
        "session finished",
    ] {
        assert!(!log.contains(quiet), "{quiet:?} logged at default level: {log}");
    }
}
