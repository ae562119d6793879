//! Agentica - agentic LLM orchestration demos
//!
//! - `chain`: three sequential, dependent calls over one conversation
//! - `countries`: interactive country information agent (default)

use agentica::{
    agent::{
        create_provider, AgentPipeline, ChainEvent, CompletionClient, PipelineEvent,
        PipelineState, SamplingParams, SequentialChainOrchestrator,
    },
    config::AppConfig,
    countries::RestCountriesClient,
    i18n::{init_locale, init_locale_with, t, Locale, Text},
    logging::{self, LogTarget},
    repl::{QueryAgent, Repl},
};
use async_trait::async_trait;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

#[derive(clap::Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Run the three-step sequential chain and print every answer
    Chain,
    /// Ask questions about countries interactively
    Countries,
}

#[derive(Parser, Debug)]
#[command(name = "agentica")]
#[command(version)]
#[command(about = "Agentic LLM orchestration demos", long_about = None)]
struct Args {
    /// Configuration file path (overrides defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to the data directory instead of stderr
    #[arg(long)]
    log_file: bool,

    /// Model identifier sent to the provider
    #[arg(long)]
    model: Option<String>,

    /// Interface and prompt language (es, en)
    #[arg(long)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // .env is optional; real environment variables win
    let dotenv_path = dotenvy::dotenv().ok();

    let mut app_config = AppConfig::load(args.config.as_deref())?;

    let target = if args.log_file {
        LogTarget::File(logging::log_path())
    } else {
        LogTarget::Console
    };
    logging::init(&target, args.verbose || app_config.debug)?;

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    if let Some(model) = args.model {
        app_config.model.model = model;
    }
    if let Some(lang) = args.lang {
        app_config.language = Some(lang);
    }
    app_config.validate()?;

    let locale = match app_config.language.as_deref() {
        Some(lang) => init_locale_with(Locale::from_setting(lang)),
        None => init_locale(),
    };
    tracing::info!("Using locale: {} ({})", locale.display_name(), locale.code());

    // Missing credentials abort startup before any call is made
    app_config.model.require_api_key()?;

    tracing::info!(
        "Connecting to {} at {} (model {})",
        app_config.model.provider,
        app_config.model.url,
        app_config.model.model
    );
    let client = CompletionClient::from_boxed(create_provider(&app_config.model)?);
    tracing::debug!(
        "Provider ready: {} / {}",
        client.provider().provider_type(),
        client.provider().model_name()
    );

    match args.command.unwrap_or(Command::Countries) {
        Command::Chain => run_chain(client, &app_config, locale).await,
        Command::Countries => run_countries(client, &app_config, locale).await,
    }
}

async fn run_chain(
    client: CompletionClient,
    app_config: &AppConfig,
    locale: Locale,
) -> anyhow::Result<()> {
    let params = SamplingParams::new(
        app_config.model.model.as_str(),
        app_config.sampling.chain_temperature,
        app_config.sampling.max_tokens,
    )?;
    let chain = SequentialChainOrchestrator::new(client, params, locale);

    let rule = "=".repeat(80);
    println!("{}\n{}\n{}", rule, t(Text::ChainTitle), rule);

    let result = chain
        .run_with(|event| match event {
            ChainEvent::StepStarted { index, step } => {
                if index > 1 {
                    println!("\n{}", "-".repeat(80));
                }
                println!("\n{} {}] {}\n", t(Text::ChainStep), index, step.title);
            }
            ChainEvent::StepCompleted { response, .. } => {
                println!("{}{}", t(Text::ChainResponse), response);
            }
        })
        .await;

    match result {
        Ok(_) => {
            println!("\n{}\n{}\n{}", rule, t(Text::ChainSummaryTitle), rule);
            println!("\n{}", t(Text::ChainSummaryArea));
            println!("{}", t(Text::ChainSummaryProblem));
            println!("{}", t(Text::ChainSummarySolution));
            println!("\n{}", t(Text::ChainCompleted));
        }
        Err(e) => {
            // The run ends here; the process still exits cleanly
            tracing::error!("Chain failed after {} step(s): {}", e.completed.steps_completed(), e);
            eprintln!("\n{} {}: {}", t(Text::ChainAborted), e.step, e.source);
        }
    }

    Ok(())
}

/// Pipeline wrapper that prints each stage as it happens
struct ConsolePipeline {
    pipeline: AgentPipeline,
}

#[async_trait]
impl QueryAgent for ConsolePipeline {
    async fn answer(&self, query: &str) -> String {
        println!("\n{}\n", t(Text::Processing));

        let outcome = self
            .pipeline
            .run_with(query, |event| match event {
                PipelineEvent::Entered(PipelineState::Received) => {
                    println!("{}", t(Text::StepExtracting));
                }
                PipelineEvent::CountryExtracted(country) => {
                    println!("{}{}", t(Text::CountryIdentified), country);
                }
                PipelineEvent::Entered(PipelineState::CountryExtracted) => {
                    println!("{}", t(Text::StepLookup));
                }
                PipelineEvent::Entered(PipelineState::DataFetched) => {
                    println!("{}", t(Text::DataFetched));
                    println!("{}\n", t(Text::StepSynthesis));
                }
                PipelineEvent::Entered(_) => {}
            })
            .await;

        outcome.into_message()
    }
}

async fn run_countries(
    client: CompletionClient,
    app_config: &AppConfig,
    locale: Locale,
) -> anyhow::Result<()> {
    let model = app_config.model.model.as_str();
    let extraction = SamplingParams::new(
        model,
        app_config.sampling.extraction_temperature,
        app_config.sampling.max_tokens,
    )?;
    let synthesis = SamplingParams::new(
        model,
        app_config.sampling.synthesis_temperature,
        app_config.sampling.max_tokens,
    )?;

    let source = Arc::new(RestCountriesClient::new(&app_config.countries));
    tracing::info!("Country data from {}", source.base_url());

    let agent = ConsolePipeline {
        pipeline: AgentPipeline::new(client, source, extraction, synthesis, locale),
    };

    let mut repl = Repl::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        locale,
    );
    repl.banner().await?;
    let stats = repl.run(&agent).await?;
    tracing::debug!("REPL stats: {:?}", stats);

    Ok(())
}
