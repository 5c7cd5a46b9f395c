use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use overseer::cli::{Cli, Commands};
use overseer::config;
use overseer::engine::health::check_engine_ready;
use overseer::engine::{Collaborator, GenaiEngine, StdinHuman};
use overseer::error::WorkflowError;
use overseer::workflow::architecture::{DEVELOPMENT_TEAM, OUTER_TEAM, RESEARCH_TEAM};
use overseer::workflow::{TeamDescriptor, TeamKind, TeamLevel, WorkflowManager, WorkflowSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Teams = cli.command {
        print_teams();
        return Ok(());
    }

    let config = config::load_config(&cli)?;
    tracing::info!(
        provider = ?config.provider,
        model = %config.model,
        max_round = config.max_round,
        policy = ?config.failure_policy,
        "Config loaded"
    );

    println!("🎯 UserProxy approval gates in a Society of Mind");
    println!("{}", "=".repeat(60));

    let cancel_token = CancellationToken::new();
    let collaborator = if config.offline {
        Collaborator::unavailable("offline mode requested")
    } else {
        // Both checks halt the run before any team exists.
        let descriptors =
            config::model_descriptors(&config, std::env::var("OPENAI_API_KEY").ok())?;
        check_engine_ready(config.provider, &config.ollama_url, &config.model).await?;
        tracing::info!(model = %descriptors[0].model, url = %descriptors[0].base_url, "Engine ready");

        let signal_token = cancel_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_token.cancel();
            }
        });

        Collaborator::available(
            GenaiEngine::for_descriptor(config.provider, &descriptors[0], Arc::new(StdinHuman))
                .with_cancellation(cancel_token.clone()),
        )
    };

    let mut manager = WorkflowManager::new(collaborator, WorkflowSettings::from(&config));

    let report = match manager.demonstrate_complete_workflow().await {
        Ok(report) => report,
        Err(err @ WorkflowError::TeamAborted { .. }) if cancel_token.is_cancelled() => {
            tracing::warn!("{err}");
            println!("\n🛑 Demonstration interrupted by user");
            // A stdin read left on a blocking thread would keep the runtime alive on shutdown.
            std::process::exit(130);
        }
        Err(err) => return Err(err.into()),
    };

    println!("\n📊 Workflow Report Generated:");
    println!("{}", report.to_pretty_json()?);

    if let Some(path) = &config.report_path {
        report.write_to(path)?;
        tracing::info!(path = %path.display(), "Report written");
    }

    println!("\n✅ Society of Mind demonstration completed!");
    println!("Human intervention successfully integrated at multiple levels.");

    Ok(())
}

fn print_teams() {
    let teams = [
        TeamDescriptor::new(RESEARCH_TEAM, TeamLevel::Inner, TeamKind::Research),
        TeamDescriptor::new(DEVELOPMENT_TEAM, TeamLevel::Inner, TeamKind::Development),
        TeamDescriptor::new(OUTER_TEAM, TeamLevel::Outer, TeamKind::Coordination),
    ];
    for team in &teams {
        println!("{team}");
    }
}
