//! CLI entrypoint for boardroom
//!
//! Wires the layers together and drives one meeting end to end: seed
//! directors from config, create the meeting, start it, advance through the
//! rounds and finish with a closing statement. Without a provider credential
//! the transcript is built from deterministic fallback text, which makes the
//! binary usable offline.

use anyhow::{Result, bail};
use boardroom_application::{
    AdvanceRequest, CreateMeeting, MeetingOrchestrator,
    ports::{DirectorStore, TextGenerator},
};
use boardroom_domain::{Director, DiscussionMode, Statement};
use boardroom_infrastructure::{
    ChatCompletionsGateway, ConfigLoader, InMemoryDirectorStore, InMemoryMeetingStore,
};
use clap::Parser;
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boardroom", about = "Simulated board meetings of AI directors")]
struct Cli {
    /// Discussion topic
    topic: String,

    /// Meeting title
    #[arg(short, long, default_value = "Board meeting")]
    title: String,

    /// Discussion mode: round_robin, debate, focus, free, board
    #[arg(short, long, default_value = "round_robin")]
    mode: String,

    /// Number of discussion rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Path to a config file (otherwise boardroom.toml / global config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Built-in personas used when the config seeds none.
fn default_directors() -> Vec<Director> {
    vec![
        Director::new(
            "Ada Lovelace",
            "Mathematician",
            "You are Ada Lovelace, the first programmer. You reason from first \
             principles, love analytical precision and see machines as partners \
             of the imagination.",
        )
        .with_era("Victorian England"),
        Director::new(
            "Sun Tzu",
            "Strategist",
            "You are Sun Tzu, author of The Art of War. You speak in terse \
             maxims and always look for the indirect path to victory.",
        )
        .with_era("Ancient China"),
        Director::new(
            "Cleopatra",
            "Pharaoh",
            "You are Cleopatra VII, last ruler of Ptolemaic Egypt. You are \
             charismatic, politically ruthless and think in alliances.",
        )
        .with_era("Ptolemaic Egypt"),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match ConfigLoader::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => bail!("failed to load configuration: {e}"),
    };

    let mode: DiscussionMode = match cli.mode.parse() {
        Ok(m) => m,
        Err(e) => bail!("{e}"),
    };
    let max_rounds = cli.rounds.unwrap_or(config.meeting.max_rounds);

    // === Dependency injection ===
    let directors = Arc::new(InMemoryDirectorStore::new());
    let meetings = Arc::new(InMemoryMeetingStore::new());
    let gateway = Arc::new(ChatCompletionsGateway::new(config.gateway.clone().into()));

    if !gateway.is_configured() {
        eprintln!(
            "{}",
            "No provider credential configured; statements will use fallback text."
                .yellow()
        );
    }

    let seeds: Vec<Director> = if config.directors.is_empty() {
        default_directors()
    } else {
        config.directors.iter().cloned().map(Into::into).collect()
    };

    let mut director_ids = Vec::new();
    let mut names = HashMap::new();
    for seed in seeds {
        let d = directors.insert(seed).await?;
        names.insert(d.id, d.name.clone());
        director_ids.push(d.id);
    }
    info!(directors = director_ids.len(), "directors seeded");

    let orchestrator = MeetingOrchestrator::new(directors.clone(), meetings, gateway);

    let meeting = orchestrator
        .create(CreateMeeting {
            title: cli.title.clone(),
            topic: cli.topic.clone(),
            mode,
            max_rounds,
            max_participants: config.meeting.max_participants,
            director_ids,
        })
        .await?;

    println!("{}", format!("# {}", meeting.title).bold());
    println!("Topic: {}\n", meeting.topic);

    orchestrator.start(meeting.id).await?;
    let opening = orchestrator.statements(meeting.id, None).await?;
    if let Some(s) = opening.last() {
        print_statement(s, &names);
    }

    loop {
        let current = orchestrator.meeting(meeting.id).await?;
        if current.current_round >= current.max_rounds {
            break;
        }
        let statement = orchestrator
            .advance(meeting.id, AdvanceRequest::default())
            .await?;
        print_statement(&statement, &names);
    }

    orchestrator.finish(meeting.id).await?;
    let transcript = orchestrator.statements(meeting.id, None).await?;
    if let Some(closing) = transcript.last() {
        print_statement(closing, &names);
    }

    println!(
        "\n{}",
        format!("Meeting finished after {} statements.", transcript.len()).bold()
    );
    Ok(())
}

fn print_statement(statement: &Statement, names: &HashMap<boardroom_domain::DirectorId, String>) {
    let name = names
        .get(&statement.director_id)
        .cloned()
        .unwrap_or_else(|| statement.director_id.to_string());
    let speaker = match statement.sequence_in_round as usize % 4 {
        0 => name.blue(),
        1 => name.green(),
        2 => name.magenta(),
        _ => name.cyan(),
    };
    let marker = if statement.ai_generated { "" } else { " [fallback]" };
    println!(
        "{} {}{}\n{}\n",
        format!("[round {} · {}]", statement.round_number, statement.kind).dimmed(),
        speaker.bold(),
        marker.dimmed(),
        statement.content
    );
}
