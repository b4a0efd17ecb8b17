use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vgc_doubles_agent::batch::{decide_batch, summarize, write_jsonl};
use vgc_doubles_agent::config::AgentConfig;
use vgc_doubles_agent::decision::DecisionEngine;
use vgc_doubles_agent::{load_snapshots, load_summaries};

struct CliOptions {
    config_path: Option<PathBuf>,
    snapshot_path: PathBuf,
    finished_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    seed: Option<u64>,
    debug: bool,
}

fn usage() -> ! {
    eprintln!(
        "Usage: vgc-doubles-agent --snapshot turn.json [--config agent.json] [--finished battles.json] \
[--output decisions.jsonl] [--seed SEED] [--debug]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut config_path = None;
    let mut snapshot_path = None;
    let mut finished_path = None;
    let mut output_path = None;
    let mut seed = None;
    let mut debug = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config agent.json)")
                })?);
            }
            "--snapshot" => {
                snapshot_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--snapshot requires a path (e.g. --snapshot turn.json)")
                })?);
            }
            "--finished" => {
                finished_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--finished requires a path to battle summaries")
                })?);
            }
            "--output" => {
                output_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output decisions.jsonl)")
                })?);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = Some(val.parse()?);
            }
            "--debug" => debug = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    let snapshot_path =
        snapshot_path.ok_or_else(|| anyhow::anyhow!("--snapshot is required (see --help)"))?;
    Ok(CliOptions {
        config_path,
        snapshot_path,
        finished_path,
        output_path,
        seed,
        debug,
    })
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    let default_level = if opts.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &opts.config_path {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    let seed = opts.seed.unwrap_or(config.seed);
    tracing::info!(user = %config.username, format = %config.battle_format, "agent configured");

    let mut engine = DecisionEngine::new(config);
    if let Some(path) = &opts.finished_path {
        for summary in load_summaries(path)? {
            engine.on_battle_finished(&summary);
        }
        tracing::info!(profiles = engine.profiles().len(), "opponent profiles loaded");
    }

    let snapshots = load_snapshots(&opts.snapshot_path)?;
    let decisions = decide_batch(&engine, &snapshots, seed);
    for decision in &decisions {
        println!("T{} {}", decision.turn, decision.order.to_choice_string());
        if opts.debug {
            println!("{}", serde_json::to_string_pretty(decision)?);
        }
    }
    let summary = summarize(&decisions);
    tracing::info!(
        total = summary.total,
        heuristic = summary.heuristic,
        random = summary.random,
        "decided"
    );
    if let Some(path) = &opts.output_path {
        write_jsonl(&decisions, path)?;
        println!("Wrote {} decisions to {}", decisions.len(), path.display());
    }
    Ok(())
}
