use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio_motion::{Lifecycle as _, Scheduler as _};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a page configuration.
    Check(CheckArgs),
    /// Sample the vault intro on its own.
    Intro(IntroArgs),
    /// Replay a session script and print the trace and recorded frames.
    Simulate(SimulateArgs),
    /// Run a page without input and print frames at a fixed step.
    Drive(DriveArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input page configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct IntroArgs {
    /// Sampling step in milliseconds.
    #[arg(long, default_value_t = 100)]
    step: u64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page configuration JSON. Defaults apply when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Session script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DriveArgs {
    /// Input page configuration JSON. Defaults apply when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Stop time in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    until: u64,

    /// Frame step in milliseconds.
    #[arg(long, default_value_t = 500)]
    step: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Intro(args) => cmd_intro(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Drive(args) => cmd_drive(args),
    }
}

fn read_page_config(path: Option<&Path>) -> anyhow::Result<folio_motion::PageConfig> {
    match path {
        Some(path) => folio_motion::PageConfig::from_path(path)
            .with_context(|| format!("load page config '{}'", path.display())),
        None => Ok(folio_motion::PageConfig::default()),
    }
}

fn write_json(out: Option<&Path>, value: &serde_json::Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("write output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = read_page_config(Some(&args.in_path))?;
    eprintln!(
        "ok: {} elements, {} rotators, {} code streams, typewriter {}",
        cfg.elements.len(),
        cfg.rotators.len(),
        cfg.code_streams.len(),
        if cfg.typewriter.is_some() { "on" } else { "off" },
    );
    Ok(())
}

fn cmd_intro(args: IntroArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0, "--step must be > 0");

    let mut clock = folio_motion::VirtualClock::new();
    let mut engine =
        folio_motion::SequenceEngine::new(folio_motion::OwnerId(1), folio_motion::vault_script()?);
    let mut vault = folio_motion::VaultPresentation::new();
    engine.start(&mut clock)?;

    let end = folio_motion::VAULT_COMPLETE_AT.0;
    let mut samples = Vec::new();
    let mut t = 0;
    while t <= end {
        while let Some(fired) = clock.pop_due(folio_motion::Millis(t)) {
            let now = fired.due;
            engine.on_timer(fired.id, &mut clock, |event| {
                if let folio_motion::SequenceEvent::Stage { action, .. } = event {
                    vault.apply(action, now);
                }
            });
        }
        clock.settle(folio_motion::Millis(t))?;
        samples.push(serde_json::json!({
            "at": t,
            "frame": vault.sample(clock.now()),
        }));
        t += args.step;
    }
    write_json(None, &serde_json::Value::Array(samples))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = read_page_config(args.in_path.as_deref())?;
    let script = folio_motion::SessionScript::from_path(&args.script)
        .with_context(|| format!("load session script '{}'", args.script.display()))?;

    let mut director = folio_motion::PageDirector::mount(cfg)?;
    director.start()?;
    let frames = script.run(&mut director)?;

    let out = serde_json::json!({
        "trace": director.trace(),
        "frames": frames,
        "pending_timers": director.pending_timers(),
    });
    write_json(args.out.as_deref(), &out)
}

fn cmd_drive(args: DriveArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0, "--step must be > 0");
    let cfg = read_page_config(args.in_path.as_deref())?;

    let mut director = folio_motion::PageDirector::mount(cfg)?;
    director.start()?;
    let mut frames = Vec::new();
    let mut t = 0;
    while t <= args.until {
        director.advance_to(folio_motion::Millis(t))?;
        frames.push(director.frame());
        t += args.step;
    }
    director.teardown();

    let out = serde_json::json!({
        "frames": frames,
        "events": director.trace().len(),
    });
    write_json(None, &out)
}
