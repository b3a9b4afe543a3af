use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the synthetic page, walk scroll positions over time and print the final state.
    Simulate(SimulateArgs),
    /// Print both theme token sets.
    Themes,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Stage config JSON. Defaults match the shipped page.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme override.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Viewport height override, in px.
    #[arg(long)]
    viewport_height: Option<f64>,

    /// Scroll offsets to visit, in order. Time is split evenly between them.
    #[arg(long = "scroll", num_args = 1..)]
    scroll: Vec<f64>,

    /// Simulated wall-clock duration.
    #[arg(long, default_value_t = 5000)]
    until_ms: u64,

    /// Frame interval.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for scrollreel::ThemeName {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::Dark,
            ThemeChoice::Light => Self::Light,
        }
    }
}

#[derive(serde::Serialize)]
struct Report {
    theme: scrollreel::ThemeName,
    time_ms: u64,
    scroll: f64,
    scroll_height: f64,
    targets: std::collections::BTreeMap<String, scrollreel::TargetSnapshot>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Themes => cmd_themes(),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => scrollreel::StageConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => scrollreel::StageConfig::default(),
    };
    if let Some(theme) = args.theme {
        config.theme = theme.into();
    }
    if let Some(vh) = args.viewport_height {
        config.viewport_height = vh;
    }
    config.validate().context("validate config")?;
    anyhow::ensure!(args.frame_ms > 0, "--frame-ms must be > 0");

    let theme = scrollreel::Theme::by_name(config.theme);
    let (mut stage, targets) =
        scrollreel::synthetic_page(&config, &theme).context("lay out synthetic page")?;
    let page = scrollreel::Page::mount(&mut stage, &targets, &config, &theme)
        .context("mount page")?;

    let stops = if args.scroll.is_empty() {
        vec![0.0]
    } else {
        args.scroll.clone()
    };
    let segment = args.until_ms / stops.len() as u64;
    let mut now = 0u64;
    stage.tick(scrollreel::Millis(now));
    for (i, &offset) in stops.iter().enumerate() {
        stage.scroll_to(offset);
        let segment_end = if i + 1 == stops.len() {
            args.until_ms
        } else {
            segment * (i as u64 + 1)
        };
        while now < segment_end {
            now = (now + args.frame_ms).min(segment_end);
            stage.tick(scrollreel::Millis(now));
        }
    }

    let report = Report {
        theme: config.theme,
        time_ms: now,
        scroll: stage.scroll(),
        scroll_height: stage.scroll_height(),
        targets: stage.targets().snapshot(),
    };
    page.unmount(&mut stage);

    let out = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{out}");
    Ok(())
}

fn cmd_themes() -> anyhow::Result<()> {
    let themes: Vec<_> = scrollreel::ThemeName::ALL
        .into_iter()
        .map(scrollreel::Theme::by_name)
        .collect();
    let out = serde_json::to_string_pretty(&themes).context("serialize themes")?;
    println!("{out}");
    Ok(())
}
