//! well-portal CLI: terminal dashboard and one-shot queries for a well.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use well_portal::api::{PortalClient, SearchMode};
use well_portal::config::PortalConfig;
use well_portal::paths::PortalPaths;
use well_portal::point::{Layer, Stage};
use well_portal::spiral::{self, FilterState, LayerFilter, LayoutConfig, StageFilter};

#[derive(Parser)]
#[command(name = "wellport", version, about = "Terminal well portal")]
struct Cli {
    /// Base URL of the well backend.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Well identifier.
    #[arg(long, global = true)]
    well: Option<String>,

    /// Config file path (defaults to the XDG location).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the dashboard (the default when no command is given).
    Dash,

    /// Fetch the spiral points, run the pipeline, and print them.
    Spiral {
        /// Restrict to one stage.
        #[arg(long, value_enum)]
        stage: Option<StageArg>,

        /// Restrict to one layer.
        #[arg(long, value_enum)]
        layer: Option<LayerArg>,

        /// Tag substring filter.
        #[arg(long, default_value = "")]
        tag: String,

        /// Emit positioned points as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Ask the well a question.
    Ask {
        /// The question text.
        question: String,
    },

    /// Search the well's documents.
    Docs {
        /// The search query.
        query: String,

        /// Literal or semantic matching.
        #[arg(long, value_enum, default_value_t = SearchMode::Literal)]
        mode: SearchMode,
    },

    /// Print the well overview report.
    Overview,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StageArg {
    Interpret,
    Reflect,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LayerArg {
    Raw,
    Truth,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => PortalPaths::resolve().into_diagnostic()?.config_file(),
    };
    let mut config = PortalConfig::load(&config_path)
        .into_diagnostic()?
        .apply_env();
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(well) = cli.well {
        config.well_id = well;
    }

    match cli.command.unwrap_or(Commands::Dash) {
        Commands::Dash => well_portal::tui::launch(&config),

        Commands::Spiral {
            stage,
            layer,
            tag,
            json,
        } => {
            let client = PortalClient::new(&config.base_url, config.timeout());
            let points = client
                .fetch_spiral(&config.well_id, &config.spiral_stage)
                .into_diagnostic()?;

            let state = FilterState {
                stage: match stage {
                    None => StageFilter::Both,
                    Some(StageArg::Interpret) => StageFilter::Only(Stage::Interpret),
                    Some(StageArg::Reflect) => StageFilter::Only(Stage::Reflect),
                },
                layer: match layer {
                    None => LayerFilter::Both,
                    Some(LayerArg::Raw) => LayerFilter::Only(Layer::Raw),
                    Some(LayerArg::Truth) => LayerFilter::Only(Layer::Truth),
                },
                tag,
                tag_case: config.tag_case,
            };
            let positioned = spiral::pipeline(&points, &state, &LayoutConfig::default());

            if json {
                let out = serde_json::to_string_pretty(&positioned).into_diagnostic()?;
                println!("{out}");
            } else {
                println!(
                    "{} of {} points for {} (stage: {}, layer: {}, tag: \"{}\")",
                    positioned.len(),
                    points.len(),
                    config.well_id,
                    state.stage,
                    state.layer,
                    state.tag
                );
                for p in &positioned {
                    println!(
                        "  {}  ({:7.2}, {:7.2})  [{}/{}]  {}",
                        p.point.timestamp.format("%Y-%m-%d %H:%M"),
                        p.x,
                        p.y,
                        p.point.stage,
                        p.point.layer,
                        p.point.summary
                    );
                }
            }
            Ok(())
        }

        Commands::Ask { question } => {
            let client = PortalClient::new(&config.base_url, config.timeout());
            let answer = client
                .query_well(&config.well_id, &question)
                .into_diagnostic()?;
            println!("{answer}");
            Ok(())
        }

        Commands::Docs { query, mode } => {
            let client = PortalClient::new(&config.base_url, config.timeout());
            let hits = client
                .search_docs(&config.well_id, &query, mode)
                .into_diagnostic()?;
            if hits.is_empty() {
                println!("No documents matched \"{query}\" ({mode}).");
            } else {
                for hit in &hits {
                    println!("{}", hit.snippet);
                    println!("  {}", hit.date);
                }
            }
            Ok(())
        }

        Commands::Overview => {
            let client = PortalClient::new(&config.base_url, config.timeout());
            let ov = client.fetch_overview(&config.well_id).into_diagnostic()?;
            println!("Well: {}", config.well_id);
            println!("  operator: {}", ov.operator);
            println!("  district: {}", ov.district);
            println!("  field:    {}", ov.field);
            println!("  uptime:   {:.1}%", ov.uptime);
            println!("  downtime: {:.1}%", ov.downtime);
            if !ov.tags.is_empty() {
                println!("  top tags: {}", ov.tags.join(", "));
            }
            if !ov.reflection.is_empty() {
                println!("  reflection: {}", ov.reflection);
            }
            Ok(())
        }
    }
}
