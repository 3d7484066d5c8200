mod cli;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colorfinder::{Metric, Palette, DEFAULT_LIMIT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "colorfinder")]
#[command(author, version, about = "Find the nearest named colors", long_about = None)]
struct Cli {
    /// JSON dataset of {"id", "color", "colorvect_l2"} records (defaults to the built-in CSS colors)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Bincode palette snapshot; takes precedence over --dataset
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Maximum number of matches per search
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Distance reported for each match: squared or euclidean
    /// (defaults to the snapshot's metric, otherwise squared)
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a single color, e.g. `find 255 128 0` or `find '#ff8000'`
    Find {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        color: Vec<String>,
    },

    /// Serve the JSON API
    Serve {
        #[arg(short, long, default_value = "0.0.0.0:7878")]
        bind: String,
    },

    /// Write the loaded palette to a bincode snapshot
    Snapshot {
        path: PathBuf,
    },
}

fn load_palette(cli: &Cli) -> Result<Palette> {
    let palette = if let Some(path) = &cli.snapshot {
        Palette::load(path)
            .with_context(|| format!("failed to load snapshot '{}'", path.display()))?
    } else if let Some(path) = &cli.dataset {
        Palette::load_json(path)
            .with_context(|| format!("failed to load dataset '{}'", path.display()))?
    } else {
        Palette::builtin().context("built-in dataset is invalid")?
    };

    Ok(match cli.metric {
        Some(metric) => palette.with_metric(metric),
        None => palette,
    })
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let palette = load_palette(&cli)?;

    match cli.command {
        None => {
            let stdin = std::io::stdin();
            cli::run_repl(&palette, cli.limit, stdin.lock(), &mut std::io::stdout())?;
        }

        Some(Commands::Find { color }) => {
            cli::find(&palette, cli.limit, &color.join(" "), &mut std::io::stdout())?;
        }

        Some(Commands::Serve { bind }) => {
            tracing::info!(%bind, records = palette.count(), "starting color server");
            let palette = web::Data::new(palette);
            HttpServer::new(move || {
                App::new()
                    .app_data(palette.clone())
                    .configure(colorfinder::server::config)
            })
            .bind(bind.as_str())
            .with_context(|| format!("failed to bind '{}'", bind))?
            .run()
            .await?;
        }

        Some(Commands::Snapshot { path }) => {
            palette
                .save(&path)
                .with_context(|| format!("failed to write snapshot '{}'", path.display()))?;
            println!("Palette saved to '{}' ({} colors)", path.display(), palette.count());
        }
    }

    Ok(())
}

#[cfg(test)]
mod main_test {
    use super::*;
    use colorfinder::{Candidate, Color};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot(metric: Metric) -> NamedTempFile {
        let mut palette = Palette::new().with_metric(metric);
        palette.insert(Candidate::new("snap", "from snapshot", Color::new(1, 2, 3)));

        let temp = NamedTempFile::new().unwrap();
        palette.save(temp.path()).unwrap();
        temp
    }

    fn dataset() -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"[{{"id": "json", "color": "from dataset", "colorvect_l2": [4, 5, 6]}}]"#)
            .unwrap();
        temp
    }

    fn load(args: &[&str]) -> Palette {
        let cli = Cli::try_parse_from(std::iter::once("colorfinder").chain(args.iter().copied()))
            .unwrap();
        load_palette(&cli).unwrap()
    }

    fn ids(palette: &Palette) -> Vec<String> {
        palette.candidates().iter().filter_map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_snapshot_wins_over_dataset() {
        let snap = snapshot(Metric::SquaredEuclidean);
        let json = dataset();

        let palette = load(&[
            "--snapshot", snap.path().to_str().unwrap(),
            "--dataset", json.path().to_str().unwrap(),
        ]);
        assert_eq!(ids(&palette), vec!["snap"]);
    }

    #[test]
    fn test_dataset_wins_over_builtin() {
        let json = dataset();

        let palette = load(&["--dataset", json.path().to_str().unwrap()]);
        assert_eq!(ids(&palette), vec!["json"]);
    }

    #[test]
    fn test_builtin_when_no_source_given() {
        let palette = load(&[]);
        assert_eq!(palette.count(), Palette::builtin().unwrap().count());
        assert_eq!(palette.metric(), Metric::SquaredEuclidean);
    }

    #[test]
    fn test_metric_flag_is_applied() {
        let json = dataset();

        let palette = load(&["--dataset", json.path().to_str().unwrap(), "--metric", "euclidean"]);
        assert_eq!(palette.metric(), Metric::Euclidean);
    }

    #[test]
    fn test_snapshot_metric_kept_without_flag() {
        let snap = snapshot(Metric::Euclidean);
        let path = snap.path().to_str().unwrap();

        assert_eq!(load(&["--snapshot", path]).metric(), Metric::Euclidean);
        assert_eq!(
            load(&["--snapshot", path, "--metric", "squared"]).metric(),
            Metric::SquaredEuclidean
        );
    }

    #[test]
    fn test_unknown_metric_rejected() {
        assert!(Cli::try_parse_from(["colorfinder", "--metric", "cosine"]).is_err());
    }
}
