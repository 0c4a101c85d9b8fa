use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinema_player::{
    Config, Episode, EpisodeKey, PlayerProps, SourceResolver, SupabaseStorage,
};

const USAGE: &str = "\
Usage:
  cinema-player resolve <episodes.json|-> [SEASON EPISODE]
  cinema-player resolve --src <URL> [--file <NAME>]

Options:
  --config <PATH>   Configuration file (defaults to the user config directory)
";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinema_player=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();
    let command = args.subcommand()?;
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(());
    }

    let config = match args.opt_value_from_str::<_, PathBuf>("--config")? {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    match command.as_deref() {
        Some("resolve") => {
            let props = props_from_args(args)?;
            resolve(&config, &props).await
        }
        Some(other) => bail!("Unknown command '{}'\n\n{}", other, USAGE),
        None => {
            print!("{}", USAGE);
            Ok(())
        }
    }
}

fn props_from_args(mut args: pico_args::Arguments) -> Result<PlayerProps> {
    let src: Option<String> = args.opt_value_from_str("--src")?;
    let file: Option<String> = args.opt_value_from_str("--file")?;

    if let Some(src) = src {
        let mut props = PlayerProps::movie(src);
        if let Some(file) = file {
            props = props.with_stored_file(file);
        }
        return Ok(props);
    }

    let rest: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();

    let Some(catalog) = rest.first() else {
        bail!("Missing episodes file\n\n{}", USAGE);
    };
    let episodes = Episode::parse_list(&read_catalog(catalog)?)
        .with_context(|| format!("Failed to parse episodes from {}", catalog))?;

    let current = match (rest.get(1), rest.get(2)) {
        (Some(season), Some(episode)) => EpisodeKey::new(
            season.parse().context("Invalid season number")?,
            episode.parse().context("Invalid episode number")?,
        ),
        (None, None) => match episodes.iter().map(Episode::key).min() {
            Some(first) => first,
            None => bail!("{} contains no episodes", catalog),
        },
        _ => bail!("Pass both SEASON and EPISODE\n\n{}", USAGE),
    };

    Ok(PlayerProps::series(episodes, current))
}

fn read_catalog(path: &str) -> Result<String> {
    if path == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read episodes from stdin")?;
        Ok(json)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    }
}

async fn resolve(config: &Config, props: &PlayerProps) -> Result<()> {
    let storage = SupabaseStorage::new(&config.storage).context("Invalid storage configuration")?;
    let resolver = SourceResolver::new(Arc::new(storage), &config.storage);

    if let Some(title) = props.display_title() {
        info!("Resolving {}", title);
    }

    let source = resolver.resolve(props).await?;
    info!("Source origin: {:?}", source.origin);
    println!("{}", source.url);
    Ok(())
}
