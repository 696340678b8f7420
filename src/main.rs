use anyhow::{anyhow, Result};
use bjj_core::{format_timestamp, Video};
use bjj_search::{rank_related, FilterCriteria};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{prelude::*, reload, EnvFilter};

use bjj_study::{CatalogStore, Config};

fn cli() -> Command {
    Command::new("BJJ Study")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("BJJ technique clip catalog with search and related clips")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (TOML)")
                .global(true)
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("FILE")
                .help("Catalog JSON file, overrides the configured one")
                .global(true)
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(clap::ArgAction::SetTrue)
                .global(true)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
                .global(true)
        )
        .subcommand(
            Command::new("serve")
                .about("Start the HTTP API")
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Listen port, overrides the configured one")
                        .value_parser(clap::value_parser!(u16))
                )
        )
        .subcommand(
            Command::new("search")
                .about("Search the catalog")
                .arg(
                    Arg::new("tag")
                        .short('t')
                        .long("tag")
                        .value_name("TAG")
                        .help("Match clips whose tags contain TAG (repeatable, any match)")
                        .action(clap::ArgAction::Append)
                )
                .arg(
                    Arg::new("position")
                        .short('p')
                        .long("position")
                        .value_name("POSITION")
                        .help("Exact body position")
                )
                .arg(
                    Arg::new("max-length")
                        .short('m')
                        .long("max-length")
                        .value_name("SECONDS")
                        .help("Maximum clip length in seconds")
                )
        )
        .subcommand(
            Command::new("related")
                .about("Show clips related to one clip")
                .arg(
                    Arg::new("id")
                        .value_name("ID")
                        .help("Reference clip id")
                        .required(true)
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .value_name("NUM")
                        .help("Maximum number of related clips")
                        .value_parser(clap::value_parser!(usize))
                )
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let verbose = matches.get_flag("verbose");

    // Logging is up before the config is read; the configured level is
    // applied afterwards unless RUST_LOG or --verbose already decided it
    let env_filter = EnvFilter::try_from_default_env().ok();
    let explicit_level = env_filter.is_some() || verbose;
    let (filter, filter_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| crate_filter(if verbose { "debug" } else { "info" })),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if !explicit_level {
        filter_handle.reload(crate_filter(&config.logging.level))?;
    }

    if let Some(path) = matches.get_one::<String>("catalog") {
        config.catalog.path = Some(PathBuf::from(path));
    }
    if let Some(("serve", serve)) = matches.subcommand() {
        if let Some(port) = serve.get_one::<u16>("port") {
            config.server.port = *port;
        }
    }

    config.validate()?;
    debug!("{}", config.summary());

    let store = CatalogStore::from_config(&config.catalog).await?;
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("serve", _)) => serve(store, config).await,
        Some(("search", args)) => search(&store, args, json).await,
        Some(("related", args)) => related(&store, &config, args, json).await,
        _ => unreachable!("subcommand_required is set"),
    }
}

#[cfg(feature = "api")]
async fn serve(store: CatalogStore, config: Config) -> Result<()> {
    info!("🚀 BJJ Study starting...");
    info!("📚 Catalog: {} videos", store.len().await);

    bjj_study::ApiServer::new(store, std::sync::Arc::new(config)).start().await
}

#[cfg(not(feature = "api"))]
async fn serve(_store: CatalogStore, _config: Config) -> Result<()> {
    anyhow::bail!("This build does not include the HTTP API (enable the `api` feature)")
}

async fn search(store: &CatalogStore, args: &ArgMatches, json: bool) -> Result<()> {
    let mut query: Vec<(&str, &str)> = Vec::new();
    for tag in args.get_many::<String>("tag").into_iter().flatten() {
        query.push(("tags", tag.as_str()));
    }
    if let Some(position) = args.get_one::<String>("position") {
        query.push(("position", position.as_str()));
    }
    if let Some(max_length) = args.get_one::<String>("max-length") {
        query.push(("maxVideoLength", max_length.as_str()));
    }

    let criteria = FilterCriteria::from_query_pairs(query);
    if args.get_one::<String>("max-length").is_some() && criteria.max_duration_seconds().is_none() {
        warn!("Ignoring invalid --max-length, searching without a length limit");
    }

    let catalog = store.snapshot().await;
    let videos = bjj_search::filter(&catalog, &criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
    } else {
        for video in &videos {
            println!("{}", describe(video));
        }
        info!("🔎 {} of {} videos matched", videos.len(), catalog.len());
    }

    Ok(())
}

async fn related(store: &CatalogStore, config: &Config, args: &ArgMatches, json: bool) -> Result<()> {
    let id = *args
        .get_one::<u64>("id")
        .ok_or_else(|| anyhow!("A reference video id is required"))?;
    let limit = args
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(config.search.related_limit);

    let catalog = store.snapshot().await;
    let reference = store.get(id).await?;
    let ranked: Vec<_> = rank_related(&catalog, &reference).into_iter().take(limit).collect();

    if json {
        let videos: Vec<&Video> = ranked.iter().map(|r| r.video).collect();
        println!("{}", serde_json::to_string_pretty(&videos)?);
    } else {
        println!("Related to {}", describe(&reference));
        for entry in &ranked {
            println!(
                "  {} | {} shared tag(s) | {}",
                entry.score.tier(),
                entry.score.shared_tags,
                describe(entry.video)
            );
        }
    }

    Ok(())
}

fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("bjj_study={level},bjj_search={level},bjj_core={level},warn"))
}

fn describe(video: &Video) -> String {
    let length = video
        .duration_seconds()
        .map(format_timestamp)
        .unwrap_or_else(|_| "?".to_string());

    format!(
        "#{} {} [{}] ({}) {}",
        video.id,
        video.title,
        video.position.as_deref().unwrap_or("-"),
        video.tags,
        length
    )
}
