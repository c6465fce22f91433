//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use reelscope_core::{BrowseSession, MovieStore, ReelscopeConfig, SearchFilters, SearchState};
use reelscope_search::{GENRE_OPTIONS, MediaKind, MovieDetail};
use tracing::debug;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search titles with optional filters
    Search {
        /// Free-text title query
        query: Option<String>,
        /// Title type: movie, series or episode (empty for any)
        #[arg(short = 't', long = "type", default_value = "movie")]
        kind: String,
        /// Release year
        #[arg(short, long)]
        year: Option<String>,
        /// Genre filter
        #[arg(short, long)]
        genre: Option<String>,
        /// Number of result pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },
    /// List titles for a randomly chosen term
    Random {
        /// Number of result pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },
    /// Show the full record for one title
    Show {
        /// IMDb identifier, e.g. tt0133093
        imdb_id: String,
    },
    /// List the type and genre filter values
    Filters,
}

/// Handle the CLI command
///
/// # Errors
/// - Configuration is invalid or the HTTP client cannot be created
pub async fn handle_command(command: Commands, config: &ReelscopeConfig) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            kind,
            year,
            genre,
            pages,
        } => {
            let filters = SearchFilters {
                query: query.unwrap_or_default(),
                kind,
                year: year.unwrap_or_default(),
                genre: genre.unwrap_or_default(),
            };
            browse(config, filters, pages).await
        }
        Commands::Random { pages } => {
            let filters = SearchFilters {
                kind: String::new(),
                ..Default::default()
            };
            browse(config, filters, pages).await
        }
        Commands::Show { imdb_id } => show_movie(config, &imdb_id).await,
        Commands::Filters => {
            print_filters();
            Ok(())
        }
    }
}

fn open_session(config: &ReelscopeConfig, filters: SearchFilters) -> anyhow::Result<BrowseSession> {
    let store = MovieStore::from_config(config).context("failed to set up movie store")?;
    Ok(BrowseSession::with_filters(Arc::new(store), filters))
}

/// Fresh search followed by `pages - 1` scroll steps.
async fn browse(
    config: &ReelscopeConfig,
    filters: SearchFilters,
    pages: u32,
) -> anyhow::Result<()> {
    debug!(?filters, pages, "Starting browse");
    let session = open_session(config, filters)?;

    session.search().await;
    for _ in 1..pages {
        session.load_more().await;
    }

    print_results(&session.store().snapshot());
    Ok(())
}

async fn show_movie(config: &ReelscopeConfig, imdb_id: &str) -> anyhow::Result<()> {
    let session = open_session(config, SearchFilters::default())?;

    match session.open(imdb_id).await {
        Some(detail) => print_detail(&detail),
        None => println!("Movie not found."),
    }
    Ok(())
}

fn print_results(state: &SearchState) {
    let Some(movies) = state.results.as_ref().filter(|m| !m.is_empty()) else {
        println!("No movies found.");
        return;
    };

    for (index, movie) in movies.iter().enumerate() {
        let poster = if movie.has_poster() { "" } else { "  (no poster)" };
        println!(
            "{:>4}. {} ({}) [{}] {}{poster}",
            index + 1,
            movie.title,
            movie.year,
            movie.kind,
            movie.imdb_id
        );
    }
    println!("{:-<60}", "");
    println!("{} titles, page {}", movies.len(), state.current_page);
}

fn print_detail(detail: &MovieDetail) {
    println!("{}", detail.title);
    println!("{}", detail.headline());
    println!("{:-<60}", "");

    for section in detail.sections() {
        match &section.link {
            Some(url) if url != &section.content => {
                println!("{:<12} {} <{url}>", section.label, section.content)
            }
            _ => println!("{:<12} {}", section.label, section.content),
        }
    }

    for rating in &detail.ratings {
        println!("{:<12} {}: {}", "Rating", rating.source, rating.value);
    }
}

fn print_filters() {
    println!("Types:");
    for (label, value) in MediaKind::FILTER_OPTIONS {
        println!("  {label:<10} {value}");
    }
    println!("Genres:");
    for (label, value) in GENRE_OPTIONS {
        println!("  {label:<10} {value}");
    }
}
