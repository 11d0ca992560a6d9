use anyhow::Result;
use cinefave::catalog::{CatalogApi, CatalogClient};
use cinefave::detail::DetailAggregator;
use cinefave::favorites::FavoritesRepository;
use cinefave::models::CoverType;
use cinefave::storage::{FileStore, KeyValueStore};
use cinefave::toggle::ToggleCoordinator;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn check_env() -> Result<()> {
    if env::var("API_ACCESS_TOKEN").is_err() {
        anyhow::bail!("Missing required environment variable: API_ACCESS_TOKEN");
    }
    Ok(())
}

fn usage() -> ! {
    eprintln!("Usage: cinefave <movie-id> [--toggle]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    match dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    init_tracing();
    check_env()?;

    let mut args = env::args().skip(1);
    let id: i32 = match args.next().and_then(|a| a.parse().ok()) {
        Some(id) if id > 0 => id,
        _ => usage(),
    };
    let do_toggle = match args.next().as_deref() {
        None => false,
        Some("--toggle") => true,
        Some(_) => usage(),
    };

    let data_dir = env::var("CINEFAVE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
    let favorites = Arc::new(FavoritesRepository::new(store));
    let catalog: Arc<dyn CatalogApi> = Arc::new(CatalogClient::from_env()?);

    let aggregator = DetailAggregator::new(catalog, favorites.clone());
    let mut view = aggregator.load_view(id, CoverType::Poster).await?;

    info!(
        "'{}' ({}) - rating {:.1} from {} votes, {} recommendations, favorite: {}",
        view.movie.title,
        view.movie
            .release_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unreleased".to_string()),
        view.movie.vote_average,
        view.movie.vote_count,
        view.recommendations.len(),
        view.is_favorite,
    );
    if let Some(cover) = view.cover_url() {
        info!("Cover: {}", cover);
    }

    if do_toggle {
        let coordinator = ToggleCoordinator::new(favorites);
        let now_favorite = coordinator.toggle(&mut view).await?;
        info!("Favorite flag is now {}", now_favorite);
    }

    Ok(())
}
