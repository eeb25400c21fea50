use std::path::PathBuf;

use crate::upstream::MarketClient;

/// Shared application state, constructed once at startup. The upstream client
/// carries the only shared resource (the reqwest connection pool), which is
/// internally synchronized, so no locking is needed here.
pub struct AppState {
    pub upstream: MarketClient,
    pub frontend_dir: PathBuf,
    pub index_file: String,
}
