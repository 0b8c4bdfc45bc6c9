//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::auth::TokenIssuer;
use tienda_store::Database;

/// Application state: the database handle and the token issuer.
///
/// `Database` clones share their lock set, so handlers can take repository
/// handles freely without weakening mutual exclusion.
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<dyn TokenIssuer>,
}

/// State type as seen by the router.
pub type SharedState = Arc<AppState>;
