//! FamilyTree client
//!
//! Signs in against the FamilyTree backend, fetches a family tree and renders
//! it as a text outline with authorization markers.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;
mod tree;
mod view;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::ApiClient;
use auth::Session;
use config::Config;
use view::TreeView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FamilyTree client");
    tracing::info!("API URL: {}", config.api_url);

    let tree_id = std::env::args()
        .nth(1)
        .ok_or("usage: familytree-client <tree-id>")?;

    let mut api = ApiClient::new(&config)?;

    // Sign in with configured credentials when no token is present
    if !api.has_token() {
        match (&config.identifier, &config.password) {
            (Some(identifier), Some(password)) => {
                let auth = api
                    .sign_in(&models::SignInRequest {
                        identifier: identifier.clone(),
                        password: password.clone(),
                    })
                    .await?;
                api.set_token(auth.token);
                tracing::info!("Signed in as {}", identifier);
            }
            _ => {
                tracing::warn!(
                    "No session configured (FAMILYTREE_TOKEN or FAMILYTREE_IDENTIFIER/FAMILYTREE_PASSWORD). Requests will be rejected."
                );
            }
        }
    }

    let session = Session::establish(&api).await?;

    let mut view = TreeView::new(api, session, tree_id);
    tracing::info!("Viewing as {}", view.session().viewer().full_name);
    view.load().await?;

    for line in view.render_outline() {
        println!("{}", line);
    }

    Ok(())
}
