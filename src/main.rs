use microhttp::handlers;
use microhttp::router::{MatchKind, Router};
use microhttp::server::Server;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();
    info!("starting server.");

    let router = Router::new()
        .route("/", MatchKind::Exact, handlers::root)
        .route("/echo/", MatchKind::Prefix, handlers::echo)
        .route("/user-agent", MatchKind::Prefix, handlers::user_agent);

    let (ip, port) = ("0.0.0.0", 4221);
    let server = Server::bind((ip, port), router).await?;
    info!(ip, port, "bound tcp server.");
    server.serve().await
}
