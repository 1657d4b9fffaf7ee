use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::task;
use tracing::{debug, info};

use crate::request::Request;
use crate::response::{Response, Status};
use crate::router::Router;

/// One read covers the request line and headers; bodies are unsupported,
/// so nothing beyond this is ever consumed.
const READ_BUFFER_SIZE: usize = 1024;

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    pub async fn bind<A: ToSocketAddrs>(addr: A, router: Router) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, spawning one task per connection.
    /// Connection tasks share nothing but the read-only route table, so a
    /// failure in one never reaches another.
    pub async fn serve(self) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    debug!(%error, "failed to accept tcp stream.");
                    continue;
                }
            };
            info!(addr = addr.to_string(), "successfully accepted new tcp stream.");
            let router = Arc::clone(&self.router);
            task::spawn(async move {
                if let Err(error) = handle_connection(stream, &router).await {
                    debug!(%error, "error while handling connection.");
                }
            });
        }
    }
}

/// Serves exactly one request/response cycle: one bounded read, parse,
/// dispatch, one write. The stream is dropped (and with it the connection
/// closed) on every exit path, including errors.
#[tracing::instrument(skip(stream, router))]
pub async fn handle_connection<S>(mut stream: S, router: &Router) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let n = stream.read(&mut buf).await?;

    let request = match Request::try_parse(&buf[..n]) {
        Ok(req) => {
            info!(
                method = req.method(),
                path = req.path(),
                "successfully parsed request."
            );
            req
        }
        Err(error) => {
            debug!(%error, "failed to parse request. answering with 400.");
            Response::empty(Status::BadRequest)
                .try_write_to(&mut stream)
                .await?;
            return Ok(());
        }
    };

    let response = match router.dispatch(&request) {
        Some(Ok(response)) => response,
        Some(Err(error)) => {
            debug!(%error, path = request.path(), "handler failed. answering with 500.");
            Response::empty(Status::InternalServerError)
        }
        None => {
            info!(path = request.path(), "no route matched. answering with 404.");
            Response::empty(Status::NotFound)
        }
    };
    response.try_write_to(&mut stream).await?;
    info!("successfully sent response.");
    Ok(())
}
