//! The built-in handlers: `/` (bare 200), `/echo/<text>` and
//! `/user-agent`, both answering `text/plain` with a computed
//! `Content-Length`.

use anyhow::Context;

use crate::request::Request;
use crate::response::{Response, Status};

pub fn root(_req: &Request) -> anyhow::Result<Response> {
    Ok(Response::empty(Status::OK))
}

/// Echoes back whatever follows the `/echo/` prefix.
pub fn echo(req: &Request) -> anyhow::Result<Response> {
    let data = req
        .path()
        .strip_prefix("/echo/")
        .context("echo path without /echo/ prefix")?;
    Ok(text(data))
}

/// Echoes back the request's `User-Agent` header.
pub fn user_agent(req: &Request) -> anyhow::Result<Response> {
    let agent = req
        .headers()
        .get("User-Agent")
        .context("request has no User-Agent header")?;
    Ok(text(agent))
}

fn text(body: &str) -> Response {
    Response::builder()
        .as_text()
        .with_header("content-length", body.len().to_string())
        .with_body(body)
}
