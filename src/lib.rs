pub mod handlers;
pub mod header;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
