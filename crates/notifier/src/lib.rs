//! Single-notification delivery with bounded, fixed-interval retries.

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use dispatcher::RetryDispatcher;
pub use error::NotifierError;
pub use handler::NotifyHandler;
pub use transport::{HttpTransport, Transport, TransportConfig};
