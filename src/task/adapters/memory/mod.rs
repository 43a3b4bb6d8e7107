//! In-memory adapters for tests and embedding.

mod identity;
mod listener;
mod store;

pub use identity::StaticPrincipal;
pub use listener::RecordingListener;
pub use store::InMemoryTaskStore;
