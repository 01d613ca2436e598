// PDF handling: text extraction, minimal re-encoding, size-budget compression.
// CPU-bound throughout; callers on the async path must wrap these in
// tokio::task::spawn_blocking.

pub mod compress;
pub mod extract;
pub mod render;

pub use compress::compress;
