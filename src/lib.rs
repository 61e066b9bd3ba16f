//! bytelift - chunked bulk file transfer over a text-only HTTP channel.
//!
//! This library moves arbitrarily large files through an endpoint that only
//! supports small, discrete request/response exchanges with text bodies.
//! Uploads reserve a server session, slice the source into bounded windows,
//! and post each window as an encoded part before committing; downloads fetch
//! parts by increasing index until the empty-body sentinel and reassemble
//! them into the original byte sequence.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bytelift::{
//!     Downloader, HttpTransport, NoProgress, TransferConfig, TransferProgress, Uploader,
//! };
//!
//! # async fn example() -> bytelift::Result<()> {
//! let transport = HttpTransport::new("http://localhost:8000")?;
//! let progress: Arc<dyn TransferProgress> = Arc::new(NoProgress);
//!
//! // Upload a buffer under a name the server will store it as.
//! let uploader = Uploader::new(transport.clone());
//! uploader.upload_bytes("report.pdf", b"...", &progress).await?;
//!
//! // Fetch it back as one assembled buffer.
//! let downloader = Downloader::new(transport, TransferConfig::default());
//! let bytes = downloader.download("report.pdf", &progress).await?;
//! println!("downloaded {} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod codec;
pub mod config;
pub mod download;
pub mod error;
pub mod format;
pub mod fs;
pub mod progress;
pub mod stats;
pub mod transport;
pub mod upload;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for convenience
pub use codec::{CodecError, RAW_PER_ENCODED, decode, effective_part_size, encode};
pub use config::{AppConfig, DecodeFailure, TransferConfig};
pub use download::Downloader;
pub use error::{Error, Result};
pub use format::{format_bytes, format_duration};
pub use fs::{FileSystem, TokioFileSystem};
pub use progress::{NoProgress, TransferProgress};
pub use stats::TransferStats;
pub use transport::{HttpTransport, Response, Transport};
pub use upload::{TransferSession, Uploader, part_count};
