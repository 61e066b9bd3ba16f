//! Download controller: size query, sentinel-terminated fetch loop,
//! materialization of the assembled buffer.

use std::path::Path;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};

use crate::codec;
use crate::config::{DecodeFailure, TransferConfig};
use crate::error::{Error, Result};
use crate::fs::{FileSystem, TokioFileSystem};
use crate::progress::TransferProgress;
use crate::stats::{TransferStats, TransferTracker};
use crate::transport::Transport;

/// Core downloader driving the size query → fetch loop → materialize
/// sequence.
///
/// Parts are requested by strictly increasing index, one request in flight
/// at a time, until the server answers with an empty body (the end-of-file
/// sentinel). No request is ever issued past the sentinel.
pub struct Downloader<T: Transport, F: FileSystem = TokioFileSystem> {
    transport: T,
    config: TransferConfig,
    fs: F,
}

impl<T: Transport> Downloader<T, TokioFileSystem> {
    /// Creates a new downloader with the default file system.
    #[must_use]
    pub const fn new(transport: T, config: TransferConfig) -> Self {
        Self {
            transport,
            config,
            fs: TokioFileSystem,
        }
    }
}

impl<T: Transport, F: FileSystem> Downloader<T, F> {
    /// Creates a new downloader with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(transport: T, config: TransferConfig, fs: F) -> Self {
        Self {
            transport,
            config,
            fs,
        }
    }

    /// Returns a reference to the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a reference to the transfer configuration.
    #[must_use]
    pub const fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Returns a reference to the underlying file system.
    #[must_use]
    pub const fn fs(&self) -> &F {
        &self.fs
    }

    /// Asks the server for the byte count of a named file.
    ///
    /// # Errors
    ///
    /// Any non-success status is treated as [`Error::NotFound`]; an
    /// unparsable body is [`Error::MalformedResponse`].
    pub async fn fetch_size(&self, name: &str) -> Result<u64> {
        let response = self.transport.get(&format!("/download/{name}?size")).await?;
        if !response.is_success() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        response.body().trim().parse::<u64>().map_err(|_| {
            Error::MalformedResponse(format!(
                "size query returned non-numeric body {:?}",
                response.body()
            ))
        })
    }

    /// Downloads a named file and returns the assembled bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unknown, a part request fails, a part
    /// cannot be decoded under [`DecodeFailure::Abort`], or the assembled
    /// size does not match the declared size.
    pub async fn download(
        &self,
        name: &str,
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<Bytes> {
        match self.run(name, progress).await {
            Ok((bytes, stats)) => {
                progress.on_transfer_complete(name, &stats);
                Ok(bytes)
            }
            Err(e) => {
                progress.on_error(name, &e.to_string());
                Err(e)
            }
        }
    }

    /// Downloads a named file and saves it at `dest`.
    ///
    /// # Errors
    ///
    /// In addition to the [`download`](Self::download) failure modes, fails
    /// with [`Error::FileExists`] when `dest` is already present and force
    /// overwrite is disabled, and propagates write failures from the sink.
    pub async fn download_to_file(
        &self,
        name: &str,
        dest: &Path,
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<TransferStats> {
        if !self.config.force_overwrite && self.fs.file_exists(dest).await {
            return Err(Error::FileExists {
                path: dest.display().to_string(),
            });
        }

        let result: Result<(Bytes, TransferStats)> = async {
            let (bytes, stats) = self.run(name, progress).await?;
            self.fs.write(dest, &bytes).await?;
            Ok((bytes, stats))
        }
        .await;

        match result {
            Ok((_, stats)) => {
                progress.on_transfer_complete(name, &stats);
                Ok(stats)
            }
            Err(e) => {
                progress.on_error(name, &e.to_string());
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        name: &str,
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<(Bytes, TransferStats)> {
        let declared = self.fetch_size(name).await?;
        progress.on_transfer_start(name, declared);

        #[allow(clippy::cast_possible_truncation)]
        let mut buffer = BytesMut::with_capacity(declared as usize);
        let mut tracker = TransferTracker::start();

        let mut index = 0u64;
        loop {
            let response = self
                .transport
                .get(&format!("/download/{name}?part={index}"))
                .await?;
            if !response.is_success() {
                return Err(Error::PartUnavailable {
                    index,
                    status: response.status(),
                });
            }

            let text = response.into_body();
            if text.is_empty() {
                // End-of-file sentinel, valid at any index including 0.
                break;
            }

            let part = match codec::decode(&text) {
                Ok(part) => part,
                Err(e) => match self.config.decode_failure {
                    DecodeFailure::Abort => return Err(e.into()),
                    DecodeFailure::SkipPart => {
                        log::warn!("skipping undecodable part {index} of {name}: {e}");
                        index += 1;
                        continue;
                    }
                },
            };

            let offset = buffer.len() as u64;
            if offset + part.len() as u64 > declared {
                return Err(Error::SizeMismatch {
                    declared,
                    actual: offset + part.len() as u64,
                });
            }

            buffer.extend_from_slice(&part);
            log::debug!("part {index}: received {} bytes at offset {offset}", part.len());
            tracker.record_part(part.len() as u64);
            progress.on_part(index, part.len() as u64);
            index += 1;
        }

        let actual = buffer.len() as u64;
        if actual != declared {
            match self.config.decode_failure {
                DecodeFailure::Abort => return Err(Error::SizeMismatch { declared, actual }),
                DecodeFailure::SkipPart => {
                    log::warn!("{name}: assembled {actual} bytes but server declared {declared}");
                }
            }
        }

        Ok((buffer.freeze(), tracker.finish()))
    }
}
