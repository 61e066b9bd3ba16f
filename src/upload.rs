//! Upload controller: reserve a session, post encoded parts, commit.

use std::path::Path;
use std::sync::Arc;

use crate::codec;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, TokioFileSystem};
use crate::progress::TransferProgress;
use crate::stats::{TransferStats, TransferTracker};
use crate::transport::Transport;

/// Server-issued handle correlating a sequence of uploaded parts with one
/// eventual commit. Held immutably for the session's duration.
#[derive(Debug, Clone)]
pub struct TransferSession {
    id: String,
    part_size: u64,
    declared_size: u64,
}

impl TransferSession {
    /// The opaque session token issued by the server.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum encoded-body size the server accepts per part.
    #[must_use]
    pub const fn part_size(&self) -> u64 {
        self.part_size
    }

    /// The total byte count declared at reservation time.
    #[must_use]
    pub const fn declared_size(&self) -> u64 {
        self.declared_size
    }
}

/// Number of parts a buffer of `len` bytes splits into at `part_size`.
///
/// Zero-length buffers produce zero parts; `part_size` must be non-zero.
#[must_use]
pub const fn part_count(len: u64, part_size: u64) -> u64 {
    len.div_ceil(part_size)
}

/// Core uploader driving the reserve → transfer → commit sequence.
///
/// Parts go out strictly one at a time: each POST is awaited to completion
/// before the next window is sliced.
pub struct Uploader<T: Transport, F: FileSystem = TokioFileSystem> {
    transport: T,
    fs: F,
}

impl<T: Transport> Uploader<T, TokioFileSystem> {
    /// Creates a new uploader with the default file system.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            fs: TokioFileSystem,
        }
    }
}

impl<T: Transport, F: FileSystem> Uploader<T, F> {
    /// Creates a new uploader with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(transport: T, fs: F) -> Self {
        Self { transport, fs }
    }

    /// Returns a reference to the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads a local file and uploads it under its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the upload fails.
    pub async fn upload_file(
        &self,
        path: &Path,
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<TransferStats> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", path.display()),
                ))
            })?;
        let source = self.fs.read(path).await?;
        self.upload_bytes(&name, &source, progress).await
    }

    /// Uploads a byte buffer under the given name.
    ///
    /// Reserves a session, posts every window of the buffer as an encoded
    /// part, then commits. A zero-length buffer still reserves and commits,
    /// with no part posts in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is refused, any part is rejected,
    /// or a request fails at the transport level. A failed part aborts the
    /// transfer without committing.
    pub async fn upload_bytes(
        &self,
        name: &str,
        source: &[u8],
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<TransferStats> {
        match self.transfer(name, source, progress).await {
            Ok(stats) => {
                progress.on_transfer_complete(name, &stats);
                Ok(stats)
            }
            Err(e) => {
                progress.on_error(name, &e.to_string());
                Err(e)
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn transfer(
        &self,
        name: &str,
        source: &[u8],
        progress: &Arc<dyn TransferProgress>,
    ) -> Result<TransferStats> {
        let len = source.len() as u64;
        let session = self.reserve(name, len).await?;

        // The server declares the encoded-body capacity; windows are cut from
        // the raw source, so scale down before slicing.
        let part_size = codec::effective_part_size(session.part_size());
        if part_size == 0 {
            return Err(Error::MalformedResponse(format!(
                "unusable part size {} declared by server",
                session.part_size()
            )));
        }

        progress.on_transfer_start(name, len);
        let mut tracker = TransferTracker::start();

        let mut index = 0u64;
        loop {
            let start = index * part_size;
            if start >= len {
                break;
            }
            let end = (start + part_size).min(len);
            let payload = codec::encode(&source[start as usize..end as usize]);

            let response = self
                .transport
                .post(&format!("/upload/{}", session.id()), Some(payload))
                .await?;
            if !response.is_success() {
                return Err(Error::PartRejected {
                    index,
                    status: response.status(),
                });
            }

            log::debug!("part {index}: sent bytes {start}..{end} of {len}");
            tracker.record_part(end - start);
            progress.on_part(index, end - start);
            index += 1;
        }

        self.commit(&session).await?;
        Ok(tracker.finish())
    }

    async fn reserve(&self, name: &str, size: u64) -> Result<TransferSession> {
        let response = self
            .transport
            .post(&format!("/upload/{name}/reserve?size={size}"), None)
            .await?;
        if !response.is_success() {
            return Err(Error::ReservationFailed {
                status: response.status(),
            });
        }

        let id = response
            .header("uuid")
            .ok_or_else(|| Error::MalformedResponse("reservation lacks a uuid header".into()))?
            .to_string();
        let part_size = response
            .header("Upload-Part-Size")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| {
                Error::MalformedResponse("reservation lacks an Upload-Part-Size header".into())
            })?;

        log::debug!("reserved session {id} with part size {part_size}");
        Ok(TransferSession {
            id,
            part_size,
            declared_size: size,
        })
    }

    async fn commit(&self, session: &TransferSession) -> Result<()> {
        // The commit status is not part of the contract; only transport-level
        // failures propagate.
        let response = self
            .transport
            .post(&format!("/upload/{}/commit", session.id()), None)
            .await?;
        log::debug!(
            "committed session {} (status {})",
            session.id(),
            response.status()
        );
        Ok(())
    }
}
