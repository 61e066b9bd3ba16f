//! CLI mode for blift - command-line upload and download flows.

mod progress;

use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::{
    AppConfig, Downloader, HttpTransport, TransferProgress, TransferStats, Uploader,
};

use progress::{make_transfer_bar, print_error_line, print_transfer_line};

/// Bridges controller progress events onto an indicatif bar.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        Self {
            bar: make_transfer_bar(),
        }
    }
}

impl TransferProgress for BarProgress {
    fn on_transfer_start(&self, name: &str, total_bytes: u64) {
        self.bar.set_length(total_bytes);
        self.bar.set_message(name.to_string());
    }

    fn on_part(&self, _index: u64, raw_len: u64) {
        self.bar.inc(raw_len);
    }

    fn on_transfer_complete(&self, _name: &str, _stats: &TransferStats) {
        self.bar.finish_and_clear();
    }

    fn on_error(&self, _name: &str, _error: &str) {
        self.bar.finish_and_clear();
    }
}

/// Uploads each listed file, printing one result line per transfer.
///
/// All files are attempted; the first error (if any) is returned once the
/// batch finishes, so the process exits non-zero.
///
/// # Errors
///
/// Returns the first transfer error encountered.
pub async fn run_upload(config: &AppConfig, files: Vec<String>) -> crate::Result<()> {
    let transport = HttpTransport::new(&config.server)?;
    let uploader = Uploader::new(transport);

    let mut first_error = None;
    for file in files {
        let path = Path::new(&file);
        let progress: Arc<dyn TransferProgress> = Arc::new(BarProgress::new());
        match uploader.upload_file(path, &progress).await {
            Ok(stats) => print_transfer_line("uploaded", &file, &stats),
            Err(e) => {
                print_error_line(&file, &e);
                first_error.get_or_insert(e);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Downloads each named file into the configured download directory.
///
/// # Errors
///
/// Returns the first transfer error encountered.
pub async fn run_download(config: &AppConfig, names: Vec<String>) -> crate::Result<()> {
    let transport = HttpTransport::new(&config.server)?;
    let downloader = Downloader::new(transport, config.transfer.clone());

    let mut first_error = None;
    for name in names {
        let dest = config.download_dir.join(&name);
        let progress: Arc<dyn TransferProgress> = Arc::new(BarProgress::new());
        match downloader.download_to_file(&name, &dest, &progress).await {
            Ok(stats) => print_transfer_line("downloaded", &name, &stats),
            Err(e) => {
                print_error_line(&name, &e);
                first_error.get_or_insert(e);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}
