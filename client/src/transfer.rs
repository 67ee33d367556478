//! Sequential file download: file list handling and chunk reassembly.
//!
//! Only one download is ever outstanding. The next file is requested when
//! the current one completes; a failed or timed-out download halts the queue
//! until [`AuthClient::download_next`] is called again.

use std::time::Instant;

use tracing::{debug, info, trace, warn};
use vaultlink_protocol::{AuthRequest, AuthTransport, RequestKind};
use vaultlink_store::VaultGraph;
use vaultlink_types::{FileItem, NetResult, TransId};

use crate::{
    AuthClient, ChunkProgress, ClientError, ClientEvent, DownloadBuffer, DownloadError,
    PendingKind, PendingTransaction,
};

enum ChunkOutcome {
    Unknown,
    NotDownload,
    Failed,
    Written(Result<ChunkProgress, DownloadError>),
}

impl<T: AuthTransport, G: VaultGraph> AuthClient<T, G> {
    /// Ask for the files in `directory` with the given extension. Login does
    /// this for the SDL directory on its own.
    pub fn request_file_list(&mut self, directory: &str, extension: &str) -> Result<TransId, ClientError> {
        self.issue(AuthRequest::FileList {
            directory: directory.to_string(),
            extension: extension.to_string(),
        })
    }

    pub(crate) fn on_file_list(&mut self, trans_id: TransId, result: NetResult, files: Vec<FileItem>) {
        // A replayed list still resets the queue; only a reply answering some
        // other request is dropped.
        if self.settle(trans_id, RequestKind::FileList).is_none() && self.registry.contains(trans_id) {
            return;
        }
        if !result.is_success() {
            warn!(result = %result, "file list rejected");
            self.status(format!("File list failed ({result})"));
            return;
        }

        debug!(files = files.len(), "file list received");
        if let Some(previous) = self.downloads.replace(files) {
            if self.registry.cancel(previous) {
                debug!(trans = %previous, "cancelled download from previous file list");
                self.update_pending_gauge();
            }
        }
        if let Err(err) = self.download_next() {
            debug!(error = %err, "could not start downloads");
        }
    }

    /// Request the next queued file.
    ///
    /// Returns `Ok(None)` once the list is exhausted (the queue is then
    /// cleared). Fails while another download is still in flight.
    pub fn download_next(&mut self) -> Result<Option<TransId>, ClientError> {
        if let Some(in_flight) = self.downloads.in_flight() {
            self.status(format!("Download {in_flight} still in progress"));
            return Err(ClientError::DownloadInFlight(in_flight));
        }

        let Some(file) = self.downloads.peek().cloned() else {
            debug!("done downloading files");
            self.downloads.clear();
            return Ok(None);
        };

        debug!(file = %file.name, size = file.size, "requesting download");
        let request = AuthRequest::FileDownload {
            filename: file.name.clone(),
        };
        let buffer = DownloadBuffer::with_size_hint(file.size);
        let trans_id = self.issue_as(request, PendingKind::Download { file, buffer })?;
        self.downloads.advance(trans_id);
        Ok(Some(trans_id))
    }

    pub(crate) fn on_file_download_chunk(
        &mut self,
        trans_id: TransId,
        result: NetResult,
        total_size: u32,
        chunk_offset: u32,
        data: &[u8],
    ) {
        let outcome = match self.registry.get_mut(trans_id) {
            None => ChunkOutcome::Unknown,
            Some(PendingTransaction {
                kind: PendingKind::Download { buffer, .. },
                ..
            }) => {
                if result.is_success() {
                    ChunkOutcome::Written(buffer.write_chunk(total_size, chunk_offset, data))
                } else {
                    ChunkOutcome::Failed
                }
            }
            Some(_) => ChunkOutcome::NotDownload,
        };

        match outcome {
            ChunkOutcome::Unknown => {
                self.integrity_fault(format!("File chunk for unknown transaction {trans_id}"));
            }
            ChunkOutcome::NotDownload => {
                self.integrity_fault(format!(
                    "File chunk for transaction {trans_id} which is not a download"
                ));
            }
            ChunkOutcome::Failed => {
                let file = self.abandon_download(trans_id);
                warn!(trans = %trans_id, file = ?file.map(|f| f.name), result = %result, "download failed");
                self.status(format!("File download failed ({result})"));
            }
            ChunkOutcome::Written(Ok(ChunkProgress::Partial { received, total })) => {
                self.registry.touch(trans_id, Instant::now());
                trace!(trans = %trans_id, received, total, "chunk received");
            }
            ChunkOutcome::Written(Ok(ChunkProgress::Complete)) => {
                self.complete_download(trans_id);
            }
            ChunkOutcome::Written(Err(err)) => {
                self.abandon_download(trans_id);
                self.integrity_fault(format!("File download rejected: {err}"));
            }
        }
    }

    /// Drop a download transaction and halt the queue.
    fn abandon_download(&mut self, trans_id: TransId) -> Option<FileItem> {
        let pending = self.registry.take(trans_id);
        if self.downloads.in_flight() == Some(trans_id) {
            self.downloads.clear_in_flight();
        }
        self.update_pending_gauge();
        match pending?.kind {
            PendingKind::Download { file, .. } => Some(file),
            PendingKind::Request(_) => None,
        }
    }

    fn complete_download(&mut self, trans_id: TransId) {
        let Some(PendingTransaction {
            kind: PendingKind::Download { file, buffer },
            ..
        }) = self.registry.take(trans_id)
        else {
            return;
        };
        if self.downloads.in_flight() == Some(trans_id) {
            self.downloads.clear_in_flight();
        }
        self.update_pending_gauge();

        info!(file = %file.name, bytes = buffer.received(), "download complete");
        if let Some(metrics) = &self.metrics {
            metrics.downloads_completed.inc();
        }

        // The next request goes out before listeners see this file.
        if let Err(err) = self.download_next() {
            debug!(error = %err, "could not request next download");
        }
        self.events.emit(&ClientEvent::FileDownloaded {
            name: file.name,
            data: buffer.finish(),
        });
    }
}
