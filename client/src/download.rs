//! Chunked file downloads.
//!
//! [`DownloadBuffer`] reassembles one file from chunks that arrive in order,
//! each starting where the previous one ended. It refuses gaps, repeats, and
//! anything that would write past the size the server declared.
//! [`DownloadQueue`] holds the current file list and guarantees at most one
//! download is outstanding at a time.

use std::io::Cursor;

use thiserror::Error;
use vaultlink_types::{FileItem, TransId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("chunk at offset {offset} with {len} bytes overflows declared size {total}")]
    Overflow { offset: u32, len: usize, total: u32 },

    #[error("declared size changed from {previous} to {declared}")]
    TotalChanged { previous: u32, declared: u32 },

    #[error("chunk at offset {offset} does not continue at byte {expected}")]
    OutOfOrder { offset: u32, expected: u64 },
}

/// Outcome of accepting a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkProgress {
    Partial { received: u64, total: u32 },
    Complete,
}

#[derive(Debug, Default)]
pub struct DownloadBuffer {
    data: Vec<u8>,
    total: Option<u32>,
    received: u64,
}

impl DownloadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for the size the file list advertised. The size declared
    /// by the chunks themselves still governs validation.
    pub fn with_size_hint(size: u32) -> Self {
        Self {
            data: Vec::with_capacity(size as usize),
            ..Self::default()
        }
    }

    /// Append one chunk declared at `offset`.
    ///
    /// The first chunk fixes the total size; later chunks must declare the
    /// same total and start exactly at the bytes received so far. A rejected
    /// chunk leaves the buffer untouched.
    pub fn write_chunk(
        &mut self,
        total_size: u32,
        offset: u32,
        chunk: &[u8],
    ) -> Result<ChunkProgress, DownloadError> {
        if let Some(previous) = self.total {
            if previous != total_size {
                return Err(DownloadError::TotalChanged {
                    previous,
                    declared: total_size,
                });
            }
        }

        if u64::from(offset) != self.received {
            return Err(DownloadError::OutOfOrder {
                offset,
                expected: self.received,
            });
        }

        let overflow = DownloadError::Overflow {
            offset,
            len: chunk.len(),
            total: total_size,
        };
        let start = offset as usize;
        let end = match start.checked_add(chunk.len()) {
            Some(end) if end <= total_size as usize => end,
            _ => return Err(overflow),
        };

        if self.total.is_none() {
            self.data.resize(total_size as usize, 0);
            self.total = Some(total_size);
        }
        self.data[start..end].copy_from_slice(chunk);
        self.received += chunk.len() as u64;

        if self.received == u64::from(total_size) {
            Ok(ChunkProgress::Complete)
        } else {
            Ok(ChunkProgress::Partial {
                received: self.received,
                total: total_size,
            })
        }
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn total(&self) -> Option<u32> {
        self.total
    }

    /// Hand over the assembled bytes, read position at the start.
    pub fn finish(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.data)
    }
}

/// The current file list and a cursor into it.
#[derive(Debug, Default)]
pub struct DownloadQueue {
    files: Vec<FileItem>,
    cursor: usize,
    in_flight: Option<TransId>,
}

impl DownloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale and rewind. Returns the transaction of a
    /// download from the previous list that was still in flight, which the
    /// caller must cancel.
    pub fn replace(&mut self, files: Vec<FileItem>) -> Option<TransId> {
        self.files = files;
        self.cursor = 0;
        self.in_flight.take()
    }

    /// The file the cursor points at, if any.
    pub fn peek(&self) -> Option<&FileItem> {
        self.files.get(self.cursor)
    }

    /// Mark the file under the cursor as requested by `trans_id` and move on.
    pub fn advance(&mut self, trans_id: TransId) {
        self.in_flight = Some(trans_id);
        self.cursor += 1;
    }

    pub fn in_flight(&self) -> Option<TransId> {
        self.in_flight
    }

    pub fn clear_in_flight(&mut self) {
        self.in_flight = None;
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.cursor = 0;
        self.in_flight = None;
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files not yet requested.
    pub fn remaining(&self) -> usize {
        self.files.len().saturating_sub(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn chunks_in_order_complete() {
        let mut buf = DownloadBuffer::new();
        assert_eq!(
            buf.write_chunk(6, 0, b"abc").unwrap(),
            ChunkProgress::Partial {
                received: 3,
                total: 6
            }
        );
        assert_eq!(buf.write_chunk(6, 3, b"def").unwrap(), ChunkProgress::Complete);

        let mut out = String::new();
        buf.finish().read_to_string(&mut out).unwrap();
        assert_eq!(out, "abcdef");
    }

    #[test]
    fn chunk_ahead_of_received_bytes_is_rejected() {
        let mut buf = DownloadBuffer::new();
        assert_eq!(
            buf.write_chunk(4, 2, b"cd").unwrap_err(),
            DownloadError::OutOfOrder {
                offset: 2,
                expected: 0
            }
        );
        assert_eq!(buf.received(), 0);
    }

    #[test]
    fn repeated_chunk_cannot_complete_the_file() {
        let mut buf = DownloadBuffer::new();
        buf.write_chunk(4, 0, b"ab").unwrap();
        assert_eq!(
            buf.write_chunk(4, 0, b"ab").unwrap_err(),
            DownloadError::OutOfOrder {
                offset: 0,
                expected: 2
            }
        );
        assert_eq!(buf.received(), 2);
        assert_eq!(buf.write_chunk(4, 2, b"cd").unwrap(), ChunkProgress::Complete);
        assert_eq!(buf.finish().into_inner(), b"abcd".to_vec());
    }

    #[test]
    fn zero_size_file_completes_on_empty_chunk() {
        let mut buf = DownloadBuffer::new();
        assert_eq!(buf.write_chunk(0, 0, &[]).unwrap(), ChunkProgress::Complete);
        assert!(buf.finish().into_inner().is_empty());
    }

    #[test]
    fn write_past_total_is_rejected() {
        let mut buf = DownloadBuffer::new();
        let err = buf.write_chunk(4, 0, b"vwxyz").unwrap_err();
        assert_eq!(
            err,
            DownloadError::Overflow {
                offset: 0,
                len: 5,
                total: 4
            }
        );
        assert_eq!(buf.received(), 0);
    }

    #[test]
    fn continuation_past_total_is_rejected() {
        let mut buf = DownloadBuffer::new();
        buf.write_chunk(4, 0, b"abc").unwrap();
        assert!(matches!(
            buf.write_chunk(4, 3, b"de"),
            Err(DownloadError::Overflow { .. })
        ));
        assert_eq!(buf.received(), 3);
    }

    #[test]
    fn changing_total_is_rejected() {
        let mut buf = DownloadBuffer::with_size_hint(10);
        buf.write_chunk(10, 0, b"ab").unwrap();
        assert_eq!(
            buf.write_chunk(12, 2, b"cd").unwrap_err(),
            DownloadError::TotalChanged {
                previous: 10,
                declared: 12
            }
        );
    }

    #[test]
    fn queue_walks_files_in_order() {
        let mut queue = DownloadQueue::new();
        assert!(queue
            .replace(vec![FileItem::new("a", 1), FileItem::new("b", 2)])
            .is_none());
        assert_eq!(queue.peek().unwrap().name, "a");
        queue.advance(TransId(1));
        assert_eq!(queue.in_flight(), Some(TransId(1)));
        assert_eq!(queue.peek().unwrap().name, "b");
        assert_eq!(queue.remaining(), 1);
        queue.clear_in_flight();
        queue.advance(TransId(2));
        assert!(queue.peek().is_none());
        assert_eq!(queue.position(), 2);
    }

    #[test]
    fn replace_returns_in_flight_and_rewinds() {
        let mut queue = DownloadQueue::new();
        queue.replace(vec![FileItem::new("a", 1)]);
        queue.advance(TransId(7));

        let cancelled = queue.replace(vec![FileItem::new("x", 1), FileItem::new("y", 1)]);
        assert_eq!(cancelled, Some(TransId(7)));
        assert_eq!(queue.position(), 0);
        assert_eq!(queue.len(), 2);
        assert!(queue.in_flight().is_none());
    }
}
