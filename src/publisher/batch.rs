use super::{StreamClient, StreamEntry};
use crate::error::Result;

/// Accumulates stream entries and flushes them once `max_size` is reached.
pub struct Batch<'a, C: StreamClient> {
    client: &'a C,
    entries: Vec<StreamEntry>,
    max_size: usize,
    flushed_batches: usize,
}

impl<'a, C: StreamClient> Batch<'a, C> {
    pub fn new(client: &'a C, max_size: usize) -> Self {
        Self {
            client,
            entries: Vec::with_capacity(max_size),
            max_size,
            flushed_batches: 0,
        }
    }

    pub async fn add_entry(&mut self, entry: StreamEntry) -> Result<()> {
        self.entries.push(entry);
        if self.entries.len() < self.max_size {
            return Ok(());
        }
        self.flush().await
    }

    pub async fn flush(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        log::debug!(
            "Flushing {} records to stream {}.",
            self.entries.len(),
            self.client.get_stream_name()
        );
        let entries = std::mem::replace(&mut self.entries, Vec::with_capacity(self.max_size));
        self.client.put_records(entries).await?;
        self.flushed_batches += 1;
        Ok(())
    }

    pub const fn get_flushed_batches(&self) -> usize {
        self.flushed_batches
    }
}
