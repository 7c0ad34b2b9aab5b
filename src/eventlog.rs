//! Append-only flood event log.
//!
//! Events are packed into fixed-width byte records and written
//! sequentially into external EEPROM through [`StoragePort`]. A start
//! record is 7 bytes (timestamp + level), an end record 9 bytes (the
//! same plus a big-endian duration in minutes). The writer never wraps:
//! once the next record would overrun the capacity it latches full and
//! every further append reports [`StorageError::Full`].

use heapless::Vec;

use crate::app::ports::StoragePort;
use crate::clock::Timestamp;
use crate::error::StorageError;
use crate::fsm::context::LogEntry;

/// Wire size of a flood-start record.
pub const START_LEN: usize = 7;
/// Wire size of a flood-end record.
pub const END_LEN: usize = 9;

/// [`StoragePort`] addresses bytes with a `u16`, so the writer can use
/// at most this much of a device, whatever `capacity()` claims.
const ADDRESS_SPACE: usize = u16::MAX as usize + 1;

/// A log record ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogRecord {
    Start {
        at: Timestamp,
        level_cm: f32,
    },
    End {
        at: Timestamp,
        level_cm: f32,
        duration_min: u16,
    },
}

impl From<LogEntry> for LogRecord {
    fn from(entry: LogEntry) -> Self {
        match entry {
            LogEntry::Start { at, level_cm } => LogRecord::Start { at, level_cm },
            LogEntry::End {
                at,
                level_cm,
                duration_min,
            } => LogRecord::End {
                at,
                level_cm,
                duration_min,
            },
        }
    }
}

impl LogRecord {
    /// Pack the record into its wire form.
    pub fn encode(&self) -> Vec<u8, END_LEN> {
        let mut buf = Vec::new();
        match *self {
            LogRecord::Start { at, level_cm } => {
                push_header(&mut buf, &at, level_cm);
            }
            LogRecord::End {
                at,
                level_cm,
                duration_min,
            } => {
                push_header(&mut buf, &at, level_cm);
                let _ = buf.extend_from_slice(&duration_min.to_be_bytes());
            }
        }
        buf
    }
}

/// Shared 7-byte prefix: [year-2000, month, day, hour, minute, second, level].
///
/// The year offset saturates at 255 and the level is clamped to 0..=255
/// before truncation, so neither field can wrap.
fn push_header(buf: &mut Vec<u8, END_LEN>, at: &Timestamp, level_cm: f32) {
    let year = at.year.saturating_sub(2000).min(255) as u8;
    let level = level_cm.clamp(0.0, 255.0) as u8;
    let _ = buf.extend_from_slice(&[
        year, at.month, at.day, at.hour, at.minute, at.second, level,
    ]);
}

/// Sequential record writer over a byte-addressed storage device.
pub struct EventLogWriter {
    cursor: usize,
    full: bool,
}

impl EventLogWriter {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            full: false,
        }
    }

    /// Bytes written so far.
    pub fn bytes_used(&self) -> usize {
        self.cursor
    }

    /// True once an append has been refused for lack of space.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Append one record.
    ///
    /// Capacity is checked before the first byte is written, so a record
    /// is either stored whole or not at all.
    pub fn append<S: StoragePort>(
        &mut self,
        storage: &mut S,
        record: &LogRecord,
    ) -> Result<(), StorageError> {
        if self.full {
            return Err(StorageError::Full);
        }
        let bytes = record.encode();
        let capacity = storage.capacity().min(ADDRESS_SPACE);
        if self.cursor + bytes.len() > capacity {
            self.full = true;
            return Err(StorageError::Full);
        }
        for (offset, byte) in bytes.iter().enumerate() {
            storage.write_byte((self.cursor + offset) as u16, *byte)?;
        }
        self.cursor += bytes.len();
        Ok(())
    }
}

impl Default for EventLogWriter {
    fn default() -> Self {
        Self::new()
    }
}
