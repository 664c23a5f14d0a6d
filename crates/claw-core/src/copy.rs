//! Buffered stream copy with progress reporting.
//!
//! Export and import both move entry data through one reusable 64 KB buffer,
//! reporting each chunk to the active `ProgressCallback`.

use std::io;
use std::io::Read;
use std::io::Write;

use crate::ProgressCallback;
use crate::Result;

/// Buffer size for entry data copies (64 KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for entry copies.
///
/// # Examples
///
/// ```no_run
/// use claw_core::NoopProgress;
/// use claw_core::copy::CopyBuffer;
/// use claw_core::copy::copy_with_progress;
///
/// # fn example() -> claw_core::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.txt")?;
/// let mut output = std::fs::File::create("output.txt")?;
///
/// let copied = copy_with_progress(&mut input, &mut output, &mut buffer, &mut NoopProgress)?;
/// println!("Copied {copied} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer`, reporting every chunk to `progress`.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn copy_with_progress<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ClawError;
    use crate::NoopProgress;
    use std::io::Cursor;
    use std::path::Path;

    #[derive(Default)]
    struct ChunkCounter {
        chunks: usize,
        bytes: u64,
    }

    impl ProgressCallback for ChunkCounter {
        fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

        fn on_bytes_written(&mut self, bytes: u64) {
            self.chunks += 1;
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &Path) {}

        fn on_complete(&mut self) {}
    }

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let copied = copy_with_progress(&mut input, &mut output, &mut buffer, &mut NoopProgress)
            .unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks_reports_progress() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();
        let mut counter = ChunkCounter::default();

        let copied = copy_with_progress(&mut input, &mut output, &mut buffer, &mut counter).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
        assert_eq!(counter.chunks, 4);
        assert_eq!(counter.bytes, copied);
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        struct InterruptedReader {
            data: Cursor<Vec<u8>>,
            calls: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                self.data.read(buf)
            }
        }

        let test_data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: Cursor::new(test_data.clone()),
            calls: 0,
        };
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        copy_with_progress(&mut reader, &mut output, &mut buffer, &mut NoopProgress).unwrap();
        assert_eq!(output, test_data);
    }

    #[test]
    fn test_copy_with_write_failure() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("write failed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut input = Cursor::new(vec![1u8; 10]);
        let mut buffer = CopyBuffer::new();
        let result = copy_with_progress(&mut input, &mut FailingWriter, &mut buffer, &mut NoopProgress);
        assert!(matches!(result, Err(ClawError::Io(_))));
    }
}
