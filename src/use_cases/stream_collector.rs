use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::domain::ClientError;

// Read size per call into the source.
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// Reads a byte source of unknown length into one contiguous buffer.
///
/// Chunks are kept in order and assembled once the source is exhausted, so the
/// output buffer is allocated exactly once. When an expected MD5 digest is
/// supplied the assembled bytes are verified before anything is returned.
#[derive(Debug, Clone, Copy)]
pub struct StreamCollector {
    chunk_size: usize,
}

impl Default for StreamCollector {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StreamCollector {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Collects every byte of `source` and checks it against `expected_md5`.
    ///
    /// An absent or empty digest skips verification. The source is consumed and
    /// dropped before this returns, whatever the outcome.
    pub fn collect<R: Read>(
        &self,
        mut source: R,
        expected_md5: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        let mut buffer = vec![0u8; self.chunk_size];
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut total = 0usize;

        loop {
            let len = match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(len) => len,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ClientError::StreamRead(err)),
            };
            chunks.push(buffer[..len].to_vec());
            total += len;
        }
        drop(source);

        let mut collected = Vec::with_capacity(total);
        for chunk in &chunks {
            collected.extend_from_slice(chunk);
        }

        if let Some(expected) = expected_md5.filter(|digest| !digest.is_empty()) {
            verify_md5(&collected, expected)?;
        }

        Ok(collected)
    }

    pub fn collect_file(
        &self,
        path: impl AsRef<Path>,
        expected_md5: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        let file = File::open(path).map_err(ClientError::StreamRead)?;
        self.collect(file, expected_md5)
    }

    pub fn collect_text<R: Read>(
        &self,
        source: R,
        expected_md5: Option<&str>,
    ) -> Result<String, ClientError> {
        let bytes = self.collect(source, expected_md5)?;
        String::from_utf8(bytes).map_err(|err| {
            ClientError::StreamRead(io::Error::new(io::ErrorKind::InvalidData, err))
        })
    }
}

// Lowercase hex MD5 of `bytes`.
pub fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}

fn verify_md5(bytes: &[u8], expected: &str) -> Result<(), ClientError> {
    let actual = md5_hex(bytes);
    if !actual.eq_ignore_ascii_case(expected) {
        tracing::debug!(%expected, %actual, "collected bytes failed md5 verification.");
        return Err(ClientError::Integrity {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
