//! Streamed ZIP construction for collected outputs.
//!
//! # Design
//! - Single pass into a non-seekable sink: entries are written with data
//!   descriptors, so the archive can go straight into an HTTP body as it is
//!   produced.
//! - Memory is bounded to one copy buffer regardless of how many outputs a
//!   job produced; each file is read and deflated chunk by chunk.
//! - Errors abort the stream where they occur; the consumer observes the
//!   truncation, the orchestrator logs the cause.

use std::path::Path;

use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, ZipEntryBuilder};
use futures_util::io::AsyncWriteExt;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::error::{JobError, JobResult};

const COPY_BUFFER_BYTES: usize = 64 * 1024;

/// Write a deflate-compressed ZIP of `names` (read from `dir`, stored under
/// their base names) into `sink`.
///
/// # Errors
///
/// Returns [`JobError::Io`] for read/write failures and
/// [`JobError::ArchiveBuild`] for ZIP-level failures.
pub async fn write_archive<W>(dir: &Path, names: &[String], sink: W) -> JobResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut writer = ZipFileWriter::with_tokio(sink);
    for name in names {
        let path = dir.join(name);
        let mut file = File::open(&path)
            .await
            .map_err(|error| JobError::io("open_output", &path, error))?;
        let entry = ZipEntryBuilder::new(name.clone().into(), Compression::Deflate);
        let mut entry_writer = writer
            .write_entry_stream(entry)
            .await
            .map_err(|error| JobError::archive("start_entry", &path, error))?;
        copy_file(&mut file, &mut entry_writer, &path).await?;
        entry_writer
            .close()
            .await
            .map_err(|error| JobError::archive("finish_entry", &path, error))?;
    }
    writer
        .close()
        .await
        .map_err(|error| JobError::archive("finish_archive", dir, error))?;
    Ok(())
}

async fn copy_file<R, W>(reader: &mut R, writer: &mut W, path: &Path) -> JobResult<()>
where
    R: AsyncRead + Unpin,
    W: futures_util::io::AsyncWrite + Unpin,
{
    let mut buffer = vec![0_u8; COPY_BUFFER_BYTES];
    loop {
        let read = reader
            .read(&mut buffer)
            .await
            .map_err(|error| JobError::io("read_output", path, error))?;
        if read == 0 {
            return Ok(());
        }
        writer
            .write_all(&buffer[..read])
            .await
            .map_err(|error| JobError::io("write_archive_entry", path, error))?;
    }
}
