//! File bridge: load a buffer from a text source, persist it to a text sink.
//!
//! Loading is not atomic. The buffer is reset first and lines are committed
//! one at a time, so a capacity overflow leaves the lines read so far in
//! place. Saving truncates and rewrites the named file in place, so a
//! symlinked destination updates its target and the file keeps its
//! permissions.

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::core::buffer::LineBuffer;
use crate::core::error::EditError;

/// Replace the content of `buffer` with the lines read from `reader`.
///
/// Each line loses its trailing `\n` and one `\r`. Invalid UTF-8 is
/// replaced lossily. Returns the number of lines loaded.
pub fn load_from<R: BufRead>(buffer: &mut LineBuffer, mut reader: R) -> Result<usize, EditError> {
    buffer.reset();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&raw);
        if buffer.is_full() {
            warn!(
                "Load stopped at {} lines: buffer capacity reached",
                buffer.len()
            );
            return Err(EditError::CapacityExceeded {
                capacity: buffer.capacity(),
            });
        }
        buffer.push(chomp(&text))?;
    }

    Ok(buffer.len())
}

/// Write every line of `buffer`, each followed by `\n`.
pub fn write_to<W: Write>(buffer: &LineBuffer, mut writer: W) -> io::Result<()> {
    for line in buffer.iter() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Load `path` into `buffer`. The buffer is untouched if the file cannot
/// be opened.
pub fn load_path(buffer: &mut LineBuffer, path: &Path) -> Result<usize, EditError> {
    validate_source(path)?;
    let file = fs::File::open(path).map_err(|e| EditError::io("open", path, e))?;

    let loaded = load_from(buffer, BufReader::new(file)).map_err(|e| match e {
        EditError::Stream(source) => EditError::io("read", path, source),
        other => other,
    })?;
    info!("Loaded {} line(s) from {}", loaded, path.display());
    Ok(loaded)
}

/// Save `buffer` to `path`, truncating whatever the file held before.
pub fn save_path(buffer: &LineBuffer, path: &Path) -> Result<(), EditError> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| EditError::io("write", path, e))?;

    write_to(buffer, BufWriter::new(&file)).map_err(|e| EditError::io("write", path, e))?;
    file.sync_all().map_err(|e| EditError::io("write", path, e))?;

    info!("Wrote {} line(s) to {}", buffer.len(), path.display());
    Ok(())
}

/// Strip one trailing `\n` and one trailing `\r`.
fn chomp(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

/// Refuse directories and special files that could hang the reader.
fn validate_source(path: &Path) -> Result<(), EditError> {
    let Ok(metadata) = fs::metadata(path) else {
        // Let open() report the real error
        return Ok(());
    };
    let reject = |reason: &str| -> Result<(), EditError> {
        debug!("Refusing to load {}: {}", path.display(), reason);
        Err(EditError::io(
            "open",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, reason.to_string()),
        ))
    };

    if metadata.is_dir() {
        return reject("is a directory");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        let ft = metadata.file_type();
        if ft.is_char_device() || ft.is_block_device() {
            return reject("is a device file");
        }
        if ft.is_fifo() || ft.is_socket() {
            return reject("is a pipe or socket");
        }
    }

    Ok(())
}
