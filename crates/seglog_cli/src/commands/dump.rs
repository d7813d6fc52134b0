//! Dump command implementation.

use seglog_core::{Log, LogConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Runs the dump command.
///
/// The output is the concatenation of every store file, oldest segment
/// first: `| len (8, BE) | record | ...`.
pub fn run(
    path: &Path,
    config: LogConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = super::open_existing(path, config)?;

    let written = match output {
        Some(output) => {
            let mut writer = BufWriter::new(File::create(output)?);
            let n = dump(&log, &mut writer)?;
            writer.flush()?;
            n
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            dump(&log, &mut writer)?
        }
    };

    tracing::info!(bytes = written, "dumped log");
    Ok(())
}

fn dump<W: Write>(log: &Log, writer: &mut W) -> io::Result<u64> {
    let mut reader = log.reader();
    io::copy(&mut reader, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seglog_core::{read_frame, Record, RecordCodec};

    #[test]
    fn dump_contains_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let log = Log::open(dir.path(), LogConfig::new().max_store_bytes(32)).unwrap();
        for value in ["one", "two", "three"] {
            log.append(Record::from(value)).unwrap();
        }

        let mut out = Vec::new();
        let n = dump(&log, &mut out).unwrap();
        assert_eq!(n, out.len() as u64);

        let mut cursor = io::Cursor::new(out);
        let mut offsets = Vec::new();
        while let Some(frame) = read_frame(&mut cursor).unwrap() {
            offsets.push(seglog_core::CborCodec.decode(&frame).unwrap().offset);
        }
        assert_eq!(offsets, vec![0, 1, 2]);
    }
}
