use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use awstape_format::{TapeEntry, TapeReader, TransformWriter, EBCDIC_TO_ASCII};

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};

/// Records land in `file<NNNN>/record<NNNNNN>.bin`, the file number counting
/// tape marks.
pub(crate) fn record_path(base: &Path, file: usize, record: usize) -> PathBuf {
    base.join(format!("file{:04}", file))
        .join(format!("record{:06}.bin", record))
}

fn write_record(path: &Path, data: &[u8], ebcdic: bool) -> Result<()> {
    let create_err = |source| Error::CreateFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(create_err)?;
    let mut out = BufWriter::new(file);

    if ebcdic {
        let mut writer = TransformWriter::new(out, &EBCDIC_TO_ASCII);
        writer.write_all(data).map_err(create_err)?;
        writer.into_inner().map_err(create_err)?;
    } else {
        out.write_all(data).map_err(create_err)?;
        out.flush().map_err(create_err)?;
    }

    Ok(())
}

pub fn run(args: ExtractArgs, verbose: bool) -> Result<()> {
    let mut reader = TapeReader::open(&args.tape).map_err(|source| Error::OpenTape {
        path: args.tape.clone(),
        source,
    })?;

    let mut file_index = 0;
    let mut record_index = 0;
    let mut extracted = 0;

    for entry in reader.entries() {
        let entry = entry.map_err(|source| Error::ReadTape {
            path: args.tape.clone(),
            source,
        })?;

        match entry {
            TapeEntry::TapeMark => {
                tracing::debug!(file = file_index, records = record_index, "tape mark");
                file_index += 1;
                record_index = 0;
            }
            TapeEntry::Record(data) => {
                let path = record_path(&args.output, file_index, record_index);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }

                write_record(&path, &data, args.ebcdic)?;

                if verbose {
                    println!("{}", path.display());
                }

                record_index += 1;
                extracted += 1;
            }
        }
    }

    println!("Extracted {} records", extracted);
    Ok(())
}
