use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use awstape_format::{TapeWriter, Transformer, ASCII_TO_EBCDIC};

use crate::cli::CreateArgs;
use crate::error::{Error, Result};
use crate::util::format_size;

/// Absolute form of `path` with symlinks and `.`/`..` resolved. A path that
/// does not exist yet is resolved through its parent directory.
fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    if path.exists() {
        return path.canonicalize();
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    Ok(parent.canonicalize()?.join(name))
}

pub fn run(args: CreateArgs, verbose: bool) -> Result<()> {
    let tape = resolve(&args.tape).map_err(|source| Error::CreateTape {
        path: args.tape.clone(),
        source,
    })?;

    let includes_tape = args
        .files
        .iter()
        .any(|path| path == &args.tape || resolve(path).ok().as_ref() == Some(&tape));
    if includes_tape {
        return Err(Error::SelfInclusion {
            path: args.tape.clone(),
        });
    }

    if args.block_size == 0 {
        return Err(Error::InvalidBlockSize);
    }

    if args.tape.exists() && !args.force {
        return Err(Error::TapeExists {
            path: args.tape.clone(),
        });
    }

    let write_err = |source| Error::WriteTape {
        path: args.tape.clone(),
        source,
    };

    let file = File::create(&args.tape).map_err(|source| Error::CreateTape {
        path: args.tape.clone(),
        source,
    })?;
    let mut writer = TapeWriter::new(BufWriter::new(file))
        .with_block_size(args.block_size)
        .map_err(write_err)?;

    for path in args.files.iter() {
        let data = std::fs::read(path).map_err(|source| Error::OpenFile {
            path: path.clone(),
            source,
        })?;

        let data = if args.ebcdic {
            ASCII_TO_EBCDIC.transform_bytes(&data)?
        } else {
            data
        };

        writer.write_record(&data).map_err(write_err)?;
        writer.write_tape_mark().map_err(write_err)?;

        if verbose {
            println!("{}", path.display());
        }
    }

    // Two tape marks in a row end the tape.
    writer.write_tape_mark().map_err(write_err)?;

    let blocks = writer.blocks_written();
    let bytes = writer.bytes_written();
    writer.finish().map_err(write_err)?;

    println!(
        "Wrote {} blocks ({}) to {}",
        blocks,
        format_size(bytes),
        args.tape.display()
    );

    Ok(())
}
