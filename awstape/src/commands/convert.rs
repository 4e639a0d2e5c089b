use std::fs::File;
use std::io::{BufReader, BufWriter};

use awstape_format::TransformWriter;

use crate::cli::ConvertArgs;
use crate::error::{Error, Result};

pub fn run(args: ConvertArgs) -> Result<()> {
    let input = File::open(&args.input).map_err(|source| Error::OpenFile {
        path: args.input.clone(),
        source,
    })?;
    let output = File::create(&args.output).map_err(|source| Error::CreateFile {
        path: args.output.clone(),
        source,
    })?;

    let convert_err = |source| Error::Convert {
        path: args.input.clone(),
        source,
    };

    let mut writer = TransformWriter::new(BufWriter::new(output), args.codepage.transliterator());
    let bytes = std::io::copy(&mut BufReader::new(input), &mut writer).map_err(convert_err)?;
    writer.into_inner().map_err(convert_err)?;

    tracing::debug!(bytes, codepage = %args.codepage, "converted file");

    Ok(())
}
