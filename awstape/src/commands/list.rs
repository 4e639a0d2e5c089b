use std::io::Write;

use awstape_format::{BlockFlags, TapeReader};
use serde::Serialize;

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::format_size;

const HEADER: &str = "Offset      Length  Previous  Flags             Flags2";
const RULE: &str = "----------  ------  --------  ----------------  ------";

#[derive(Serialize)]
struct JsonBlock {
    offset: u64,
    current_length: u16,
    previous_length: u16,
    flags1: u8,
    flags2: u8,
    record_start: bool,
    tape_mark: bool,
    record_end: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    list_to(&args, &mut out)
}

pub(crate) fn list_to<W: Write>(args: &ListArgs, out: &mut W) -> Result<()> {
    let mut reader = TapeReader::open(&args.tape).map_err(|source| Error::OpenTape {
        path: args.tape.clone(),
        source,
    })?;

    if !args.json {
        writeln!(out, "{}", HEADER).map_err(Error::Output)?;
        writeln!(out, "{}", RULE).map_err(Error::Output)?;
    }

    let mut blocks = 0u64;
    let mut marks = 0u64;
    let mut data_bytes = 0u64;

    loop {
        let offset = reader.offset();
        let block = match reader.next_block() {
            Ok(Some(block)) => block,
            Ok(None) => break,
            Err(source) => {
                return Err(Error::ReadTape {
                    path: args.tape.clone(),
                    source,
                })
            }
        };

        blocks += 1;
        data_bytes += block.data.len() as u64;
        if block.is_tape_mark() {
            marks += 1;
        }

        if args.json {
            let entry = JsonBlock {
                offset,
                current_length: block.current_length,
                previous_length: block.previous_length,
                flags1: block.flags1.bits(),
                flags2: block.flags2,
                record_start: block.flags1.contains(BlockFlags::RECORD_START),
                tape_mark: block.flags1.contains(BlockFlags::TAPE_MARK),
                record_end: block.flags1.contains(BlockFlags::RECORD_END),
            };
            writeln!(out, "{}", serde_json::to_string(&entry)?).map_err(Error::Output)?;
        } else {
            writeln!(
                out,
                "{:#010x}  {:>6}  {:>8}  {:<16}  {:#04x}",
                offset,
                block.current_length,
                block.previous_length,
                block.flags1.to_string(),
                block.flags2,
            )
            .map_err(Error::Output)?;
        }
    }

    if !args.json {
        writeln!(out, "{}", RULE).map_err(Error::Output)?;
        writeln!(
            out,
            "{} blocks, {} tape marks, {} of data",
            blocks,
            marks,
            format_size(data_bytes)
        )
        .map_err(Error::Output)?;
    }

    Ok(())
}
