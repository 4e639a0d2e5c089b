use std::io::{Result, Write};

use crate::{BlockHeader, TapeBlock};

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl Serialize for BlockHeader {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl Serialize for TapeBlock {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header().write(writer)?;
        writer.write_all(&self.data)?;

        tracing::debug!(
            current_length = self.current_length,
            previous_length = self.previous_length,
            flags = %self.flags1,
            "serialized TapeBlock"
        );

        Ok(())
    }
}
