use std::{
    io::{self, Write},
    path::PathBuf,
};

use bitstream::{BitStream, MAX_FIELD_BITS};
use clap::Args;
use eyre::Context;

use super::Command;
use crate::utils;

/// Subcommand for unpacking fields from binary data.
#[derive(Debug, Args)]
pub struct Unpack {
    /// The input file to unpack fields from.
    ///
    /// When the value is "-", input will be read from stdin.
    input: PathBuf,

    /// The widths of the fields to read in order, comma-separated.
    #[clap(
        short,
        long,
        required = true,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..=MAX_FIELD_BITS as i64)
    )]
    widths: Vec<u32>,

    /// The bit offset in the input to start reading at.
    #[clap(long, default_value_t = 0)]
    offset: u32,

    /// Prints the field values in hexadecimal.
    #[clap(long)]
    hex: bool,
}

/// Reads fields of the given `widths` from `data`, starting at bit `offset`.
fn unpack(data: &[u8], widths: &[u32], offset: u32) -> eyre::Result<Vec<u32>> {
    let mut stream = BitStream::from_bytes(data);
    stream
        .status()
        .with_context(|| format!("cannot read input of {} bytes", data.len()))?;

    if offset != 0 {
        if offset >= stream.size_bits() {
            eyre::bail!(
                "offset {offset} is past the end of the {} bit input",
                stream.size_bits()
            );
        }
        stream.seek(offset);
    }

    let total_bits: u64 = widths.iter().map(|&w| u64::from(w)).sum();
    if total_bits > u64::from(stream.remaining()) {
        eyre::bail!(
            "fields span {total_bits} bits, but only {} remain at offset {offset}",
            stream.remaining()
        );
    }

    log::debug!(
        "Unpacking {} fields from {} bytes at bit {offset}",
        widths.len(),
        data.len()
    );

    Ok(widths.iter().map(|&bits| stream.read(bits)).collect())
}

impl Command for Unpack {
    fn handle(self) -> eyre::Result<()> {
        let data = utils::read_input(&self.input)?;
        let values = unpack(&data, &self.widths, self.offset)?;

        let mut stdout = io::stdout().lock();
        for value in values {
            if self.hex {
                writeln!(stdout, "{value:#x}")?;
            } else {
                writeln!(stdout, "{value}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::pack::tests::pack_fields;

    #[test]
    fn unpack_packed_sequence() {
        let data = pack_fields(&["3:5", "29:0x12345678", "17:0x1ABCD"], None).unwrap();
        assert_eq!(
            unpack(&data, &[3, 29, 17], 0).unwrap(),
            [5, 0x1234_5678, 0x1ABCD]
        );

        // Skip the first field.
        assert_eq!(
            unpack(&data, &[29, 17], 3).unwrap(),
            [0x1234_5678, 0x1ABCD]
        );
    }

    #[test]
    fn reject_offset_past_end() {
        let data = [0xAB, 0xCD];
        assert!(unpack(&data, &[1], 16).is_err());
        assert!(unpack(&data, &[1], 17).is_err());
        assert!(unpack(&data, &[1], 15).is_ok());
    }

    #[test]
    fn reject_overlong_fields() {
        let data = [0xAB, 0xCD];
        assert!(unpack(&data, &[8, 9], 0).is_err());
        assert!(unpack(&data, &[8, 8], 1).is_err());
        assert_eq!(unpack(&data, &[8, 8], 0).unwrap().len(), 2);

        assert!(unpack(&[], &[1], 0).is_err());
    }
}
