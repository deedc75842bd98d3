use std::{path::PathBuf, str::FromStr};

use bitstream::{mask, BitStream, MAX_FIELD_BITS};
use clap::Args;
use eyre::Context;

use super::Command;
use crate::{cli::HYPHEN, utils};

/// Subcommand for packing fields into binary data.
#[derive(Debug, Args)]
pub struct Pack {
    /// The fields to pack back-to-back, each given as `WIDTH:VALUE`.
    ///
    /// Widths range from 1 to 32 bits. Values are decimal, or
    /// hexadecimal with a `0x` prefix, and must fit their width.
    #[clap(required = true)]
    fields: Vec<Field>,

    /// The output path for the packed data.
    ///
    /// Defaults to "-" for writing to stdout.
    #[clap(short, default_value = HYPHEN)]
    output: PathBuf,

    /// The size of the output in bytes.
    ///
    /// Defaults to the number of bytes spanned by the fields. Any
    /// bytes past the last field are zero-filled.
    #[clap(long, env = "BITSTREAM_CAPACITY")]
    capacity: Option<usize>,
}

/// A single field to pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Field {
    bits: u32,
    value: u32,
}

fn parse_value(s: &str) -> Result<u32, String> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };

    value.map_err(|e| format!("invalid field value '{s}': {e}"))
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (bits, value) = s
            .split_once(':')
            .ok_or_else(|| format!("expected WIDTH:VALUE, got '{s}'"))?;

        let bits: u32 = bits
            .parse()
            .map_err(|e| format!("invalid field width '{bits}': {e}"))?;
        if !(1..=MAX_FIELD_BITS).contains(&bits) {
            return Err(format!(
                "field width must be within 1..={MAX_FIELD_BITS}, got {bits}"
            ));
        }

        let value = parse_value(value)?;
        if u64::from(value) > mask(bits) {
            return Err(format!("value {value:#x} does not fit into {bits} bits"));
        }

        Ok(Self { bits, value })
    }
}

/// Packs `fields` back-to-back into a buffer of `capacity` bytes.
///
/// The returned bytes always span the full capacity, which defaults to
/// the number of bytes the fields need.
fn pack(fields: &[Field], capacity: Option<usize>) -> eyre::Result<Vec<u8>> {
    let total_bits: u64 = fields.iter().map(|f| u64::from(f.bits)).sum();
    let needed = usize::try_from(total_bits.div_ceil(8))?;

    let capacity = capacity.unwrap_or(needed);
    if capacity < needed {
        eyre::bail!("fields span {needed} bytes, which exceeds the capacity of {capacity} bytes");
    }

    let mut stream = BitStream::with_capacity(capacity);
    stream
        .status()
        .with_context(|| format!("cannot create output of {capacity} bytes"))?;

    log::debug!(
        "Packing {} fields ({total_bits} bits) into {capacity} bytes",
        fields.len()
    );

    for field in fields {
        log::trace!(
            "Writing {} bits at bit {}: {:#x}",
            field.bits,
            stream.position(),
            field.value
        );
        stream.write(field.bits, field.value);
    }

    Ok(stream.as_bytes().to_vec())
}

impl Command for Pack {
    fn handle(self) -> eyre::Result<()> {
        let data = pack(&self.fields, self.capacity)?;
        utils::write_output(&self.output, &data)
    }
}
