//! Memory access and hex dumps
//!
//! [`MemoryView`] wraps any byte slice: `&[u8]` for read-only access, `&mut
//! [u8]` when writes are needed.
//!
//! ## Hex dump layout
//!
//! ```text
//! 00000040 48 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21 00 00 00 |Hello,.world!...|
//! ```
//!
//! Lines start on a multiple of 16. The gutter shows bytes 0x21..=0x7e as
//! ASCII and everything else as `.`.

use std::fmt;

use jolly_spec::encoding::check_span;
use jolly_spec::{
    decode_address, decode_instruction, encode_address, encode_instruction, Address, Instruction,
    JollyError, Result,
};

/// Bytes shown per hex dump line
pub const HEXDUMP_LINE_SIZE: usize = 16;

/// Lines shown when the caller does not ask for a count
pub const DEFAULT_HEXDUMP_LINES: usize = 16;

const FIRST_PRINTABLE: u8 = 0x21;
const LAST_PRINTABLE: u8 = 0x7e;

#[derive(Debug, Clone, Copy)]
pub struct MemoryView<B> {
    bytes: B,
}

impl<B: AsRef<[u8]>> MemoryView<B> {
    pub fn new(bytes: B) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn read_byte(&self, addr: Address) -> Result<u8> {
        let index = check_span(self.bytes.as_ref(), addr, 1)?;
        Ok(self.bytes.as_ref()[index])
    }

    pub fn read_bytes(&self, addr: Address, len: usize) -> Result<&[u8]> {
        let start = check_span(self.bytes.as_ref(), addr, len)?;
        Ok(&self.bytes.as_ref()[start..start + len])
    }

    pub fn read_address(&self, addr: Address) -> Result<Address> {
        decode_address(self.bytes.as_ref(), addr)
    }

    pub fn read_instruction(&self, addr: Address) -> Result<Instruction> {
        decode_instruction(self.bytes.as_ref(), addr)
    }

    /// Dump `lines` lines starting at the line containing `start`
    pub fn hex_dump(&self, start: Address, lines: usize, highlight: Option<Address>) -> Result<HexDump> {
        let first = start - start % HEXDUMP_LINE_SIZE as Address;
        let total = lines
            .checked_mul(HEXDUMP_LINE_SIZE)
            .ok_or(JollyError::OutOfRange { address: u64::MAX })?;
        let bytes = self.read_bytes(first, total)?;

        let lines = bytes
            .chunks_exact(HEXDUMP_LINE_SIZE)
            .enumerate()
            .map(|(i, chunk)| {
                let address = first as u64 + (i * HEXDUMP_LINE_SIZE) as u64;
                let mut line = HexDumpLine {
                    address: address as Address,
                    bytes: [0; HEXDUMP_LINE_SIZE],
                    highlight: None,
                };
                line.bytes.copy_from_slice(chunk);
                line.highlight = highlight
                    .and_then(|h| (h as u64).checked_sub(address))
                    .filter(|offset| *offset < HEXDUMP_LINE_SIZE as u64)
                    .map(|offset| offset as usize);
                line
            })
            .collect();

        Ok(HexDump { lines })
    }

    /// Dump memory at the address stored at `pointer`, highlighting that address
    pub fn indirect_hex_dump(&self, pointer: Address, lines: usize) -> Result<HexDump> {
        let target = self.read_address(pointer)?;
        self.hex_dump(target, lines, Some(target))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MemoryView<B> {
    pub fn write_byte(&mut self, addr: Address, value: u8) -> Result<()> {
        let index = check_span(self.bytes.as_ref(), addr, 1)?;
        self.bytes.as_mut()[index] = value;
        Ok(())
    }

    pub fn write_address(&mut self, addr: Address, value: u32) -> Result<()> {
        encode_address(self.bytes.as_mut(), addr, value)
    }

    pub fn write_instruction(&mut self, addr: Address, instr: &Instruction) -> Result<()> {
        encode_instruction(self.bytes.as_mut(), addr, instr)
    }
}

/// One 16-byte hex dump line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDumpLine {
    pub address: Address,
    pub bytes: [u8; HEXDUMP_LINE_SIZE],
    /// Column of the emphasized byte, if it falls on this line
    pub highlight: Option<usize>,
}

impl HexDumpLine {
    /// Render the line, passing the highlighted byte's hex pair and gutter
    /// character through `emphasize`
    pub fn render_with(&self, emphasize: &dyn Fn(&str) -> String) -> String {
        let mut out = format!("{:08x} ", self.address);

        for (i, byte) in self.bytes.iter().enumerate() {
            if i == HEXDUMP_LINE_SIZE / 2 {
                out.push(' ');
            }
            let hex = format!("{:02x}", byte);
            if self.highlight == Some(i) {
                out.push_str(&emphasize(&hex));
            } else {
                out.push_str(&hex);
            }
            out.push(' ');
        }

        out.push('|');
        for (i, byte) in self.bytes.iter().enumerate() {
            let cell = gutter_char(*byte).to_string();
            if self.highlight == Some(i) {
                out.push_str(&emphasize(&cell));
            } else {
                out.push_str(&cell);
            }
        }
        out.push('|');
        out
    }
}

impl fmt::Display for HexDumpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|s| s.to_string()))
    }
}

/// A rendered-on-demand hex dump
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HexDump {
    lines: Vec<HexDumpLine>,
}

impl HexDump {
    pub fn lines(&self) -> &[HexDumpLine] {
        &self.lines
    }

    pub fn render_with(&self, emphasize: &dyn Fn(&str) -> String) -> String {
        self.lines
            .iter()
            .map(|line| line.render_with(emphasize))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for HexDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|s| s.to_string()))
    }
}

/// ASCII gutter cell for `byte`
pub fn gutter_char(byte: u8) -> char {
    if (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
