//! Memory initialization file (MIF) output, 8 bits wide with hex addresses and data.

use std::io;
use std::io::Write;

pub struct MifWriter<W: Write> {
    writer: W,
    depth: usize,
    address: usize,
}

impl<W: Write> MifWriter<W> {
    /// Writes the preamble for a memory block of `depth` bytes.
    pub fn new(mut writer: W, depth: usize) -> io::Result<Self> {
        writeln!(writer, "DEPTH={};", depth)?;
        writeln!(writer, "WIDTH=8;")?;
        writeln!(writer, "ADDRESS_RADIX=HEX;")?;
        writeln!(writer, "DATA_RADIX=HEX;")?;
        writeln!(writer, "CONTENT")?;
        writeln!(writer, "BEGIN")?;
        Ok(Self {
            writer,
            depth,
            address: 0,
        })
    }

    /// Appends one line per byte, continuing from the last written address.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.address + bytes.len() > self.depth {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} bytes at address {:04X} overflow memory depth {}",
                    bytes.len(),
                    self.address,
                    self.depth
                ),
            ));
        }
        for b in bytes {
            writeln!(self.writer, "{:04X} : {:02x};", self.address, b)?;
            self.address += 1;
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        write!(self.writer, "END;")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(depth: usize, chunks: &[&[u8]]) -> String {
        let mut mif = MifWriter::new(Vec::new(), depth).unwrap();
        for c in chunks {
            mif.write_bytes(c).unwrap();
        }
        String::from_utf8(mif.finish().unwrap()).unwrap()
    }

    #[test]
    fn full_file_layout() {
        let out = render(3, &[&[0x00, 0xAB, 0x0F]]);
        assert_eq!(
            out,
            "DEPTH=3;\nWIDTH=8;\nADDRESS_RADIX=HEX;\nDATA_RADIX=HEX;\nCONTENT\nBEGIN\n\
             0000 : 00;\n0001 : ab;\n0002 : 0f;\nEND;"
        );
    }

    #[test]
    fn addresses_continue_across_writes() {
        let out = render(0x20, &[&[0x11; 0x10], &[0x22; 0x10]]);
        assert!(out.contains("000F : 11;\n0010 : 22;\n"));
        assert!(out.contains("001F : 22;\nEND;"));
    }

    #[test]
    fn upper_addresses_are_uppercase() {
        let mut mif = MifWriter::new(Vec::new(), 0x8000).unwrap();
        mif.write_bytes(&vec![0xFE; 0x8000]).unwrap();
        let out = String::from_utf8(mif.finish().unwrap()).unwrap();
        assert!(out.contains("\n7FFF : fe;\nEND;"));
        assert!(out.contains("\n3ABC : fe;\n"));
        assert_eq!(out.lines().count(), 6 + 0x8000 + 1);
    }

    #[test]
    fn overflowing_depth_is_an_error() {
        let mut mif = MifWriter::new(Vec::new(), 2).unwrap();
        mif.write_bytes(&[1, 2]).unwrap();
        let err = mif.write_bytes(&[3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
