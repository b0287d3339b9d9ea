use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use crate::ines::{
    InesHeader, Mirroring, PrgBanks, CHR_BANK_LEN, HEADER_LEN, PRG_BANK_LEN, PRG_SPACE_LEN,
};
use crate::{ConvertError, Flags6, MifWriter, Section};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub prefix: String,
    pub out_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            prefix: String::from("dump"),
            out_dir: PathBuf::from("."),
        }
    }
}

impl ConvertOptions {
    pub fn prg_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}-prg.mif", self.prefix))
    }

    pub fn chr_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}-chr.mif", self.prefix))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConversionReport {
    pub mirroring: Mirroring,
    pub prg_banks: PrgBanks,
    pub prg_path: PathBuf,
    pub chr_path: PathBuf,
}

impl ConversionReport {
    /// A single PRG bank is written twice to fill the 32 KiB block.
    pub fn prg_mirrored(&self) -> bool {
        self.prg_banks == PrgBanks::One
    }
}

pub fn convert(input: &Path, options: &ConvertOptions) -> Result<ConversionReport, ConvertError> {
    log::info!("Loading ROM from path: {}", input.display());
    let file =
        File::open(input).map_err(|e| ConvertError::from_open(input.to_path_buf(), e))?;
    convert_reader(BufReader::new(file), options)
}

/// Validates the header and reads both images before any output file is created.
pub fn convert_reader<R: Read>(
    mut reader: R,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let header = read_header(&mut reader)?;
    log::debug!("Raw header: {:?}", header);
    if !header.has_signature() {
        log::warn!("Input does not start with the iNES signature, converting anyway");
    }

    let layout = header.validate()?;
    let flags = header.flags6();
    if flags.contains(Flags6::TRAINER) {
        log::debug!("Trainer flag set, ignoring it");
    }
    if flags.contains(Flags6::BATTERY) {
        log::debug!("Battery flag set, PRG-RAM is not part of the output");
    }

    log::info!("{} MIRRORING ENABLED", layout.mirroring);
    log::info!("configure datapath accordingly");

    let prg = read_section(&mut reader, layout.prg_banks.byte_len(), Section::ProgramRom)?;
    let chr = read_section(&mut reader, CHR_BANK_LEN, Section::GraphicsRom)?;
    drop(reader);

    let prg_path = options.prg_path();
    write_mif(&prg_path, PRG_SPACE_LEN, |mif| {
        mif.write_bytes(&prg)?;
        if layout.prg_banks == PrgBanks::One {
            log::debug!("Mirroring single PRG bank to {:04X}", PRG_BANK_LEN);
            mif.write_bytes(&prg)?;
        }
        Ok(())
    })?;
    log::info!("Wrote {}", prg_path.display());

    let chr_path = options.chr_path();
    if let Err(e) = write_mif(&chr_path, CHR_BANK_LEN, |mif| mif.write_bytes(&chr)) {
        remove_output(&prg_path);
        return Err(e);
    }
    log::info!("Wrote {}", chr_path.display());

    Ok(ConversionReport {
        mirroring: layout.mirroring,
        prg_banks: layout.prg_banks,
        prg_path,
        chr_path,
    })
}

fn read_header<R: Read>(reader: &mut R) -> Result<InesHeader, ConvertError> {
    let bytes = read_section(reader, HEADER_LEN, Section::Header)?;
    let mut header = [0; HEADER_LEN];
    header.copy_from_slice(&bytes);
    Ok(InesHeader::parse(&header))
}

fn read_section<R: Read>(
    reader: &mut R,
    len: usize,
    section: Section,
) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Vec::with_capacity(len);
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(ConvertError::Read)?;
    if buf.len() < len {
        return Err(ConvertError::TruncatedInput {
            section,
            expected: len,
            actual: buf.len(),
        });
    }
    log::debug!("Read {} bytes of {}", len, section);
    Ok(buf)
}

fn write_mif<F>(path: &Path, depth: usize, contents: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut MifWriter<BufWriter<File>>) -> std::io::Result<()>,
{
    let output_error = |source: std::io::Error| ConvertError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output_error)?;
    let result = MifWriter::new(BufWriter::new(file), depth)
        .and_then(|mut mif| {
            contents(&mut mif)?;
            mif.finish()
        })
        .map(|_| ())
        .map_err(output_error);
    if result.is_err() {
        remove_output(path);
    }
    result
}

/// Deletes an output file written by a failed run.
fn remove_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("Removed partial output {}", path.display()),
        Err(e) => log::warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}
