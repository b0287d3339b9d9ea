use std::io;
use std::path::PathBuf;

use strum_macros::Display;
use thiserror::Error;

/// Part of the input image that was being read when it ran out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum Section {
    #[strum(serialize = "header")]
    Header,
    #[strum(serialize = "PRG-ROM")]
    ProgramRom,
    #[strum(serialize = "CHR-ROM")]
    GraphicsRom,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Permission denied opening input file: {}", .0.display())]
    InputPermissionDenied(PathBuf),
    #[error("Could not open input file {}: {source}", .path.display())]
    InputOpen { path: PathBuf, source: io::Error },
    #[error("PRG-ROM is empty: header declares 0 program banks")]
    EmptyProgramRom,
    #[error("PRG-ROM too large: {0} banks declared, at most 2 supported")]
    UnsupportedProgramSize(u8),
    #[error("CHR-RAM is not supported: header declares 0 graphics banks")]
    UnsupportedGraphicsRam,
    #[error("CHR-ROM too large: {0} banks declared, exactly 1 supported")]
    UnsupportedGraphicsSize(u8),
    #[error("Input truncated in {section}: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        section: Section,
        expected: usize,
        actual: usize,
    },
    #[error("Error reading input: {0}")]
    Read(#[source] io::Error),
    #[error("Error writing {}: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
}

impl ConvertError {
    pub(crate) fn from_open(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ConvertError::InputNotFound(path),
            io::ErrorKind::PermissionDenied => ConvertError::InputPermissionDenied(path),
            _ => ConvertError::InputOpen { path, source },
        }
    }
}
