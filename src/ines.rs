//! iNES cartridge header.
//!
//! Only the fields needed to lay out PRG and CHR memory are interpreted: the two bank counts and
//! the nametable mirroring bit. Everything else in the 16 byte header is carried along raw.

use bitflags::bitflags;
use strum_macros::Display;

use crate::{ConvertError, KIB};

pub const HEADER_LEN: usize = 16;
pub const PRG_BANK_LEN: usize = 16 * KIB;
pub const CHR_BANK_LEN: usize = 8 * KIB;
/// CPU address space covered by the PRG memory block.
pub const PRG_SPACE_LEN: usize = 32 * KIB;

const INES_SIGNATURE: &[u8; 4] = b"NES\x1A";

bitflags! {
    #[derive(Default)]
    pub struct Flags6: u8 {
        const VERTICAL_MIRRORING = 0b00000001;
        const BATTERY = 0b00000010;
        const TRAINER = 0b00000100;
        const FOUR_SCREEN = 0b00001000;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum Mirroring {
    #[strum(serialize = "VERTICAL")]
    Vertical,
    #[strum(serialize = "HORIZONTAL")]
    Horizontal,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrgBanks {
    One,
    Two,
}

impl PrgBanks {
    pub fn count(&self) -> usize {
        match self {
            PrgBanks::One => 1,
            PrgBanks::Two => 2,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.count() * PRG_BANK_LEN
    }
}

/// Header contents this tool can turn into memory images.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SupportedLayout {
    pub prg_banks: PrgBanks,
    pub mirroring: Mirroring,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct InesHeader {
    signature: [u8; 4],
    prg_banks: u8,
    chr_banks: u8,
    flags6: u8,
    rest: [u8; 9],
}

impl InesHeader {
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        let mut signature = [0; 4];
        signature.copy_from_slice(&bytes[0..4]);
        let mut rest = [0; 9];
        rest.copy_from_slice(&bytes[7..HEADER_LEN]);
        Self {
            signature,
            prg_banks: bytes[4],
            chr_banks: bytes[5],
            flags6: bytes[6],
            rest,
        }
    }

    pub fn has_signature(&self) -> bool {
        &self.signature == INES_SIGNATURE
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn flags6(&self) -> Flags6 {
        Flags6::from_bits_truncate(self.flags6)
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.flags6().contains(Flags6::VERTICAL_MIRRORING) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    /// Checks the program bank count first, then the graphics bank count.
    pub fn validate(&self) -> Result<SupportedLayout, ConvertError> {
        let prg_banks = match self.prg_banks {
            0 => return Err(ConvertError::EmptyProgramRom),
            1 => PrgBanks::One,
            2 => PrgBanks::Two,
            n => return Err(ConvertError::UnsupportedProgramSize(n)),
        };
        match self.chr_banks {
            0 => return Err(ConvertError::UnsupportedGraphicsRam),
            1 => {}
            n => return Err(ConvertError::UnsupportedGraphicsSize(n)),
        }
        Ok(SupportedLayout {
            prg_banks,
            mirroring: self.mirroring(),
        })
    }
}
