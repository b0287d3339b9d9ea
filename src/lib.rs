pub use crate::converter::{convert, convert_reader, ConversionReport, ConvertOptions};
pub use crate::error::{ConvertError, Section};
pub use crate::ines::{Flags6, InesHeader, Mirroring, PrgBanks, SupportedLayout};
pub use crate::mif::MifWriter;

mod converter;
mod error;
pub mod ines;
pub mod mif;

const KIB: usize = 1024;
