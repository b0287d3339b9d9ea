#![allow(dead_code)]

use std::env;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

pub const PRG_BANK: usize = 16 * 1024;
pub const CHR_BANK: usize = 8 * 1024;

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::max())
        .is_test(true)
        .try_init();
}

/// Directory holding the ROM and the generated files of one test, removed on drop.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("nes-mif-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn mif_files(&self) -> Vec<PathBuf> {
        fs::read_dir(&self.0)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "mif"))
            .collect()
    }
}

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ScratchDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

pub struct Rom {
    pub prg: Vec<u8>,
    pub chr: Vec<u8>,
    pub bytes: Vec<u8>,
}

pub fn build_rom(prg_banks: u8, chr_banks: u8, flags6: u8) -> Rom {
    let prg: Vec<u8> = (0..prg_banks as usize * PRG_BANK)
        .map(|i| (i * 7 + i / 256) as u8)
        .collect();
    let chr: Vec<u8> = (0..chr_banks as usize * CHR_BANK)
        .map(|i| (i * 13 + 5) as u8)
        .collect();
    let mut bytes = b"NES\x1A".to_vec();
    bytes.extend([prg_banks, chr_banks, flags6]);
    bytes.extend([0; 9]);
    bytes.extend(&prg);
    bytes.extend(&chr);
    Rom { prg, chr, bytes }
}

pub fn write_rom(dir: &Path, rom: &Rom) -> PathBuf {
    let path = dir.join("game.nes");
    fs::write(&path, &rom.bytes).unwrap();
    path
}
