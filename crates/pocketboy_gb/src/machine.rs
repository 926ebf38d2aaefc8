mod bus;
mod cartridge;
mod gameboy;
mod serial;

pub(crate) use bus::GameBoyBus;
pub use gameboy::GameBoy;

/// Size of one cartridge ROM bank. ROM images are a positive multiple of
/// this; the bank count is `rom.len() / ROM_BANK_SIZE`.
pub const ROM_BANK_SIZE: usize = 0x4000;

/// Exact length of a DMG boot ROM image.
pub const BOOT_ROM_SIZE: usize = 0x100;

const VRAM_SIZE: usize = 0x2000;
const WRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const IO_SIZE: usize = 0x80;
const HRAM_SIZE: usize = 0x7F;
