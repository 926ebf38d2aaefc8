use crate::cpu::Bus;

use super::{
    cartridge::Cartridge, serial::Serial, BOOT_ROM_SIZE, HRAM_SIZE, IO_SIZE, OAM_SIZE, VRAM_SIZE,
    WRAM_SIZE,
};

/// The DMG memory bus.
///
/// Each region of the address map is backed by its own store rather than a
/// flat 64 KiB array, so the aliasing rules (Echo RAM, the unusable hole,
/// the boot-ROM overlay) fall out of the address decode instead of being
/// patched in afterwards. Bus operations never fail: reads of unmapped or
/// blocked addresses return 0xFF and writes to them are discarded.
pub(crate) struct GameBoyBus {
    vram: [u8; VRAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    ie_reg: u8,
    pub(crate) serial: Serial,
    cartridge: Option<Cartridge>,
    /// Optional 256-byte boot ROM overlaying 0x0000-0x00FF while
    /// `boot_enabled` holds.
    boot_rom: Option<Vec<u8>>,
    /// Overlay latch. Starts true when a boot ROM is present and drops
    /// permanently on the first non-zero write to 0xFF50.
    boot_enabled: bool,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GameBoyBus {
    pub(super) fn new(boot_rom: Option<Vec<u8>>) -> Self {
        debug_assert!(boot_rom
            .as_ref()
            .map_or(true, |b| b.len() == BOOT_ROM_SIZE));
        let boot_enabled = boot_rom.is_some();
        Self {
            vram: [0; VRAM_SIZE],
            wram: [0; WRAM_SIZE],
            oam: [0; OAM_SIZE],
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
            ie_reg: 0,
            serial: Serial::default(),
            cartridge: None,
            boot_rom,
            boot_enabled,
        }
    }

    pub(super) fn load_rom(&mut self, rom: &[u8]) {
        self.cartridge = Some(Cartridge::new(rom.to_vec()));
    }

    /// Whether the boot-ROM overlay is still mapped over 0x0000-0x00FF.
    pub(crate) fn boot_enabled(&self) -> bool {
        self.boot_enabled
    }

    /// Current cartridge bank register (1 when no cartridge is loaded).
    pub(crate) fn rom_bank(&self) -> u16 {
        self.cartridge.as_ref().map_or(1, Cartridge::rom_bank)
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            // Boot ROM overlay while mapped.
            0x0000..=0x00FF if self.boot_enabled => self
                .boot_rom
                .as_ref()
                .and_then(|rom| rom.get(addr as usize))
                .copied()
                .unwrap_or(0xFF),

            // Cartridge ROM: fixed bank 0 plus the switchable window.
            0x0000..=0x7FFF => match &self.cartridge {
                Some(cart) => cart.rom_read(addr),
                None => 0xFF,
            },

            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],

            // External cartridge RAM is not modelled.
            0xA000..=0xBFFF => 0xFF,

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],

            // Echo RAM mirrors WRAM.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],

            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],

            // Unusable area.
            0xFEA0..=0xFEFF => 0xFF,

            // Serial transfer registers.
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.sc,

            // Interrupt flags: upper three bits always read as 1.
            0xFF0F => self.io[0x0F] | 0b1110_0000,

            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize],

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],

            0xFFFF => self.ie_reg,
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            // Cartridge ROM area: read-only from the CPU's point of view;
            // writes drive the MBC registers (RAM enable, bank select,
            // upper bits, mode).
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.rom_write(addr, value);
                }
            }

            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,

            // External cartridge RAM is not modelled; writes vanish.
            0xA000..=0xBFFF => {}

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,

            // Echo RAM: writes land in the underlying WRAM.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,

            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,

            // Writes to the unusable area are discarded.
            0xFEA0..=0xFEFF => {}

            // Serial transfer registers.
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value),

            // Interrupt flags: only the lower 5 bits are writable.
            0xFF0F => self.io[0x0F] = value & 0x1F,

            // Boot ROM disable. The first non-zero write unmaps the overlay
            // for the rest of the run; the value itself is not stored.
            0xFF50 => {
                if value != 0 && self.boot_enabled {
                    log::debug!("boot ROM unmapped (0xFF50 <- 0x{value:02X})");
                    self.boot_enabled = false;
                }
            }

            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize] = value,

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,

            0xFFFF => self.ie_reg = value,
        }
    }
}
