use crate::cpu::Cpu;

use super::GameBoyBus;

/// High-level Game Boy machine.
///
/// Owns the CPU core and the bus and is the main entry point for the
/// driver binary: construct it, load a ROM, then call [`GameBoy::step`]
/// in a loop until the pause flag is observed (or the CPU hard-locks on
/// an invalid opcode).
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    paused: bool,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// Create a machine in the post-boot state: registers as the DMG boot
    /// ROM leaves them, PC at the cartridge entry point 0x0100, no overlay.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(None),
            paused: false,
        }
    }

    /// Create a machine that executes the given 256-byte boot ROM from
    /// power-on: registers zeroed, PC at 0x0000, overlay mapped until the
    /// boot code writes to 0xFF50.
    pub fn new_with_boot_rom(boot_rom: Vec<u8>) -> Self {
        Self {
            cpu: Cpu::new_power_on(),
            bus: GameBoyBus::new(Some(boot_rom)),
            paused: false,
        }
    }

    /// Load a ROM image into the cartridge slot.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.bus.load_rom(rom);
    }

    /// Execute one instruction and then give the interrupt controller a
    /// chance to dispatch, returning the total m-cycle cost.
    ///
    /// A return of 0 means the CPU has hard-locked on an invalid opcode;
    /// the machine pauses itself so driver loops terminate.
    pub fn step(&mut self) -> u32 {
        let mut cycles = self.cpu.step(&mut self.bus);
        if cycles == 0 && self.cpu.is_locked() {
            self.paused = true;
            return 0;
        }
        if let Some(extra) = self.cpu.handle_interrupts(&mut self.bus) {
            cycles += extra;
        }
        cycles
    }

    /// Step until the pause flag is set, accumulating the m-cycle count.
    pub fn run(&mut self) -> u64 {
        let mut total: u64 = 0;
        while !self.paused {
            total += u64::from(self.step());
        }
        total
    }

    /// Request that [`GameBoy::run`] (and external driver loops honouring
    /// [`GameBoy::is_paused`]) stop after the current instruction.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Bytes the program has pushed out of the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    /// Drain the serial output buffer, handing the bytes to the caller.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }
}
