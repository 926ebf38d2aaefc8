//! Driver for the DMG emulation core: file loading, the run loop, and the
//! serial-output sink (stdout).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

use pocketboy_gb::machine::{BOOT_ROM_SIZE, ROM_BANK_SIZE};
use pocketboy_gb::GameBoy;

/// Run configuration assembled by the CLI.
#[derive(TypedBuilder)]
pub struct RunConfig {
    /// Cartridge ROM image to execute.
    rom_path: PathBuf,
    /// Optional 256-byte boot ROM; when absent the machine starts in the
    /// post-boot state.
    #[builder(default)]
    boot_rom_path: Option<PathBuf>,
    /// Start from the post-boot register state even when a boot ROM is
    /// available.
    #[builder(default)]
    skip_boot: bool,
    /// Emit a per-instruction trace line.
    #[builder(default)]
    debug: bool,
}

/// Load the configured ROMs, build the machine, and drive it until a pause
/// is observed.
///
/// Configuration problems (unreadable files, bad image sizes) and a CPU
/// hard-lock on an undefined opcode are reported as errors; the process
/// exit code distinguishes them from a clean pause.
pub fn run(config: RunConfig) -> Result<()> {
    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM {}", config.rom_path.display()))?;
    if rom.is_empty() || rom.len() % ROM_BANK_SIZE != 0 {
        bail!(
            "ROM {} is {} bytes; expected a positive multiple of 0x{ROM_BANK_SIZE:X}",
            config.rom_path.display(),
            rom.len()
        );
    }

    let boot_rom = match &config.boot_rom_path {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM {}", path.display()))?;
            if data.len() != BOOT_ROM_SIZE {
                bail!(
                    "boot ROM {} is {} bytes; expected exactly {BOOT_ROM_SIZE}",
                    path.display(),
                    data.len()
                );
            }
            Some(data)
        }
        None => None,
    };

    let mut gb = match boot_rom {
        Some(data) if !config.skip_boot => {
            log::info!("starting from the boot ROM");
            GameBoy::new_with_boot_rom(data)
        }
        _ => {
            if config.skip_boot && config.boot_rom_path.is_some() {
                log::info!("--skip-boot set; ignoring the boot ROM");
            }
            GameBoy::new()
        }
    };
    gb.load_rom(&rom);
    log::info!(
        "loaded {} ({} banks)",
        config.rom_path.display(),
        rom.len() / ROM_BANK_SIZE
    );

    let mut stdout = std::io::stdout().lock();
    let mut total_mcycles: u64 = 0;

    while !gb.is_paused() {
        if config.debug {
            let regs = &gb.cpu.regs;
            log::trace!(
                "pc=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} sp=0x{:04X} ime={} halted={}",
                regs.pc,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                regs.sp,
                gb.cpu.ime,
                gb.cpu.halted,
            );
        }

        total_mcycles += u64::from(gb.step());

        // Surface everything the program pushed out of the serial port.
        let serial = gb.take_serial_output();
        if !serial.is_empty() {
            stdout.write_all(&serial)?;
            stdout.flush()?;
        }
    }

    if gb.cpu.is_locked() {
        bail!(
            "undefined opcode at 0x{:04X} after {total_mcycles} m-cycles",
            gb.cpu.regs.pc
        );
    }

    log::info!("paused after {total_mcycles} m-cycles");
    Ok(())
}
