use anyhow::Result;
use clap::Parser;

use pocketboy::RunConfig;

/// Game Boy (DMG) emulator with the serial port wired to stdout.
#[derive(Parser)]
struct Args {
    /// Path to the cartridge ROM file
    rom: std::path::PathBuf,

    /// Start from the post-boot register state even when a boot ROM is given
    #[arg(long)]
    skip_boot: bool,

    /// Path to a 256-byte DMG boot ROM
    #[arg(long)]
    boot_rom: Option<std::path::PathBuf>,

    /// Enable per-instruction trace output
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG still wins when set; --debug only raises the default.
    let default_filter = if args.debug { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = RunConfig::builder()
        .rom_path(args.rom)
        .boot_rom_path(args.boot_rom)
        .skip_boot(args.skip_boot)
        .debug(args.debug)
        .build();

    pocketboy::run(config)
}
