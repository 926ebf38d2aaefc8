//! Game Boy (DMG) emulation core.
//!
//! This crate contains the platform-agnostic pieces of the emulator: the
//! SM83 CPU interpreter, the memory bus with its boot-ROM overlay and MBC1
//! ROM banking, and the serial port model used by CPU test ROMs. The
//! driver binary lives in a separate crate and owns the CLI, file loading,
//! and the run loop.

pub mod cpu;
pub mod machine;

pub use cpu::{Cpu, Registers};
pub use machine::GameBoy;
