use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::TapeConfig;
use crate::tape::pulse::{NTSC_CPU_FREQ, PAL_CPU_FREQ};

#[derive(Parser, Debug)]
#[command(name = "wav2tap", about = "Convert a C64 cassette recording into a .tap file")]
pub struct Cli {
    /// Input audio file (WAV, FLAC)
    pub input: PathBuf,

    /// Output TAP file (default: input path with .wav replaced by .tap)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CPU frequency in Hz used to quantize pulse lengths
    #[arg(long)]
    pub cpu_freq: Option<f64>,

    /// Machine clock preset, used when --cpu-freq is not given
    #[arg(short, long, value_enum)]
    pub machine: Option<Machine>,

    /// Config file (default: ./wav2tap.toml or ~/.config/wav2tap/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read the written file back and check its header
    #[arg(long)]
    pub verify: bool,
}

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Machine {
    Pal,
    Ntsc,
}

impl Machine {
    pub fn cpu_freq(self) -> f64 {
        match self {
            Machine::Pal => PAL_CPU_FREQ,
            Machine::Ntsc => NTSC_CPU_FREQ,
        }
    }
}

impl Cli {
    /// CLI beats config; an explicit frequency beats a machine preset.
    pub fn resolve_cpu_freq(&self, tape: &TapeConfig) -> f64 {
        self.cpu_freq
            .or_else(|| self.machine.map(Machine::cpu_freq))
            .or(tape.cpu_freq)
            .or_else(|| tape.machine.map(Machine::cpu_freq))
            .unwrap_or(PAL_CPU_FREQ)
    }
}
