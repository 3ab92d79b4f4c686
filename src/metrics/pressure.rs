use chrono::{DateTime, Local};
use eyre::Result;
use std::{
    error::Error,
    fmt::{self, Display},
    fs::{self, File},
    io::prelude::*,
    path::Path,
};

use super::{Collect, MissingSample, ToCsv};

pub(crate) const PRESSURE_ROOT: &str = "/proc/pressure";

const CSV_HEADERS: &str = "Timestamp,CPU_Some,CPU_Full,Memory_Some,Memory_Full,IO_Some,IO_Full\n";

#[derive(Debug)]
struct MalformedContent;

impl Display for MalformedContent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Content does not match the some/full pressure line format")
    }
}

impl Error for MalformedContent {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureSource {
    Cpu,
    Memory,
    Io,
}

impl PressureSource {
    fn file_name(&self) -> &'static str {
        match self {
            PressureSource::Cpu => "cpu",
            PressureSource::Memory => "memory",
            PressureSource::Io => "io",
        }
    }
}

impl Display for PressureSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Stall ratios of one pressure source. An absent side is written to the log
/// as an empty field; memory omits the full line on some kernels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StallRatios {
    pub some: Option<f64>,
    pub full: Option<f64>,
}

#[derive(Debug)]
pub struct PressureSample {
    pub timestamp: DateTime<Local>,
    pub cpu: StallRatios,
    pub memory: StallRatios,
    pub io: StallRatios,
}

impl ToCsv for PressureSample {
    fn csv_headers(&self) -> &'static str {
        CSV_HEADERS
    }

    fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            ratio_field(self.cpu.some),
            ratio_field(self.cpu.full),
            ratio_field(self.memory.some),
            ratio_field(self.memory.full),
            ratio_field(self.io.some),
            ratio_field(self.io.full),
        )
    }
}

fn ratio_field(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{:.2}", ratio),
        None => String::new(),
    }
}

/// Extract the avg10 ratio of every some/full line, in file order. The first
/// occurrence of a label wins; unrelated lines are skipped. A labeled line
/// without a parseable non-negative avg10 field fails the whole source.
fn parse_stall_ratios(content: &str) -> Result<StallRatios> {
    let mut ratios = StallRatios::default();
    for line in content.lines() {
        let mut tokens = line.split_whitespace();
        let slot = match tokens.next() {
            Some("some") => &mut ratios.some,
            Some("full") => &mut ratios.full,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }

        let ratio: f64 = tokens
            .find_map(|token| token.strip_prefix("avg10="))
            .ok_or(MalformedContent)?
            .parse()
            .map_err(|_| MalformedContent)?;
        if ratio < 0.0 {
            return Err(MalformedContent.into());
        }
        *slot = Some(ratio);
    }

    if let (None, None) = (ratios.some, ratios.full) {
        return Err(MalformedContent.into());
    }
    Ok(ratios)
}

pub struct Pressure {
    pressure_root: String,
    data_file: File,
    sample: Option<PressureSample>,
}

impl Pressure {
    /// Create the pressure log at `log_path`, truncating any prior file
    /// there, and write the header row.
    pub fn create(log_path: &Path) -> Result<Self> {
        Self::with_pressure_root(log_path, PRESSURE_ROOT)
    }

    pub fn with_pressure_root(log_path: &Path, pressure_root: &str) -> Result<Self> {
        let mut data_file = File::create(log_path)?;
        data_file.write_all(CSV_HEADERS.as_bytes())?;
        Ok(Self {
            pressure_root: pressure_root.into(),
            data_file,
            sample: None,
        })
    }

    fn read_source(&self, source: PressureSource) -> StallRatios {
        match self.try_read_source(source) {
            Ok(ratios) => ratios,
            Err(e) => {
                eprintln!("Failed to read {} pressure: {}", source, e);
                StallRatios::default()
            }
        }
    }

    fn try_read_source(&self, source: PressureSource) -> Result<StallRatios> {
        let contents = fs::read_to_string(format!("{}/{}", self.pressure_root, source.file_name()))?;
        parse_stall_ratios(&contents)
    }
}

impl Collect for Pressure {
    fn sample(&mut self) -> Result<()> {
        // Timestamp is taken at read time, not at loop-schedule time.
        self.sample = Some(PressureSample {
            timestamp: Local::now(),
            cpu: self.read_source(PressureSource::Cpu),
            memory: self.read_source(PressureSource::Memory),
            io: self.read_source(PressureSource::Io),
        });
        Ok(())
    }

    fn store(&mut self) -> Result<()> {
        if let None = self.sample {
            return Err(MissingSample.into());
        }

        let sample = self.sample.take().unwrap();
        // One complete row per write call, so a crash cannot tear prior rows.
        self.data_file.write_all(sample.to_csv_row().as_bytes())?;
        Ok(())
    }
}
