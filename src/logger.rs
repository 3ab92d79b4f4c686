use chrono::{DateTime, Local};
use eyre::Result;
use std::{path::Path, thread, time::Duration};

use crate::{
    configure::Config,
    metrics::{
        pressure::{Pressure, PRESSURE_ROOT},
        Collect,
    },
};

pub struct Logger {
    config: Config,
    pressure_root: String,
}

impl Logger {
    pub fn new(config: Config) -> Self {
        Self::with_pressure_root(config, PRESSURE_ROOT)
    }

    pub fn with_pressure_root(config: Config, pressure_root: impl Into<String>) -> Self {
        Self {
            config,
            pressure_root: pressure_root.into(),
        }
    }

    pub fn run(self) -> Result<()> {
        let started: DateTime<Local> = Local::now();
        let log_path = Path::new(&self.config.output_directory).join(log_file_name(&started));
        let mut pressure = Pressure::with_pressure_root(&log_path, &self.pressure_root)?;
        println!(
            "Logging pressure to {} every {}s for {}s",
            log_path.display(),
            self.config.interval,
            self.config.duration
        );

        let interval = Duration::from_secs(self.config.interval);
        for _ in 0..self.config.iterations() {
            pressure.sample()?;
            pressure.store()?;
            // The last sample is followed by one final sleep, so a run always
            // spans iterations * interval of wall-clock time.
            thread::sleep(interval);
        }

        Ok(())
    }
}

fn log_file_name(started: &DateTime<Local>) -> String {
    format!("psi_log_{}.csv", started.format("%Y%m%d_%H%M%S"))
}
