use clap::ArgMatches;
use eyre::eyre;

pub struct Config {
    pub interval: u64,
    pub duration: u64,
    pub output_directory: String,
}

impl Config {
    /// Whole number of samples a run performs: duration / interval, floored.
    pub fn iterations(&self) -> u64 {
        self.duration / self.interval
    }
}

impl TryFrom<ArgMatches> for Config {
    type Error = Box<dyn std::error::Error>;
    fn try_from(mut matches: ArgMatches) -> Result<Self, Self::Error> {
        let interval: u64 = matches
            .remove_one("interval")
            .expect("Missing interval");
        if interval == 0 {
            return Err(eyre!("--interval must be at least one second").into());
        }

        let duration: u64 = matches
            .remove_one("duration")
            .expect("Missing duration");

        let output_directory = matches
            .remove_one::<String>("output-directory")
            .expect("Required field");

        Ok(Self {
            interval,
            duration,
            output_directory,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::cmdline;

    use super::Config;

    fn config_from(args: &[&str]) -> Result<Config, Box<dyn std::error::Error>> {
        let matches = cmdline::register_args().get_matches_from(args);
        Config::try_from(matches)
    }

    #[test]
    fn defaults_match_reference_constants() {
        let config = config_from(&["psi-collector"]).unwrap();
        assert_eq!(config.interval, 10);
        assert_eq!(config.duration, 600);
        assert_eq!(config.output_directory, ".");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = config_from(&["psi-collector", "--interval", "0"]);
        assert!(config.is_err());
    }

    #[test]
    fn iterations_floor_the_division() {
        let config = config_from(&["psi-collector", "--interval", "10", "--duration", "30"]).unwrap();
        assert_eq!(config.iterations(), 3);

        let config = config_from(&["psi-collector", "--interval", "10", "--duration", "605"]).unwrap();
        assert_eq!(config.iterations(), 60);

        let config = config_from(&["psi-collector", "--duration", "0"]).unwrap();
        assert_eq!(config.iterations(), 0);
    }
}
