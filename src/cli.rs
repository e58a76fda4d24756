use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0,
        value_parser = parse_rate
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0,
        value_parser = parse_rate
    )]
    pub frame_rate: f64,

    #[arg(short, long, value_name = "DIR", help = "Directory that backdrop image paths are resolved against")]
    pub assets_dir: Option<PathBuf>,

    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Load one page, print it and exit")]
    pub print: Option<Format>,
}

/// Rates become `1 / rate` second intervals, so they must be finite and positive.
fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if rate > 0.0 && rate.is_finite() {
        Ok(rate)
    } else {
        Err(format!("`{raw}` must be a positive, finite number"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Html,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["snowfall"]).unwrap();
        assert_eq!(cli.tick_rate, 4.0);
        assert_eq!(cli.frame_rate, 30.0);
        assert_eq!(cli.assets_dir, None);
        assert_eq!(cli.print, None);
    }

    #[test]
    fn test_print_and_assets() {
        let cli = Cli::try_parse_from(["snowfall", "--print", "html", "-a", "public"]).unwrap();
        assert_eq!(cli.print, Some(Format::Html));
        assert_eq!(cli.assets_dir, Some(PathBuf::from("public")));

        assert!(Cli::try_parse_from(["snowfall", "--print", "xml"]).is_err());
    }

    #[test]
    fn test_rates_must_be_positive_and_finite() {
        assert!(Cli::try_parse_from(["snowfall", "--tick-rate", "0"]).is_err());
        assert!(Cli::try_parse_from(["snowfall", "--frame-rate", "-5"]).is_err());
        assert!(Cli::try_parse_from(["snowfall", "--tick-rate", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["snowfall", "--frame-rate", "inf"]).is_err());
        assert!(Cli::try_parse_from(["snowfall", "--tick-rate", "fast"]).is_err());

        let cli = Cli::try_parse_from(["snowfall", "-t", "0.5", "-f", "60"]).unwrap();
        assert_eq!(cli.tick_rate, 0.5);
        assert_eq!(cli.frame_rate, 60.0);
    }
}
