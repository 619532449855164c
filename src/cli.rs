use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Plot hash table benchmark results (CSV files with `Size` and `Time`
/// columns) into plot.png.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Benchmark CSV files, one scatter series each, in the order given.
    #[arg(allow_hyphen_values = true)]
    pub files: Vec<PathBuf>,
}

impl Args {
    pub fn parse_from_env() -> Self {
        Args::parse()
    }
}

/// The line printed when no files are given.
pub fn usage(program: &str) -> String {
    format!("usage:  {program}  [ DATA_CSV,... ]")
}

/// Name the program was invoked as, for the usage line.
pub fn program_name(args: impl IntoIterator<Item = OsString>) -> String {
    args.into_iter()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_files_is_not_a_parse_error() {
        let args = Args::try_parse_from(["bench-plot"]).unwrap();
        assert!(args.files.is_empty());
    }

    #[test]
    fn files_keep_their_order() {
        let args = Args::try_parse_from(["bench-plot", "b.csv", "sub/a.csv"]).unwrap();
        assert_eq!(args.files, [PathBuf::from("b.csv"), PathBuf::from("sub/a.csv")]);
    }

    #[test]
    fn leading_dash_is_a_file_name() {
        let args = Args::try_parse_from(["bench-plot", "-results.csv"]).unwrap();
        assert_eq!(args.files, [PathBuf::from("-results.csv")]);

        let args = Args::try_parse_from(["bench-plot", "a.csv", "-weird.csv"]).unwrap();
        assert_eq!(args.files, [PathBuf::from("a.csv"), PathBuf::from("-weird.csv")]);
    }

    #[test]
    fn usage_names_the_program() {
        assert_eq!(usage("./bench-plot"), "usage:  ./bench-plot  [ DATA_CSV,... ]");
    }

    #[test]
    fn program_name_falls_back_to_package() {
        assert_eq!(program_name(Vec::<OsString>::new()), "bench-plot");
        assert_eq!(program_name([OsString::from("/usr/bin/bp")]), "/usr/bin/bp");
    }
}
