//! Values from parsed command-line flags.
//!
//! A flag only counts as present when the invoker typed it. Clap records where
//! each value came from, so a flag still sitting at its default (or filled from
//! clap's own `env` fallback) is reported as not found, even if that default
//! is non-zero.

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::error::Error;
use crate::source::{Source, split_list};

/// Reads values from the `ArgMatches` of the active command invocation.
///
/// Keys are clap argument ids. Built without matches, every lookup fails with
/// [`Error::NoExecutionContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagSource<'a> {
    matches: Option<&'a ArgMatches>,
}

impl<'a> FlagSource<'a> {
    pub fn new(matches: &'a ArgMatches) -> Self {
        Self {
            matches: Some(matches),
        }
    }

    /// A flag source with no parsed arguments behind it.
    pub fn detached() -> Self {
        Self { matches: None }
    }

    pub fn from_option(matches: Option<&'a ArgMatches>) -> Self {
        Self { matches }
    }

    /// Raw values of `key`, only if the flag was explicitly supplied.
    fn explicit_values(&self, key: &str) -> Result<Vec<String>, Error> {
        let matches = self.matches.ok_or(Error::NoExecutionContext)?;

        // Unknown ids are an error from try_get_raw; check them before
        // asking for the value source.
        let raw = match matches.try_get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) | Err(_) => return Err(self.not_found(key)),
        };

        if matches.value_source(key) != Some(ValueSource::CommandLine) {
            return Err(self.not_found(key));
        }

        raw.map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .ok_or_else(|| Error::parse(key, &value.to_string_lossy(), "a UTF-8 string"))
        })
        .collect()
    }

    fn not_found(&self, key: &str) -> Error {
        Error::NotFound {
            origin: self.name(),
            key: key.to_string(),
        }
    }
}

impl Source for FlagSource<'_> {
    fn name(&self) -> &'static str {
        "flag"
    }

    /// The last occurrence wins for flags given more than once.
    fn get_string(&self, key: &str) -> Result<String, Error> {
        self.explicit_values(key)?
            .pop()
            .ok_or_else(|| self.not_found(key))
    }

    /// Every occurrence, each split on commas.
    fn get_string_list(&self, key: &str) -> Result<Vec<String>, Error> {
        let values = self.explicit_values(key)?;
        if values.is_empty() {
            return Err(self.not_found(key));
        }
        Ok(values.iter().flat_map(|v| split_list(v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use clap::{Arg, ArgAction, Command, value_parser};

    fn command() -> Command {
        Command::new("test")
            .arg(Arg::new("name").long("name"))
            .arg(
                Arg::new("count")
                    .long("count")
                    .value_parser(value_parser!(i64))
                    .default_value("5"),
            )
            .arg(Arg::new("rate").long("rate").value_parser(value_parser!(f64)))
            .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue))
            .arg(Arg::new("host").long("host").action(ArgAction::Append))
    }

    fn parse(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn without_matches_is_no_execution_context() {
        let f = FlagSource::detached();
        assert_eq!(
            f.get_string("name").unwrap_err().kind(),
            ErrorKind::NoExecutionContext
        );
    }

    #[test]
    fn undeclared_flag_is_not_found() {
        let m = parse(&[]);
        let f = FlagSource::new(&m);
        assert!(f.get_string("undeclared").unwrap_err().is_not_found());
    }

    #[test]
    fn declared_but_unset_is_not_found() {
        let m = parse(&[]);
        let f = FlagSource::new(&m);
        assert!(f.get_string("name").unwrap_err().is_not_found());
    }

    #[test]
    fn default_value_is_not_found() {
        let m = parse(&[]);
        let f = FlagSource::new(&m);
        assert!(f.get_int("count").unwrap_err().is_not_found());
    }

    #[test]
    fn explicit_string() {
        let m = parse(&["--name", "test"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_string("name").unwrap(), "test");
    }

    #[test]
    fn explicit_empty_string_is_found() {
        let m = parse(&["--name", ""]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_string("name").unwrap(), "");
    }

    #[test]
    fn explicit_int_matching_default_is_found() {
        let m = parse(&["--count", "5"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_int("count").unwrap(), 5);
    }

    #[test]
    fn negative_int() {
        let m = parse(&["--count=-1"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_int("count").unwrap(), -1);
    }

    #[test]
    fn float_value() {
        let m = parse(&["--rate", "100.10"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_float("rate").unwrap(), 100.10);
    }

    #[test]
    fn set_true_flag() {
        let m = parse(&["--verbose"]);
        let f = FlagSource::new(&m);
        assert!(f.get_bool("verbose").unwrap());
    }

    #[test]
    fn set_true_flag_absent_is_not_found() {
        let m = parse(&[]);
        let f = FlagSource::new(&m);
        assert!(f.get_bool("verbose").unwrap_err().is_not_found());
    }

    #[test]
    fn malformed_bool_is_parse_error() {
        let m = parse(&["--name", "maybe"]);
        let f = FlagSource::new(&m);
        assert_eq!(
            f.get_bool("name").unwrap_err().kind(),
            ErrorKind::ParseError
        );
    }

    #[test]
    fn repeated_flag_last_wins_for_string() {
        let m = parse(&["--host", "a", "--host", "b"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_string("host").unwrap(), "b");
    }

    #[test]
    fn string_list_collects_occurrences_and_commas() {
        let m = parse(&["--host", "a,b", "--host", "c"]);
        let f = FlagSource::new(&m);
        assert_eq!(f.get_string_list("host").unwrap(), vec!["a", "b", "c"]);
    }
}
