//! Typed parameter structs extracted from clap matches.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::ArgMatches;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("color").map(String::as_str) {
            Some("always") => ColorChoice::Always,
            Some("never") => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }

    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub struct CheckParams {
    pub grammar: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub verbose: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            grammar: matches.get_one::<PathBuf>("grammar").cloned().unwrap(),
            source_path: matches.get_one::<PathBuf>("source_path").cloned(),
            source_text: matches.get_one::<String>("source_text").cloned(),
            verbose: matches.get_flag("verbose"),
            color: ColorChoice::from_matches(matches),
        }
    }
}

pub struct TokenizeParams {
    pub grammar: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl TokenizeParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            grammar: matches.get_one::<PathBuf>("grammar").cloned().unwrap(),
            source_path: matches.get_one::<PathBuf>("source_path").cloned(),
            source_text: matches.get_one::<String>("source_text").cloned(),
            format: OutputFormat::from_matches(matches),
            color: ColorChoice::from_matches(matches),
        }
    }
}

pub struct TablesParams {
    pub grammar: PathBuf,
}

impl TablesParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            grammar: matches.get_one::<PathBuf>("grammar").cloned().unwrap(),
        }
    }
}

pub struct EvalParams {
    pub script_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub format: OutputFormat,
}

impl EvalParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            script_path: matches.get_one::<PathBuf>("script_path").cloned(),
            expr: matches.get_one::<String>("expr").cloned(),
            format: OutputFormat::from_matches(matches),
        }
    }
}
