// Command-line parsing. clap handles the token syntax; this module turns its
// matches into per-flag occurrence lists so the resolver can tell a bare
// `--key` from `--key <str>` and count repeated flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeMap;
use std::ffi::OsString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Flag {
    Key,
    Expand,
    Help,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::Key, Flag::Expand, Flag::Help];

    fn id(self) -> &'static str {
        match self {
            Flag::Key => "key",
            Flag::Expand => "expand",
            Flag::Help => "help",
        }
    }

    fn short(self) -> char {
        match self {
            Flag::Key => 'k',
            Flag::Expand => 'e',
            Flag::Help => 'h',
        }
    }

    fn takes_value(self) -> bool {
        matches!(self, Flag::Key)
    }
}

/// One appearance of a flag on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occurrence {
    /// Flag given without a value.
    Marker,
    Value(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub positionals: Vec<String>,
    flags: BTreeMap<Flag, Vec<Occurrence>>,
}

impl ParsedCommand {
    /// First positional, unless it is empty.
    pub fn url(&self) -> Option<&str> {
        self.positionals
            .first()
            .map(String::as_str)
            .filter(|u| !u.is_empty())
    }

    /// Occurrences of `flag` in command-line order; empty when absent.
    pub fn occurrences(&self, flag: Flag) -> &[Occurrence] {
        self.flags.get(&flag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, flag: Flag) -> bool {
        !self.occurrences(flag).is_empty()
    }
}

pub fn command() -> Command {
    let mut cmd = Command::new("url-shortener")
        .about("Shorten and expand URLs with the Google URL shortener API")
        .disable_help_flag(true)
        .arg(
            Arg::new("url")
                .value_name("URL")
                .num_args(1..)
                .action(ArgAction::Append),
        );
    for flag in Flag::ALL {
        let arg = Arg::new(flag.id()).long(flag.id()).short(flag.short());
        let arg = if flag.takes_value() {
            arg.value_name("KEY")
                .num_args(0..=1)
                .action(ArgAction::Append)
        } else {
            arg.action(ArgAction::Count)
        };
        cmd = cmd.arg(arg);
    }
    cmd
}

/// Parse a full argument vector, program name first.
pub fn parse_from<I, T>(args: I) -> Result<ParsedCommand, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    Ok(from_matches(&matches))
}

fn from_matches(matches: &ArgMatches) -> ParsedCommand {
    let positionals = matches
        .get_many::<String>("url")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let mut flags = BTreeMap::new();
    for flag in Flag::ALL {
        let occurrences: Vec<Occurrence> = if flag.takes_value() {
            matches
                .get_occurrences::<String>(flag.id())
                .map(|occs| {
                    occs.map(|mut vals| match vals.next() {
                        Some(v) => Occurrence::Value(v.clone()),
                        None => Occurrence::Marker,
                    })
                    .collect()
                })
                .unwrap_or_default()
        } else {
            vec![Occurrence::Marker; usize::from(matches.get_count(flag.id()))]
        };
        flags.insert(flag, occurrences);
    }

    ParsedCommand { positionals, flags }
}
