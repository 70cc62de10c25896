// Command resolution: decides from the parsed flags and the key store which
// key to use, whether to persist or print it, and which API call to make.
// Each invocation is a single pass; nothing here keeps state between runs.

use crate::api::UrlShortener;
use crate::args::{Flag, Occurrence, ParsedCommand};
use crate::error::{user_message, ShortenerError};
use crate::key_store::KeyStore;
use log::debug;
use std::io::{self, Write};

pub const HELP_TEXT: &str = "\
- Shorten URL: url-shortener [--key=<str>] <url>
If key is not set, the last used key is used.
- View last used key: url-shortener --key.
- Just set the key: url-shortener --key=<str>
- Expand an URL: url-shortener --expand <url>
Note: Aliases: -k for --key and -e for --expand.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Shorten(String),
    Expand(String),
}

/// What an invocation has asked for, before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Help,
    Run {
        /// Key to persist and use instead of the stored one.
        new_key: Option<String>,
        print_key: bool,
        request: Option<Request>,
    },
}

impl Plan {
    pub fn from_command(cmd: &ParsedCommand) -> Self {
        let url = cmd.url();
        if cmd.has(Flag::Help) || (url.is_none() && !cmd.has(Flag::Key)) {
            return Plan::Help;
        }

        let keys = cmd.occurrences(Flag::Key);
        let new_key = keys.iter().find_map(|occ| match occ {
            Occurrence::Value(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
            _ => None,
        });
        let print_key = keys.contains(&Occurrence::Marker);
        let request = url.map(|u| {
            if cmd.has(Flag::Expand) {
                Request::Expand(u.to_string())
            } else {
                Request::Shorten(u.to_string())
            }
        });

        Plan::Run {
            new_key,
            print_key,
            request,
        }
    }
}

pub struct Resolver<'a, S> {
    store: &'a KeyStore,
    api: &'a S,
}

impl<'a, S: UrlShortener> Resolver<'a, S> {
    pub fn new(store: &'a KeyStore, api: &'a S) -> Self {
        Resolver { store, api }
    }

    /// Run one invocation, writing results to `out` and failure lines to
    /// `err`. Returns whether the invocation succeeded; only a broken output
    /// stream is an `Err`.
    pub fn run<O: Write, E: Write>(
        &self,
        cmd: &ParsedCommand,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<bool> {
        let plan = Plan::from_command(cmd);
        debug!("plan: {:?}", plan);

        let (new_key, print_key, request) = match plan {
            Plan::Help => {
                writeln!(out, "{}", HELP_TEXT)?;
                return Ok(true);
            }
            Plan::Run {
                new_key,
                print_key,
                request,
            } => (new_key, print_key, request),
        };

        let key = match new_key {
            Some(key) => match self.store.save(&key) {
                Ok(()) => {
                    writeln!(out, "Key set.")?;
                    key
                }
                Err(e) => return report(err, &e),
            },
            None => match self.store.load() {
                Ok(key) => key,
                Err(e) => return report(err, &e),
            },
        };

        if print_key {
            writeln!(out, "{}", key)?;
        }

        let Some(request) = request else {
            return Ok(true);
        };

        let result = match &request {
            Request::Shorten(url) => self.api.shorten(url, &key).map(|r| r.id),
            Request::Expand(url) => self.api.expand(url, &key).map(|r| r.long_url),
        };
        match result {
            Ok(value) => {
                writeln!(out, "{}", value)?;
                Ok(true)
            }
            Err(e) => report(err, &e),
        }
    }
}

fn report<E: Write>(err: &mut E, e: &ShortenerError) -> io::Result<bool> {
    debug!("operation failed: {:?}", e);
    writeln!(err, "{}", user_message(e))?;
    Ok(false)
}
