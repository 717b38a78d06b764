//! This crate implements the command line option iterator used to bootstrap
//! the mender agent.  It's deliberately small, dependency free and is built so
//! the caller drives the parsing.
//!
//! Unlike a full blown argument parser it does not know anything about help
//! pages, subcommands or typed values.  It only knows which option spellings
//! exist and whether they take a value.
//!
//! # Example
//!
//! Parsing happens via the [`CmdlineOptionsIterator`] type:
//!
//! ```
//! use mender_cmdline::{CmdlineOptionsIterator, Error, OptionSpec};
//!
//! fn main() -> Result<(), Error> {
//!     let spec = OptionSpec::new()
//!         .with_value("--config")
//!         .with_value("-c")
//!         .flag("--version");
//!     let mut iter = CmdlineOptionsIterator::new(["-c", "/etc/mender/mender.conf"], spec);
//!
//!     for opt_val in &mut iter {
//!         let opt_val = opt_val?;
//!         if opt_val.option == "-c" || opt_val.option == "--config" {
//!             println!("Got config {}", opt_val.value);
//!         } else if opt_val.is_positional() {
//!             println!("Got arg {}", opt_val.value);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Here is what's happening:
//!
//! * [`OptionSpec`] declares the recognized option spellings together with
//!   their [`Arity`].
//! * [`CmdlineOptionsIterator::new`] takes the arguments (without the program
//!   name) and the spec.
//! * Iterating yields one [`OptionValue`] per option, positional argument or
//!   `--` marker.  An invalid command line yields an [`Error`].
//! * Alternatively [`CmdlineOptionsIterator::next_option`] can be called in a
//!   loop.  It returns the end marker (see [`OptionValue::is_end`]) once the
//!   arguments are used up, and keeps returning it on every further call.
//!
//! # Behavior
//!
//! * Any argument starting with `-` is an option.  There is no short option
//!   chaining, `-abc` is the option `-abc`.
//! * Options requiring a value take it either attached with `=`
//!   (`--config=/tmp/mender.conf`) or from the next argument.  A next
//!   argument starting with `-` is never taken as a value, it's reported as
//!   a missing value instead.  Values starting with `-` need the `=` form.
//! * Options without a value reject the `=` form.
//! * Arguments not starting with `-` are positional arguments and come back
//!   with an empty option name.
//! * The first `--` is reported once as its own [`OptionValue`] and disables
//!   option parsing.  Everything after it is passed through as positional
//!   arguments, including further `--` arguments.
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FusedIterator;

/// The marker that ends option parsing.
pub const DOUBLE_DASH: &str = "--";

/// Represents a parsing error.
///
/// The error always carries the name of the offending option.
pub struct Error {
    kind: ErrorKind,
    option: String,
}

impl Error {
    fn new(kind: ErrorKind, option: &str) -> Error {
        Error {
            kind,
            option: option.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The option as it was written on the command line (without `=value`).
    pub fn option(&self) -> &str {
        &self.option
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}: ", ErrorKind::CATEGORY)?;
        }
        match self.kind {
            ErrorKind::MissingValue => write!(f, "Option {} missing value", self.option),
            ErrorKind::UnrecognizedOption => write!(f, "Unrecognized option '{}'", self.option),
            ErrorKind::UnexpectedValue => {
                write!(f, "Option {} doesn't expect a value", self.option)
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("option", &self.option)
            .finish()
    }
}

impl std::error::Error for Error {}

/// The kind of an invalid command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An option requiring a value was the last argument, or was followed
    /// by something that looks like an option.
    MissingValue,
    /// The option is not part of the [`OptionSpec`].
    UnrecognizedOption,
    /// An option without a value was given one with `--option=value`.
    UnexpectedValue,
}

impl ErrorKind {
    const CATEGORY: &'static str = "Invalid options given";
}

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// The option is a plain flag.
    None,
    /// The option must be followed by a value.
    RequiresValue,
}

/// The set of recognized options.
#[derive(Debug, Clone, Default)]
pub struct OptionSpec {
    options: BTreeMap<String, Arity>,
}

impl OptionSpec {
    /// Creates a spec that doesn't recognize any option.
    pub fn new() -> OptionSpec {
        OptionSpec::default()
    }

    /// Creates a spec from a set of options requiring a value and a set
    /// of flags.
    ///
    /// The two sets are expected to be disjoint.  If a name is in both,
    /// the option requires a value.
    pub fn from_sets<V, N, S1, S2>(value_bearing: V, value_less: N) -> OptionSpec
    where
        V: IntoIterator<Item = S1>,
        N: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        let mut spec = OptionSpec::new();
        for name in value_less {
            spec.insert(name, Arity::None);
        }
        for name in value_bearing {
            spec.insert(name, Arity::RequiresValue);
        }
        spec
    }

    /// Registers an option that requires a value.
    pub fn with_value<S: Into<String>>(mut self, name: S) -> OptionSpec {
        self.insert(name, Arity::RequiresValue);
        self
    }

    /// Registers an option that does not take a value.
    pub fn flag<S: Into<String>>(mut self, name: S) -> OptionSpec {
        self.insert(name, Arity::None);
        self
    }

    /// Registers an option with the given arity, replacing an earlier one.
    pub fn insert<S: Into<String>>(&mut self, name: S, arity: Arity) {
        self.options.insert(name.into(), arity);
    }

    /// Looks up an option.  `None` means the option is not recognized.
    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.options.get(name).copied()
    }
}

/// A single parsed item of the command line.
///
/// The combination of empty and non-empty fields tells what it is:
///
/// | `option` | `value`   | meaning                                 |
/// |----------|-----------|-----------------------------------------|
/// | `""`     | `""`      | end of the arguments                    |
/// | `""`     | non-empty | positional argument                     |
/// | `"--"`   | `""`      | the end of options marker               |
/// | name     | any       | a recognized option and its value       |
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionValue {
    pub option: String,
    pub value: String,
}

impl OptionValue {
    /// Creates the end of arguments marker.
    pub fn end() -> OptionValue {
        OptionValue::default()
    }

    fn positional(value: &str) -> OptionValue {
        OptionValue {
            option: String::new(),
            value: value.to_string(),
        }
    }

    /// Is this the end of the arguments?
    pub fn is_end(&self) -> bool {
        self.option.is_empty() && self.value.is_empty()
    }

    /// Is this a positional argument?
    pub fn is_positional(&self) -> bool {
        self.option.is_empty() && !self.value.is_empty()
    }

    /// Is this the `--` marker?
    pub fn is_terminator(&self) -> bool {
        self.option == DOUBLE_DASH
    }
}

/// An internal state indicator for the iterator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Options,
    PastDoubleDash,
}

/// Steps through a list of command line arguments one option at a time.
///
/// The arguments and the [`OptionSpec`] are fixed when the iterator is
/// created.  For basic instructions consult the crate documentation.
pub struct CmdlineOptionsIterator {
    args: Vec<String>,
    spec: OptionSpec,
    pos: usize,
    state: State,
}

impl fmt::Debug for CmdlineOptionsIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdlineOptionsIterator")
            .field("pos", &self.pos)
            .field("past_double_dash", &self.past_double_dash())
            .field("finished", &self.finished())
            .finish()
    }
}

impl CmdlineOptionsIterator {
    /// Creates an iterator over the arguments of the current process.
    ///
    /// The program name is skipped.  Arguments that are not valid unicode
    /// are converted lossily.
    pub fn from_env(spec: OptionSpec) -> CmdlineOptionsIterator {
        CmdlineOptionsIterator::new(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
            spec,
        )
    }

    /// Creates an iterator from just the arguments (no program name).
    pub fn new<I, S>(args: I, spec: OptionSpec) -> CmdlineOptionsIterator
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CmdlineOptionsIterator {
            args: args.into_iter().map(Into::into).collect(),
            spec,
            pos: 0,
            state: State::Options,
        }
    }

    /// Parses the next option.
    ///
    /// Once all arguments are consumed this returns [`OptionValue::end`],
    /// and it keeps doing so on every further call without failing.
    ///
    /// Note that an empty argument is a positional argument with an empty
    /// value and thus looks just like the end marker.  If that matters,
    /// check [`finished`](Self::finished) or use the [`Iterator`]
    /// implementation which signals the end with `None`.
    pub fn next_option(&mut self) -> Result<OptionValue, Error> {
        let arg = match self.args.get(self.pos) {
            Some(arg) => arg.as_str(),
            None => return Ok(OptionValue::end()),
        };
        self.pos += 1;

        if self.state == State::PastDoubleDash {
            return Ok(OptionValue::positional(arg));
        }

        if arg == DOUBLE_DASH {
            self.state = State::PastDoubleDash;
            return Ok(OptionValue {
                option: DOUBLE_DASH.to_string(),
                value: String::new(),
            });
        }

        if !arg.starts_with('-') {
            return Ok(OptionValue::positional(arg));
        }

        let (option, value) = match arg.split_once('=') {
            Some((option, value)) => (option, value),
            None => (arg, ""),
        };

        match self.spec.arity(option) {
            Some(Arity::RequiresValue) if value.is_empty() => {
                // only take the next argument if it doesn't look like an option
                match self.args.get(self.pos) {
                    Some(next) if !next.starts_with('-') => {
                        let value = next.clone();
                        self.pos += 1;
                        Ok(OptionValue {
                            option: option.to_string(),
                            value,
                        })
                    }
                    _ => Err(Error::new(ErrorKind::MissingValue, option)),
                }
            }
            Some(Arity::RequiresValue) => Ok(OptionValue {
                option: option.to_string(),
                value: value.to_string(),
            }),
            Some(Arity::None) if !value.is_empty() => {
                Err(Error::new(ErrorKind::UnexpectedValue, option))
            }
            Some(Arity::None) => Ok(OptionValue {
                option: option.to_string(),
                value: String::new(),
            }),
            None => Err(Error::new(ErrorKind::UnrecognizedOption, option)),
        }
    }

    /// Returns `true` if all arguments were consumed.
    ///
    /// At that point [`next_option`](Self::next_option) will always return
    /// the end marker.
    #[inline]
    pub fn finished(&self) -> bool {
        self.pos >= self.args.len()
    }

    /// Returns `true` once `--` was seen.
    #[inline]
    pub fn past_double_dash(&self) -> bool {
        self.state == State::PastDoubleDash
    }

    /// The index of the next argument to be looked at.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The recognized options.
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }
}

impl Iterator for CmdlineOptionsIterator {
    type Item = Result<OptionValue, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished() {
            None
        } else {
            Some(self.next_option())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.args.len() - self.pos.min(self.args.len());
        ((remaining + 1) / 2, Some(remaining))
    }
}

impl FusedIterator for CmdlineOptionsIterator {}
