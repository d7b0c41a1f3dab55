//! Version numbers of the form `major.minor[.micro][.qualifier]`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{KclError, Result};
use crate::text::functions::cleanup;
use crate::text::{StringFBuilder, StringLike};

/// A parsed version number.
///
/// Equality and hashing use the textual form. Ordering is numeric on
/// major, minor and micro (a version with a micro part sorts before one
/// without), then textual.
///
/// ```
/// use kcommon::Version;
///
/// let v: Version = "1.4.2_beta".parse()?;
/// assert_eq!(v.micro(), Some(2));
/// assert_eq!(v.qualifier(), Some("beta"));
/// assert_eq!(v.to_string(), "1.4.2.beta");
/// assert!(v < "1.10".parse::<Version>()?);
/// # Ok::<(), kcommon::KclError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    major: u32,
    minor: u32,
    micro: Option<u32>,
    qualifier: Option<String>,
    text: String,
}

impl Version {
    /// Creates a version from its parts.
    pub fn new(major: u32, minor: u32, micro: Option<u32>, qualifier: Option<String>) -> Self {
        let mut version = Self {
            major,
            minor,
            micro,
            qualifier,
            text: String::new(),
        };
        version.text = version.to_text('.');
        version
    }

    /// Parses a version, guessing which optional parts are present.
    ///
    /// A non-numeric third part is taken as the qualifier.
    pub fn parse(input: &str) -> Result<Self> {
        let mut rest = StringFBuilder::from(input);
        let major = number(input, next_part(&mut rest, &['.'])?, "major")?;
        let minor = number(input, next_part(&mut rest, &['.'])?, "minor")?;

        let part = next_part(&mut rest, &['.', '_'])?;
        let micro = part.as_deref().and_then(|p| p.parse::<u32>().ok());
        let qualifier = match micro {
            Some(_) => cleanup(Some(rest.as_str())),
            None => part,
        };
        Ok(Self::new(major, minor, micro, qualifier))
    }

    /// Parses a version whose layout is known up front.
    pub fn parse_strict(input: &str, has_micro: bool, has_qualifier: bool) -> Result<Self> {
        let mut rest = StringFBuilder::from(input);
        let major = number(input, next_part(&mut rest, &['.'])?, "major")?;
        let minor = number(input, next_part(&mut rest, &['.'])?, "minor")?;

        let micro = if has_micro {
            Some(number(input, next_part(&mut rest, &['.', '_'])?, "micro")?)
        } else {
            None
        };

        let qualifier = if has_qualifier {
            let qualifier = cleanup(Some(rest.as_str())).ok_or_else(|| KclError::InvalidVersion {
                input: input.to_owned(),
                reason: "missing qualifier".to_owned(),
            })?;
            Some(qualifier)
        } else {
            None
        };

        Ok(Self::new(major, minor, micro, qualifier))
    }

    /// Returns the major number.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor number.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the micro number, if any.
    pub fn micro(&self) -> Option<u32> {
        self.micro
    }

    /// Returns the qualifier, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Renders the version with `qualifier_delim` before the qualifier.
    pub fn to_text(&self, qualifier_delim: char) -> String {
        let mut sb = StringFBuilder::new();
        sb.append_display(self.major).append_char('.').append_display(self.minor);
        if let Some(micro) = self.micro {
            sb.append_char('.').append_display(micro);
        }
        if let Some(qualifier) = &self.qualifier {
            sb.append_char(qualifier_delim).append(qualifier);
        }
        sb.into_string()
    }
}

/// Cuts the text up to the first of `delims` off `rest` (the delimiter is
/// dropped as well) and returns it cleaned up.
fn next_part(rest: &mut StringFBuilder, delims: &[char]) -> Result<Option<String>> {
    let part = match rest.index_of_any_char(delims, 0) {
        None => {
            let all = rest.to_text();
            rest.clear();
            all
        }
        Some(0) => {
            rest.delete(0, 1)?;
            String::new()
        }
        Some(pos) => {
            let head = rest.substring_range(0, pos as isize)?;
            rest.delete(0, pos as isize + 1)?;
            head
        }
    };
    Ok(cleanup(Some(&part)))
}

fn number(input: &str, part: Option<String>, what: &str) -> Result<u32> {
    let part = part.ok_or_else(|| KclError::InvalidVersion {
        input: input.to_owned(),
        reason: format!("missing {what}"),
    })?;
    part.parse().map_err(|_| KclError::InvalidVersion {
        input: input.to_owned(),
        reason: format!("invalid {what} '{part}'"),
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Version {
    type Err = KclError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(match (self.micro, other.micro) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
