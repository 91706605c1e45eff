use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::version::error::MalformedVersionError;
use crate::version::record::VersionRecord;

const MAX_COMPONENTS: usize = 4;

/// A parsed `major[.minor[.build[.revision]]]` version.
///
/// Missing trailing components are zero, so "1.2" and "1.2.0.0" are equal.
/// Field order is significant: the derived `Ord` compares lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl ModVersion {
    pub fn parse(version: &str) -> Result<Self, MalformedVersionError> {
        if version.is_empty() {
            return Err(MalformedVersionError::Empty);
        }

        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() > MAX_COMPONENTS {
            return Err(MalformedVersionError::TooManyComponents {
                version: version.to_string(),
                count: parts.len(),
            });
        }

        let mut components = [0u32; MAX_COMPONENTS];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = parse_component(version, part)?;
        }

        let [major, minor, build, revision] = components;
        Ok(Self {
            major,
            minor,
            build,
            revision,
        })
    }
}

fn parse_component(version: &str, component: &str) -> Result<u32, MalformedVersionError> {
    // u32::from_str accepts a leading '+', so check the digits ourselves
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedVersionError::NonNumeric {
            version: version.to_string(),
            component: component.to_string(),
        });
    }

    component
        .parse()
        .map_err(|_| MalformedVersionError::OutOfRange {
            version: version.to_string(),
            component: component.to_string(),
        })
}

impl FromStr for ModVersion {
    type Err = MalformedVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Compare two version strings
pub fn compare(a: &str, b: &str) -> Result<Ordering, MalformedVersionError> {
    Ok(ModVersion::parse(a)?.cmp(&ModVersion::parse(b)?))
}

/// Whether `local` is at least as new as `remote`.
///
/// Returns `None` when either side is missing, undeclared or unparseable.
pub fn is_up_to_date(local: Option<&VersionRecord>, remote: Option<&VersionRecord>) -> Option<bool> {
    let local = local.filter(|r| r.is_declared())?;
    let remote = remote.filter(|r| r.is_declared())?;

    match compare(&local.version, &remote.version) {
        Ok(ordering) => Some(ordering != Ordering::Less),
        Err(e) => {
            warn!(
                "Cannot compare versions '{}' and '{}': {}",
                local.version, remote.version, e
            );
            None
        }
    }
}
