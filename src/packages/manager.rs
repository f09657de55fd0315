//! Supported package managers and their command lines.

use std::fmt;
use std::str::FromStr;

use crate::error::SprigError;

/// A Node package manager Sprig knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// All supported managers.
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    /// The executable name.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Arguments that add `packages` to the project.
    ///
    /// | manager | runtime        | dev                        |
    /// |---------|----------------|----------------------------|
    /// | npm     | `install <p>`  | `install --save-dev <p>`   |
    /// | pnpm    | `add <p>`      | `add -D <p>`               |
    /// | yarn    | `add <p>`      | `add --dev <p>`            |
    /// | bun     | `add <p>`      | `add -d <p>`               |
    pub fn install_args<S: AsRef<str>>(&self, dev: bool, packages: &[S]) -> Vec<String> {
        let (verb, dev_flag) = match self {
            Self::Npm => ("install", "--save-dev"),
            Self::Pnpm => ("add", "-D"),
            Self::Yarn => ("add", "--dev"),
            Self::Bun => ("add", "-d"),
        };

        let mut args = vec![verb.to_string()];
        if dev {
            args.push(dev_flag.to_string());
        }
        args.extend(packages.iter().map(|p| p.as_ref().to_string()));
        args
    }

    /// The full command line, for display.
    pub fn command_line<S: AsRef<str>>(&self, dev: bool, packages: &[S]) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.install_args(dev, packages));
        parts.join(" ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManager {
    type Err = SprigError;

    /// Parse a manager name. A version suffix (`pnpm@9.1.0`, as found in
    /// the `packageManager` field of `package.json`) is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let base = name.split('@').next().unwrap_or_default();
        match base.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            "bun" => Ok(Self::Bun),
            _ => Err(SprigError::UnknownPackageManager {
                name: name.to_string(),
            }),
        }
    }
}
