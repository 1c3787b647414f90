//! The closed set of reactive-extension dialects and their source conventions.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// One reactive-extension ecosystem being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    RxJava,
    RxJs,
    RxKotlin,
    RxSwift,
    RxDart,
}

/// How operator invocations are written in a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// `receiver.operator(args)`.
    Direct,
    /// `source.pipe(operator(args), ...)`.
    Pipeline,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::RxJava,
        Dialect::RxJs,
        Dialect::RxKotlin,
        Dialect::RxSwift,
        Dialect::RxDart,
    ];

    /// Identifier used in file names, JSON keys and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::RxJava => "rxjava",
            Dialect::RxJs => "rxjs",
            Dialect::RxKotlin => "rxkotlin",
            Dialect::RxSwift => "rxswift",
            Dialect::RxDart => "rxdart",
        }
    }

    /// Returns all file extensions scanned for this dialect.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Dialect::RxJava => &["java"],
            Dialect::RxJs => &["cs", "ts", "js"],
            Dialect::RxKotlin => &["kt", "java"],
            Dialect::RxSwift => &["swift"],
            Dialect::RxDart => &["dart"],
        }
    }

    /// Whether `ext` (without the dot) is one of this dialect's extensions.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions().contains(&ext)
    }

    pub fn path_rule(&self) -> PathRule {
        match self {
            Dialect::RxJava => PathRule::SourceSubtree(&SRC_MAIN_JAVA),
            Dialect::RxKotlin => PathRule::SourceSubtree(&SRC_MAIN_KOTLIN),
            Dialect::RxJs | Dialect::RxSwift | Dialect::RxDart => PathRule::ExtensionOnly,
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        match self {
            Dialect::RxJs => MatchStrategy::Pipeline,
            _ => MatchStrategy::Direct,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownDialect {
                name: s.to_string(),
                source_name: "dialect name".to_string(),
            })
    }
}

/// Canonical source directories expressed as path segments, matched against
/// either separator so lists built on Windows and Unix classify identically.
static SRC_MAIN_JAVA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"src[/\\]main[/\\]java").unwrap());

static SRC_MAIN_KOTLIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"src[/\\]main[/\\]kotlin").unwrap());

/// Per-dialect path inclusion rule.
#[derive(Debug, Clone, Copy)]
pub enum PathRule {
    /// The file's containing directory must include the canonical source subtree.
    SourceSubtree(&'static LazyLock<Regex>),
    /// Any location is accepted; only the extension filter applies.
    ExtensionOnly,
}

impl PathRule {
    /// Whether a file at `path` satisfies the rule.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            PathRule::ExtensionOnly => true,
            PathRule::SourceSubtree(pattern) => {
                // Split on either separator by hand: `Path::parent` only knows
                // the host's, and file lists may come from another platform.
                let text = path.to_string_lossy();
                let dir = match text.rfind(|c| c == '/' || c == '\\') {
                    Some(idx) => &text[..idx],
                    None => return false,
                };
                pattern.is_match(dir)
            }
        }
    }
}
