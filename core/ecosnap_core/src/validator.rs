//! File acceptance checks run before a picked or dropped file is taken.
//!
//! Only the declared size and MIME type are inspected.  There is no
//! content sniffing: a `.exe` renamed and declared as `image/png` passes.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{MediaKind, UploadCandidate};

const BYTES_PER_MB: u64 = 1024 * 1024;

static IMAGE_ACCEPT: LazyLock<AcceptPattern> =
    LazyLock::new(|| AcceptPattern::compile("image/*").expect("static accept pattern"));
static VIDEO_ACCEPT: LazyLock<AcceptPattern> =
    LazyLock::new(|| AcceptPattern::compile("video/*").expect("static accept pattern"));

/// Why a file was turned away.  `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("File size must be less than {max_mb}MB")]
    TooLarge { max_mb: u64 },

    #[error("Invalid file type")]
    WrongType,
}

/// A wildcard MIME pattern such as `image/*`.
///
/// `*` matches any run of characters; everything else is literal.  Several
/// patterns may be joined with commas (`image/*,video/mp4`), in which case a
/// type matching any of them is accepted.  An empty pattern accepts every
/// type.  Matching is case-insensitive and covers the whole type string.
#[derive(Clone)]
pub struct AcceptPattern {
    raw: String,
    regex: Option<Regex>,
}

impl AcceptPattern {
    fn compile(raw: &str) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| regex::escape(p).replace(r"\*", ".*"))
            .collect();

        let regex = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)^(?:{})$", alternatives.join("|")))?)
        };

        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    pub fn images() -> Self {
        IMAGE_ACCEPT.clone()
    }

    pub fn videos() -> Self {
        VIDEO_ACCEPT.clone()
    }

    pub fn matches(&self, mime_type: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(mime_type),
            None => true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for AcceptPattern {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Debug for AcceptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AcceptPattern").field(&self.raw).finish()
    }
}

impl PartialEq for AcceptPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

/// Size ceiling and accepted types for one upload surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLimits {
    pub max_size_mb: u64,
    pub accept: AcceptPattern,
}

impl MediaLimits {
    /// 10 MB, `image/*`.
    pub fn photos() -> Self {
        Self {
            max_size_mb: 10,
            accept: AcceptPattern::images(),
        }
    }

    /// 100 MB, `video/*`.
    pub fn videos() -> Self {
        Self {
            max_size_mb: 100,
            accept: AcceptPattern::videos(),
        }
    }

    pub fn for_kind(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Photo => Self::photos(),
            MediaKind::Video => Self::videos(),
        }
    }

    pub fn validate(&self, candidate: &UploadCandidate) -> Result<(), FileRejection> {
        validate_file(candidate, self.max_size_mb, &self.accept)
    }
}

/// Accept or reject `candidate`.  Size is checked first, so an oversized
/// file of the wrong type reports the size problem.
pub fn validate_file(
    candidate: &UploadCandidate,
    max_size_mb: u64,
    accept: &AcceptPattern,
) -> Result<(), FileRejection> {
    if candidate.size_bytes > max_size_mb.saturating_mul(BYTES_PER_MB) {
        return Err(FileRejection::TooLarge {
            max_mb: max_size_mb,
        });
    }
    if !accept.matches(&candidate.mime_type) {
        return Err(FileRejection::WrongType);
    }
    Ok(())
}

/// Human-readable size: `0 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    // Drop trailing zeros the way "1.50" -> "1.5" reads in the UI.
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", UNITS[unit])
}
