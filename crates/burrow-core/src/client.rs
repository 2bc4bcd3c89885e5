/// Coarse client bucket guessed from a user-agent-like string.
///
/// This is a display heuristic. Nothing in the registry depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Mobile,
    Chrome,
    Firefox,
    Safari,
    Unknown,
}

impl ClientKind {
    /// Buckets a client signature by substring match.
    ///
    /// Order matters: mobile Chrome reports `Mobile`, and Chrome also
    /// advertises `Safari` in its user agent.
    pub fn classify(signature: &str) -> Self {
        if signature.contains("Mobile") {
            Self::Mobile
        } else if signature.contains("Chrome") {
            Self::Chrome
        } else if signature.contains("Firefox") {
            Self::Firefox
        } else if signature.contains("Safari") {
            Self::Safari
        } else {
            Self::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile Device",
            Self::Chrome => "Chrome Browser",
            Self::Firefox => "Firefox Browser",
            Self::Safari => "Safari Browser",
            Self::Unknown => "Unknown Location",
        }
    }
}
