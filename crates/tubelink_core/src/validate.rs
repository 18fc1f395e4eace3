use std::sync::OnceLock;

use regex::Regex;

// Anchored at the start only: anything after the 11-character id is accepted.
const YOUTUBE_PATTERN: &str =
    r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/(watch\?v=)?[A-Za-z0-9_-]{11}";

fn youtube_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(YOUTUBE_PATTERN).expect("youtube pattern compiles"))
}

/// Returns true when `candidate` starts with a recognizable YouTube video link.
pub fn is_valid_youtube_url(candidate: &str) -> bool {
    youtube_regex().is_match(candidate)
}
