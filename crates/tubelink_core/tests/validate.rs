use tubelink_core::is_valid_youtube_url;

#[test]
fn accepts_watch_and_short_links() {
    assert!(is_valid_youtube_url(
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    ));
    assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
    assert!(is_valid_youtube_url("http://youtube.com/watch?v=dQw4w9WgXcQ"));
}

#[test]
fn scheme_and_www_are_optional() {
    assert!(is_valid_youtube_url("youtube.com/watch?v=dQw4w9WgXcQ"));
    assert!(is_valid_youtube_url("www.youtube.com/watch?v=dQw4w9WgXcQ"));
    assert!(is_valid_youtube_url("youtu.be/dQw4w9WgXcQ"));
}

#[test]
fn rejects_other_hosts_and_empty_input() {
    assert!(!is_valid_youtube_url("https://vimeo.com/12345"));
    assert!(!is_valid_youtube_url(""));
    assert!(!is_valid_youtube_url("https://example.com/watch?v=dQw4w9WgXcQ"));
    assert!(!is_valid_youtube_url("ftp://youtube.com/watch?v=dQw4w9WgXcQ"));
}

#[test]
fn rejects_short_ids() {
    assert!(!is_valid_youtube_url("https://youtu.be/abc"));
    assert!(!is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXc"));
}

#[test]
fn must_start_at_the_beginning() {
    assert!(!is_valid_youtube_url(" https://youtu.be/dQw4w9WgXcQ"));
    assert!(!is_valid_youtube_url("see https://youtu.be/dQw4w9WgXcQ"));
}

#[test]
fn trailing_content_after_id_is_accepted() {
    assert!(is_valid_youtube_url(
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"
    ));
    assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ<garbage>"));
    // Longer ids still contain an 11-character prefix.
    assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQXYZ"));
}

#[test]
fn non_watch_paths_with_long_segments_are_accepted() {
    // The path segment is optional, so any 11 word characters after the host match.
    assert!(is_valid_youtube_url("https://youtube.com/shorts_abcde"));
    assert!(!is_valid_youtube_url("https://youtube.com/shorts/abc"));
}
