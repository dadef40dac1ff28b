//! Discord-markdown renderings of tracks and tags.

use crate::types::{Tags, TopTags, Track};

const TAG_SEPARATOR: &str = " - ";

fn album_suffix(track: &Track) -> Option<&str> {
    track
        .album
        .as_deref()
        .filter(|album| !album.trim().is_empty())
}

/// The track name linked to its Last.fm page, then the artist and album.
///
/// Discord cannot render links whose URL contains parentheses, so such
/// tracks fall back to [`track_to_string`].
///
/// ```rust
/// use fmbot_lastfm::{format::track_to_linked_string, Track};
///
/// let track = Track {
///     name: "Song".to_string(),
///     artist: "Artist".to_string(),
///     album: Some("Album".to_string()),
///     url: "http://www.last.fm/music/Artist/_/Song".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(
///     track_to_linked_string(&track),
///     "[Song](http://www.last.fm/music/Artist/_/Song)\nBy **Artist** | *Album*\n"
/// );
/// ```
pub fn track_to_linked_string(track: &Track) -> String {
    if track.url.contains(['(', ')']) {
        return track_to_string(track);
    }

    let mut out = format!("[{}]({})\nBy **{}**", track.name, track.url, track.artist);
    push_album_line(&mut out, track);
    out
}

/// The track name, then the artist and album, without links.
pub fn track_to_string(track: &Track) -> String {
    let mut out = format!("{}\nBy **{}**", track.name, track.artist);
    push_album_line(&mut out, track);
    out
}

fn push_album_line(out: &mut String, track: &Track) {
    match album_suffix(track) {
        Some(album) => {
            out.push_str(" | *");
            out.push_str(album);
            out.push_str("*\n");
        }
        None => out.push('\n'),
    }
}

/// Name, artist and album on a single line, without a trailing newline.
pub fn track_to_one_lined_string(track: &Track) -> String {
    match album_suffix(track) {
        Some(album) => format!("{} By **{}** | *{}*", track.name, track.artist, album),
        None => format!("{} By **{}**", track.name, track.artist),
    }
}

/// Every tag linked to its Last.fm page, separated by ` - `.
pub fn tags_to_linked_string(tags: &Tags) -> String {
    tags.tag
        .iter()
        .map(|tag| format!("[{}]({})", tag.name, tag.url))
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}

/// Every tag name, separated by ` - `.
pub fn top_tags_to_string(tags: &TopTags) -> String {
    tags.tag
        .iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}
