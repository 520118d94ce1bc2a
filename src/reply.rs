//! Reply composition: the song-info card and the categorized link list.
//! Pure functions over a resolution payload; sending is the caller's job.

use crate::config::LinksConfig;
use crate::odesli::ResolvedSong;
use crate::providers;

/// Song-info reply: artwork with a linked caption when the entity has a
/// thumbnail, plain bold text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongCard {
    Photo { thumbnail_url: String, caption: String },
    Text { text: String },
}

/// `"<artist> – <title>"` for the payload's entity.
pub fn song_title(song: &ResolvedSong) -> Option<String> {
    song.entity()
        .map(|entity| format!("{} – {}", entity.artist_name, entity.title))
}

/// Build the song-info reply for a resolved URL. The caption links back to
/// the companion web page for the original URL.
pub fn song_card(song: &ResolvedSong, original_url: &str, links: &LinksConfig) -> Option<SongCard> {
    let entity = song.entity()?;
    let title = format!("{} – {}", entity.artist_name, entity.title);

    Some(match &entity.thumbnail_url {
        Some(thumbnail_url) => {
            let page_url = format!("{}{}", links.web_base_url, urlencoding::encode(original_url));
            SongCard::Photo {
                thumbnail_url: thumbnail_url.clone(),
                caption: format!("[{}]({})", title, page_url),
            }
        }
        None => SongCard::Text {
            text: format!("*{}*", title),
        },
    })
}

/// Render the categorized link list: listen section, a fixed VK search
/// entry, a blank line, then the buy section. Links are alphabetized by
/// display name; platforms without one are dropped.
pub fn link_list(
    song: &ResolvedSong,
    listen_header: &str,
    buy_header: &str,
    links: &LinksConfig,
) -> Option<String> {
    let title = song_title(song)?;

    let mut named: Vec<(&str, &'static str, &str)> = song
        .links_by_platform
        .iter()
        .filter_map(|(key, link)| {
            providers::display_name(key).map(|name| (key.as_str(), name, link.url.as_str()))
        })
        .collect();
    named.sort_by(|a, b| a.1.cmp(b.1));

    let mut message = String::from(listen_header);
    for (key, name, url) in &named {
        if providers::is_listen(key) {
            message.push_str(&format!("[{}]({})\n", name, url));
        }
    }

    let vk_url = format!("{}{}", links.vk_search_base_url, urlencoding::encode(&title));
    message.push_str(&format!("[VK]({})\n", vk_url));

    message.push('\n');
    message.push_str(buy_header);
    for (key, name, url) in &named {
        if providers::is_buy(key) {
            message.push_str(&format!("[{}]({})\n", name, url));
        }
    }

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odesli::{PlatformLink, SongEntity};
    use std::collections::HashMap;

    fn resolved(thumbnail: Option<&str>, platforms: &[(&str, &str)]) -> ResolvedSong {
        let id = "E::1".to_string();
        ResolvedSong {
            entity_unique_id: id.clone(),
            entities_by_unique_id: HashMap::from([(
                id,
                SongEntity {
                    artist_name: "A".to_string(),
                    title: "B".to_string(),
                    thumbnail_url: thumbnail.map(str::to_string),
                },
            )]),
            links_by_platform: platforms
                .iter()
                .map(|(key, url)| (key.to_string(), PlatformLink { url: url.to_string() }))
                .collect(),
        }
    }

    fn links() -> LinksConfig {
        LinksConfig::default()
    }

    #[test]
    fn test_card_without_thumbnail_is_bold_text() {
        let card = song_card(&resolved(None, &[]), "https://x.example/a", &links()).unwrap();
        assert_eq!(
            card,
            SongCard::Text {
                text: "*A – B*".to_string()
            }
        );
    }

    #[test]
    fn test_card_with_thumbnail_links_companion_page() {
        let card = song_card(
            &resolved(Some("https://img.example/c.jpg"), &[]),
            "https://open.spotify.com/track/abc",
            &links(),
        )
        .unwrap();
        match card {
            SongCard::Photo {
                thumbnail_url,
                caption,
            } => {
                assert_eq!(thumbnail_url, "https://img.example/c.jpg");
                assert_eq!(
                    caption,
                    "[A – B](https://streaming-hell.com/?url=https%3A%2F%2Fopen.spotify.com%2Ftrack%2Fabc)"
                );
            }
            other => panic!("expected photo card, got {:?}", other),
        }
    }

    #[test]
    fn test_card_for_payload_without_entity_is_none() {
        let mut song = resolved(None, &[]);
        song.entities_by_unique_id.clear();
        assert!(song_card(&song, "https://x.example", &links()).is_none());
    }

    #[test]
    fn test_link_list_is_sorted_by_display_name() {
        // Insertion order deliberately differs from display-name order.
        let song = resolved(
            None,
            &[
                ("yandex", "https://y.example"),
                ("deezer", "https://d.example"),
                ("tidal", "https://t.example"),
            ],
        );
        let list = link_list(&song, "LISTEN\n", "BUY\n", &links()).unwrap();

        let deezer = list.find("[Deezer]").unwrap();
        let tidal = list.find("[Tidal]").unwrap();
        let yandex = list.find("[Yandex Music]").unwrap();
        assert!(deezer < tidal && tidal < yandex);
    }

    #[test]
    fn test_unknown_provider_is_not_rendered() {
        let song = resolved(
            None,
            &[
                ("spotify", "https://s.example"),
                ("audiomack", "https://a.example"),
            ],
        );
        let list = link_list(&song, "LISTEN\n", "BUY\n", &links()).unwrap();
        assert!(!list.contains("audiomack"));
        assert!(!list.contains("https://a.example"));
    }

    #[test]
    fn test_sections_and_vk_entry() {
        let song = resolved(
            None,
            &[
                ("spotify", "https://open.spotify.com/track/abc"),
                ("itunes", "https://itunes.example/abc"),
            ],
        );
        let list = link_list(&song, "🎧 *Where to listen:*\n", "💰 *Where to buy:*\n", &links())
            .unwrap();

        assert_eq!(
            list,
            "🎧 *Where to listen:*\n\
             [Spotify](https://open.spotify.com/track/abc)\n\
             [VK](https://vk.com/audio?q=A%20%E2%80%93%20B)\n\
             \n\
             💰 *Where to buy:*\n\
             [iTunes](https://itunes.example/abc)\n"
        );
    }

    #[test]
    fn test_list_for_payload_without_entity_is_none() {
        let mut song = resolved(None, &[("spotify", "https://s.example")]);
        song.entity_unique_id = "E::other".to_string();
        assert!(link_list(&song, "L\n", "B\n", &links()).is_none());
    }
}
