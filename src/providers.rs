//! Static classification of Odesli platform keys.

/// Human-readable name for a platform key. Keys we don't know have no
/// display name and are never rendered.
pub fn display_name(provider: &str) -> Option<&'static str> {
    Some(match provider {
        "spotify" => "Spotify",
        "itunes" => "iTunes",
        "appleMusic" => "Apple Music",
        "youtube" => "YouTube",
        "youtubeMusic" => "YouTube Music",
        "google" => "Google Play Music",
        "googleStore" => "Google Play Store",
        "pandora" => "Pandora",
        "deezer" => "Deezer",
        "tidal" => "Tidal",
        "amazonStore" => "Amazon",
        "amazonMusic" => "Amazon Music",
        "soundcloud" => "SoundCloud",
        "napster" => "Napster",
        "yandex" => "Yandex Music",
        "spinrilla" => "Spinrilla",
        _ => return None,
    })
}

/// Platforms rendered under the "where to listen" section.
const LISTEN_PROVIDERS: &[&str] = &[
    "spotify",
    "appleMusic",
    "youtube",
    "youtubeMusic",
    "google",
    "pandora",
    "deezer",
    "tidal",
    "amazonMusic",
    "soundcloud",
    "napster",
    "yandex",
    "spinrilla",
];

/// Platforms rendered under the "where to buy" section.
const BUY_PROVIDERS: &[&str] = &["itunes", "googleStore", "amazonStore"];

pub fn is_listen(provider: &str) -> bool {
    LISTEN_PROVIDERS.contains(&provider)
}

pub fn is_buy(provider: &str) -> bool {
    BUY_PROVIDERS.contains(&provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_provider_has_display_name() {
        assert_eq!(display_name("spotify"), Some("Spotify"));
        assert_eq!(display_name("yandex"), Some("Yandex Music"));
    }

    #[test]
    fn test_unknown_provider_has_no_display_name() {
        assert_eq!(display_name("audiomack"), None);
        assert_eq!(display_name(""), None);
    }

    #[test]
    fn test_listen_and_buy_membership() {
        assert!(is_listen("spotify"));
        assert!(!is_buy("spotify"));
        assert!(is_buy("itunes"));
        assert!(!is_listen("itunes"));
    }

    #[test]
    fn test_provider_outside_both_sets_is_in_neither() {
        assert!(!is_listen("audiomack"));
        assert!(!is_buy("audiomack"));
    }

    #[test]
    fn test_every_categorized_provider_has_a_display_name() {
        for provider in LISTEN_PROVIDERS.iter().chain(BUY_PROVIDERS) {
            assert!(
                display_name(provider).is_some(),
                "{provider} is categorized but has no display name"
            );
        }
    }
}
