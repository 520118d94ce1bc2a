//! Static localization catalog. Templates are opaque Markdown strings keyed
//! by message name and the sender's Telegram language code.

/// Keys for every user-facing template the bot sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    StartCommandReply,
    ServicesCommandReply,
    Listen,
    Buy,
    NoDataByLink,
    NoMusicLinksInMessage,
}

/// Resolve a template for the given language code.
/// Unknown or missing locales fall back to English.
pub fn t(locale: Option<&str>, key: MessageKey) -> &'static str {
    match locale {
        Some(code) if code.starts_with("ru") => ru(key),
        _ => en(key),
    }
}

fn en(key: MessageKey) -> &'static str {
    match key {
        MessageKey::StartCommandReply => {
            "Hi! Send me a link to a song on any streaming service and I'll \
             reply with links to the same song everywhere else it's available.\n\n\
             Shazam share links work too.\n\n\
             /services — list of supported services"
        }
        MessageKey::ServicesCommandReply => {
            "*Supported services:*\n\
             Spotify, Apple Music, iTunes, YouTube, YouTube Music, \
             Google Play Music, Google Play Store, Pandora, Deezer, Tidal, \
             Amazon Music, Amazon, SoundCloud, Napster, Yandex Music, Spinrilla\n\n\
             Shazam share links are resolved automatically."
        }
        MessageKey::Listen => "🎧 *Where to listen:*\n",
        MessageKey::Buy => "💰 *Where to buy:*\n",
        MessageKey::NoDataByLink => "Nothing found for this link 😔",
        MessageKey::NoMusicLinksInMessage => "I can't find any music links in this message.",
    }
}

fn ru(key: MessageKey) -> &'static str {
    match key {
        MessageKey::StartCommandReply => {
            "Привет! Отправь мне ссылку на трек в любом стриминговом сервисе, \
             и я пришлю ссылки на него во всех остальных.\n\n\
             Ссылки из Shazam тоже работают.\n\n\
             /services — список поддерживаемых сервисов"
        }
        MessageKey::ServicesCommandReply => {
            "*Поддерживаемые сервисы:*\n\
             Spotify, Apple Music, iTunes, YouTube, YouTube Music, \
             Google Play Music, Google Play Store, Pandora, Deezer, Tidal, \
             Amazon Music, Amazon, SoundCloud, Napster, Yandex Music, Spinrilla\n\n\
             Ссылки из Shazam распознаются автоматически."
        }
        MessageKey::Listen => "🎧 *Где послушать:*\n",
        MessageKey::Buy => "💰 *Где купить:*\n",
        MessageKey::NoDataByLink => "По этой ссылке ничего не нашлось 😔",
        MessageKey::NoMusicLinksInMessage => "В сообщении нет ссылок на музыку.",
    }
}
