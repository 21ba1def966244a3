//! Text assembled from chat messages: body, links, names and file names.
//!
//! Every string that a detection layer will look at goes through the
//! deployment [`TextNormalizer`] so that later stages see one form.

use crate::entity::extract_entity_text;
use crate::normalize::{NormalizationConfig, TextNormalizer};
use watchline_core::{EntityKind, ForwardOrigin, Message, MessageEntity, User};

/// Full text of a message: body (text or caption), every entity URL and
/// every inline button text and URL, one per line, normalized with `cfg`.
pub fn message_text(
    message: &Message,
    normalizer: &TextNormalizer,
    cfg: NormalizationConfig,
) -> String {
    let mut lines: Vec<&str> = Vec::new();

    if let Some(body) = message.text_or_caption() {
        lines.push(body);
        lines.extend(
            message
                .active_entities()
                .iter()
                .filter_map(|e| e.url.as_deref()),
        );
    }

    for button in message.reply_markup.iter().flatten() {
        lines.extend(button.text.as_deref().filter(|t| !t.is_empty()));
        lines.extend(button.url.as_deref().filter(|u| !u.is_empty()));
    }

    let text = lines.join("\n");
    if text.is_empty() {
        return text;
    }
    normalizer.normalize(&text, cfg)
}

/// Links carried by a message, stripped of scheme and trailing slash.
///
/// URL entities contribute the text they cover; text links contribute their
/// target. Inline button URLs follow.
pub fn message_links(message: &Message) -> Vec<String> {
    let entity_links = message
        .active_entities()
        .iter()
        .filter_map(|entity| match (&entity.kind, &entity.url) {
            (EntityKind::Url, _) => Some(message_entity_text(message, entity)),
            (_, Some(url)) => Some(url.clone()),
            _ => None,
        });

    let button_links = message
        .reply_markup
        .iter()
        .flatten()
        .filter_map(|button| button.url.clone());

    entity_links
        .chain(button_links)
        .map(|link| stripped_link(&link))
        .filter(|link| !link.is_empty())
        .collect()
}

/// Text an entity covers in the message body.
pub fn message_entity_text(message: &Message, entity: &MessageEntity) -> String {
    message
        .text_or_caption()
        .map(|body| extract_entity_text(body, entity.offset, entity.length))
        .unwrap_or_default()
}

/// Trim a link, drop `http://` and `https://`, and one trailing `/`.
pub fn stripped_link(link: &str) -> String {
    let link = link.trim().replace("http://", "").replace("https://", "");
    match link.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => link,
    }
}

/// First and last name; `""` for deleted accounts.
pub fn full_name(user: &User, normalizer: &TextNormalizer, cfg: NormalizationConfig) -> String {
    if user.is_deleted {
        return String::new();
    }
    let name = match user.last_name.as_deref().filter(|l| !l.is_empty()) {
        Some(last) => format!("{} {}", user.first_name, last),
        None => user.first_name.clone(),
    };
    normalizer.normalize(&name, cfg)
}

/// Display name of a forwarded message's origin; `""` when not forwarded.
pub fn forward_name(
    message: &Message,
    normalizer: &TextNormalizer,
    cfg: NormalizationConfig,
) -> String {
    match &message.forward_origin {
        Some(ForwardOrigin::User(user)) => full_name(user, normalizer, cfg),
        Some(ForwardOrigin::HiddenUser(name)) => normalizer.normalize(name, cfg),
        Some(ForwardOrigin::Chat(chat)) => chat
            .title
            .as_deref()
            .map(|title| normalizer.normalize(title, cfg))
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// File name of an attached document, else of an attached audio.
pub fn file_name(message: &Message, normalizer: &TextNormalizer, cfg: NormalizationConfig) -> String {
    [&message.document, &message.audio]
        .into_iter()
        .flatten()
        .find_map(|file| file.file_name.as_deref().filter(|n| !n.is_empty()))
        .map(|name| normalizer.normalize(name, cfg))
        .unwrap_or_default()
}
