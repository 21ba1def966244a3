//! Report records: `label + colon + value` lines, their parser and the HTML
//! helpers used to render them.

use serde::Serialize;
use std::collections::BTreeMap;
use watchline_core::constants::{CHANNEL_ID_PREFIX_LEN, TELEGRAM_LINK_BASE};
use watchline_core::{Chat, LocaleBundle, Message};

/// Locale key of the label/value separator.
pub const COLON_KEY: &str = "colon";

/// A field of a report record.
///
/// Declaration order is the order labels are tried in when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    /// Reporting project.
    Project,
    /// Project the report originated from.
    Origin,
    /// Action status.
    Status,
    /// Reported user id.
    #[serde(rename = "uid")]
    UserId,
    /// Action level.
    Level,
    /// Rule that matched.
    Rule,
    /// Message type.
    Type,
    /// Game short name.
    Game,
    /// Detected message language.
    Lang,
    /// Message length.
    Length,
    /// Message frequency.
    Freq,
    /// User score.
    Score,
    /// User bio.
    Bio,
    /// User name.
    Name,
    /// Forward origin name.
    From,
    /// Contact found in the message.
    Contact,
    /// Free-form details.
    More,
    /// Any line no label matched.
    Unknown,
}

impl ReportField {
    /// Every field, in match order.
    pub const ALL: [ReportField; 18] = [
        Self::Project,
        Self::Origin,
        Self::Status,
        Self::UserId,
        Self::Level,
        Self::Rule,
        Self::Type,
        Self::Game,
        Self::Lang,
        Self::Length,
        Self::Freq,
        Self::Score,
        Self::Bio,
        Self::Name,
        Self::From,
        Self::Contact,
        Self::More,
        Self::Unknown,
    ];

    /// Locale bundle key of the field's label. `Unknown` has no label.
    pub fn locale_key(self) -> Option<&'static str> {
        let key = match self {
            Self::Project => "project",
            Self::Origin => "project_origin",
            Self::Status => "status",
            Self::UserId => "user_id",
            Self::Level => "level",
            Self::Rule => "rule",
            Self::Type => "message_type",
            Self::Game => "message_game",
            Self::Lang => "message_lang",
            Self::Length => "message_len",
            Self::Freq => "message_freq",
            Self::Score => "user_score",
            Self::Bio => "user_bio",
            Self::Name => "user_name",
            Self::From => "from_name",
            Self::Contact => "contact",
            Self::More => "more",
            Self::Unknown => return None,
        };
        Some(key)
    }

    /// Record key, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Origin => "origin",
            Self::Status => "status",
            Self::UserId => "uid",
            Self::Level => "level",
            Self::Rule => "rule",
            Self::Type => "type",
            Self::Game => "game",
            Self::Lang => "lang",
            Self::Length => "length",
            Self::Freq => "freq",
            Self::Score => "score",
            Self::Bio => "bio",
            Self::Name => "name",
            Self::From => "from",
            Self::Contact => "contact",
            Self::More => "more",
            Self::Unknown => "unknown",
        }
    }
}

/// Localized field labels and the shared separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<(ReportField, String)>,
    colon: String,
}

impl LabelTable {
    /// Build a table from explicit labels. Fields without a label are never
    /// matched.
    pub fn new<I, S>(labels: I, colon: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (ReportField, S)>,
        S: Into<String>,
    {
        let given: BTreeMap<ReportField, String> = labels
            .into_iter()
            .filter(|(field, _)| *field != ReportField::Unknown)
            .map(|(field, label)| (field, label.into()))
            .collect();
        Self {
            labels: given.into_iter().collect(),
            colon: colon.into(),
        }
    }

    /// Labels from a locale bundle; missing keys resolve to the key itself.
    pub fn from_locale(bundle: &LocaleBundle) -> Self {
        let labels = ReportField::ALL
            .iter()
            .filter_map(|&field| field.locale_key().map(|key| (field, bundle.get(key))));
        Self::new(labels, bundle.get(COLON_KEY))
    }

    /// Label of `field`.
    pub fn label(&self, field: ReportField) -> Option<&str> {
        self.labels
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, label)| label.as_str())
    }

    /// Separator between label and value.
    pub fn colon(&self) -> &str {
        &self.colon
    }

    fn classify(&self, line: &str) -> ReportField {
        self.labels
            .iter()
            .find(|(_, label)| {
                line.strip_prefix(label.as_str())
                    .is_some_and(|rest| rest.starts_with(self.colon.as_str()))
            })
            .map(|(field, _)| *field)
            .unwrap_or(ReportField::Unknown)
    }

    fn value<'a>(&self, line: &'a str) -> &'a str {
        if self.colon.is_empty() {
            return line;
        }
        line.rsplit(self.colon.as_str()).next().unwrap_or(line)
    }
}

/// Parsed report, one value per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportRecord {
    fields: BTreeMap<ReportField, String>,
}

impl Default for ReportRecord {
    fn default() -> Self {
        Self {
            fields: ReportField::ALL
                .iter()
                .map(|&field| (field, String::new()))
                .collect(),
        }
    }
}

impl ReportRecord {
    /// Value of `field`, `""` when the report did not carry it.
    pub fn get(&self, field: ReportField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Fields and values in field order.
    pub fn iter(&self) -> impl Iterator<Item = (ReportField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    fn set(&mut self, field: ReportField, value: &str) {
        self.fields.insert(field, value.to_string());
    }
}

/// Parse a report message into a record.
///
/// Each line is classified by the first label (in field order) that
/// prefixes it together with the separator; other lines count as
/// [`ReportField::Unknown`]. The value is whatever follows the last
/// separator on the line, so values that contain the separator are cut.
/// A later line overwrites an earlier one of the same field.
pub fn parse_record(report_text: &str, labels: &LabelTable) -> ReportRecord {
    let mut record = ReportRecord::default();
    if report_text.is_empty() {
        return record;
    }

    for line in report_text.split('\n') {
        let field = labels.classify(line);
        record.set(field, labels.value(line));
    }

    record
}

/// Builds report text from field values, the inverse of [`parse_record`].
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    labels: &'a LabelTable,
    lines: Vec<(ReportField, String)>,
}

impl<'a> ReportBuilder<'a> {
    /// Start an empty report.
    pub fn new(labels: &'a LabelTable) -> Self {
        Self {
            labels,
            lines: Vec::new(),
        }
    }

    /// Append a field line. Fields without a label and blank values are
    /// skipped.
    pub fn field(mut self, field: ReportField, value: impl Into<String>) -> Self {
        let value = value.into();
        if self.labels.label(field).is_some() && !value.trim().is_empty() {
            self.lines.push((field, value));
        }
        self
    }

    /// Plain-text rendering.
    pub fn render_plain(&self) -> String {
        self.render(|label, colon, value| format!("{}{}{}", label, colon, value))
    }

    /// HTML rendering with escaped labels and `<code>` values.
    pub fn render_html(&self) -> String {
        self.render(|label, colon, value| {
            format!("{}{}{}", html_escape(label), html_escape(colon), code(value))
        })
    }

    fn render(&self, line: impl Fn(&str, &str, &str) -> String) -> String {
        self.lines
            .iter()
            .filter_map(|(field, value)| {
                self.labels
                    .label(*field)
                    .map(|label| line(label, self.labels.colon(), value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Escape text for Telegram HTML.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// `<b>text</b>`, or `""` for blank text.
pub fn bold(text: impl ToString) -> String {
    wrap("b", text.to_string().trim())
}

/// `<code>text</code>`, or `""` for blank text.
pub fn code(text: impl ToString) -> String {
    wrap("code", text.to_string().trim())
}

/// `<pre>text</pre>` keeping leading indentation, or `""` for blank text.
pub fn code_block(text: impl ToString) -> String {
    wrap("pre", text.to_string().trim_end())
}

fn wrap(tag: &str, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("<{tag}>{}</{tag}>", html_escape(text))
}

/// Anchor with escaped text; `""` when either part is blank.
pub fn general_link(text: impl ToString, link: &str) -> String {
    let text = text.to_string();
    let (text, link) = (text.trim(), link.trim());
    if text.is_empty() || link.is_empty() {
        return String::new();
    }
    format!("<a href=\"{}\">{}</a>", html_escape(link), html_escape(text))
}

/// Link that mentions a user by id.
pub fn mention_id(uid: i64) -> String {
    general_link(uid, &format!("tg://user?id={}", uid))
}

/// Public link of a chat: its username when set, otherwise the private
/// `c/` form of its id.
pub fn channel_link(chat: &Chat) -> String {
    match chat.username.as_deref().filter(|u| !u.is_empty()) {
        Some(username) => format!("{}{}", TELEGRAM_LINK_BASE, username),
        None => channel_link_from_id(chat.id),
    }
}

/// Private `c/` link of a channel id such as `-1001234567890`.
pub fn channel_link_from_id(chat_id: i64) -> String {
    let id = chat_id.to_string();
    let short = id.get(CHANNEL_ID_PREFIX_LEN..).unwrap_or_default();
    format!("{}c/{}", TELEGRAM_LINK_BASE, short)
}

/// Link to a message inside its chat.
pub fn message_link(message: &Message) -> String {
    let chat_link = match &message.chat {
        Some(chat) => channel_link(chat),
        None => TELEGRAM_LINK_BASE.to_string(),
    };
    format!("{}/{}", chat_link.trim_end_matches('/'), message.message_id)
}
