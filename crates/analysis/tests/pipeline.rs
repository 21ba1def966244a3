use std::collections::HashSet;
use watchline_analysis::lang::prepare_sample;
use watchline_analysis::message::{message_links, message_text};
use watchline_analysis::{
    detect_language, extract_entity_text, parse_record, AnalysisResult, LabelTable, LanguageDetector,
    LanguageEngine, LanguageSets, NormalizationConfig, ReportBuilder, ReportField, TextNormalizer,
};
use watchline_core::{Message, MessageEntity, WatchlineConfig};

const CONFIG: &str = r#"
[normalization]
enabled = true
locale = "zh-Hans"

[languages]
protect = ["zh"]
text = ["en", "ja"]

[locale.labels]
colon = "："
project = "项目编号"
level = "操作等级"
rule = "规则"
message_lang = "消息语言"
"#;

/// Detector that answers from a fixed table of substrings.
struct Lookup(&'static [(&'static str, &'static str)]);

impl LanguageDetector for Lookup {
    fn name(&self) -> &str {
        "lookup"
    }

    fn detect(&self, text: &str) -> AnalysisResult<Option<String>> {
        Ok(self
            .0
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, code)| code.to_string()))
    }
}

fn config() -> WatchlineConfig {
    WatchlineConfig::from_toml_str(CONFIG).expect("test config should parse")
}

#[test]
fn normalized_message_feeds_the_language_engine() {
    let config = config();
    let normalizer = TextNormalizer::new(&config.normalization);
    let sets = LanguageSets::from_config(&config);

    let mut message = Message::with_text("這是 ｐｒｏｍｏ 廣告");
    message.entities = vec![MessageEntity::text_link(0, 2, "https://t.me/promo")];

    let text = message_text(&message, &normalizer, NormalizationConfig::normal());
    assert_eq!(text, "这是 promo 广告\nhttps://t.me/promo");

    let engine = LanguageEngine::new(
        Box::new(Lookup(&[("这是", "zh")])),
        Box::new(Lookup(&[("这是", "zh")])),
        Box::new(Lookup(&[("promo", "ms")])),
    );
    // zh is protected, so the cascade falls through to the guesser
    assert_eq!(engine.detect_with(&text, &sets), "ms");

    assert_eq!(message_links(&message), vec!["t.me/promo".to_string()]);
}

#[test]
fn cross_check_outside_defaults_is_trusted() {
    let sets = LanguageSets::from_config(&config());
    let engine = LanguageEngine::new(
        Box::new(Lookup(&[("salam", "en")])),
        Box::new(Lookup(&[("salam", "fa")])),
        Box::new(Lookup(&[])),
    );
    assert_eq!(engine.detect_with("salam dost", &sets), "fa");

    let engine = LanguageEngine::new(
        Box::new(Lookup(&[("hello", "en")])),
        Box::new(Lookup(&[("hello", "ja")])),
        Box::new(Lookup(&[])),
    );
    assert_eq!(engine.detect_with("hello there", &sets), "");
}

#[test]
fn short_samples_are_tiled_before_detection() {
    let sample = prepare_sample("ok!");
    assert_eq!(sample, "ok".repeat(10));
    assert!(prepare_sample(&"long enough sample ".repeat(2)).contains(' '));
}

#[test]
fn report_written_with_locale_labels_parses_back() {
    let bundle = config().locale_bundle().expect("bundle should resolve");
    let labels = LabelTable::from_locale(&bundle);

    let report = ReportBuilder::new(&labels)
        .field(ReportField::Project, "WATCH")
        .field(ReportField::Level, "全局封禁")
        .field(ReportField::Lang, "fa")
        .render_plain();
    let report = format!("{}\n附加说明", report);

    let record = parse_record(&report, &labels);
    assert_eq!(record.get(ReportField::Project), "WATCH");
    assert_eq!(record.get(ReportField::Level), "全局封禁");
    assert_eq!(record.get(ReportField::Lang), "fa");
    assert_eq!(record.get(ReportField::Unknown), "附加说明");
    assert_eq!(record.get(ReportField::Rule), "");
}

#[test]
fn entity_offsets_survive_astral_characters() {
    let text = "🔥🔥 加入 t.me/deals";
    let start = "🔥🔥 加入 ".encode_utf16().count() as u32;
    assert_eq!(extract_entity_text(text, start, 12), "t.me/deals");
    assert_eq!(extract_entity_text(text, 1, 2), "");
}

const ENGLISH: &str = "This is a perfectly ordinary English sentence about the weather today.";
const RUSSIAN: &str = "Это обычное предложение на русском языке о погоде сегодня и завтра.";

fn codes(list: &[&str]) -> HashSet<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn default_cascade_names_english_and_russian() {
    let none = HashSet::new();
    assert_eq!(detect_language(ENGLISH, &none, &none), "en");
    assert_eq!(detect_language(RUSSIAN, &none, &none), "ru");
    // agreement stands even when the language is expected
    assert_eq!(detect_language(RUSSIAN, &none, &codes(&["ru"])), "ru");
}

#[test]
fn default_cascade_suppresses_protected_languages() {
    let none = HashSet::new();
    assert_eq!(detect_language(ENGLISH, &codes(&["en"]), &none), "");
    assert_eq!(detect_language(RUSSIAN, &codes(&["ru"]), &none), "");

    let sets = LanguageSets {
        protected: codes(&["en"]),
        defaults: HashSet::new(),
    };
    assert_eq!(LanguageEngine::default().detect_with(ENGLISH, &sets), "");
}
