//! Entity substring extraction by UTF-16 code unit offsets.

use crate::error::{AnalysisError, AnalysisResult};
use tracing::debug;

/// Return the substring of `full_text` covered by an entity.
///
/// `offset` and `length` count UTF-16 code units. Ends past the text are
/// clamped; a range that splits a surrogate pair yields `""`.
pub fn extract_entity_text(full_text: &str, offset: u32, length: u32) -> String {
    match slice_utf16(full_text, offset, length) {
        Ok(text) => text,
        Err(e) => {
            debug!("Entity extraction failed: {}", e);
            String::new()
        }
    }
}

fn slice_utf16(full_text: &str, offset: u32, length: u32) -> AnalysisResult<String> {
    let units: Vec<u16> = full_text.encode_utf16().collect();
    let start = (offset as usize).min(units.len());
    let end = start.saturating_add(length as usize).min(units.len());

    String::from_utf16(&units[start..end]).map_err(|e| {
        AnalysisError::Encoding(format!(
            "code units {}..{} do not decode: {}",
            start, end, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_span_round_trips_bmp_text() {
        for text in ["plain ascii", "中文和English混合", "Ünïcödé ‘quotes’", ""] {
            let len = text.encode_utf16().count() as u32;
            assert_eq!(extract_entity_text(text, 0, len), text);
        }
    }

    #[test]
    fn offsets_count_utf16_units_not_bytes() {
        // each emoji is two code units
        let text = "😀😀 visit t.me/example now";
        assert_eq!(extract_entity_text(text, 5, 13), "visit t.me/ex");
        assert_eq!(extract_entity_text(text, 0, 2), "😀");
        assert_eq!(extract_entity_text("價格 ¥100", 3, 4), "¥100");
    }

    #[test]
    fn split_surrogate_pair_yields_empty() {
        assert_eq!(extract_entity_text("😀abc", 0, 1), "");
        assert_eq!(extract_entity_text("😀abc", 1, 2), "");
    }

    #[test]
    fn out_of_range_ends_are_clamped() {
        assert_eq!(extract_entity_text("hello", 2, 100), "llo");
        assert_eq!(extract_entity_text("hello", 10, 3), "");
        assert_eq!(extract_entity_text("hello", 0, 0), "");
        assert_eq!(extract_entity_text("hello", u32::MAX, u32::MAX), "");
    }
}
