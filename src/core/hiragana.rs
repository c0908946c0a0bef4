use regex::Regex;
use std::sync::LazyLock;

/// ぁ (U+3041) ～ ゖ (U+3096)，加上長音符 ー (U+30FC)
static HIRAGANA_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{3041}-\x{3096}\x{30FC}]+").expect("hiragana pattern is a valid regex")
});

/// 依出現順序串接所有平假名片段，其餘字元 (漢字、片假名、英數、標點、空白) 全部丟掉。
/// 找不到任何平假名時回傳空字串，由呼叫端決定怎麼處理。
pub fn extract_hiragana(raw: &str) -> String {
    HIRAGANA_RUN
        .find_iter(raw.trim())
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenates_all_runs() {
        assert_eq!(
            extract_hiragana("こんにちはABC123こんばんはー"),
            "こんにちはこんばんはー"
        );
    }

    #[test]
    fn test_no_hiragana_yields_empty() {
        assert_eq!(extract_hiragana("Hello World"), "");
        assert_eq!(extract_hiragana(""), "");
        // 片假名與漢字都不算
        assert_eq!(extract_hiragana("ジョン 太郎"), "");
    }

    #[test]
    fn test_strips_quotes_and_noise() {
        assert_eq!(extract_hiragana("「じょん」"), "じょん");
        assert_eq!(extract_hiragana("Output: めあり じぇーん\n"), "めありじぇーん");
        assert_eq!(extract_hiragana("ジョン (じょん)"), "じょん");
    }

    #[test]
    fn test_block_boundaries() {
        // U+3040 未分配、U+3097 之後是濁點組合字元，都不在範圍內
        assert_eq!(extract_hiragana("\u{3040}\u{3041}\u{3096}\u{3099}"), "\u{3041}\u{3096}");
        // 片假名中點 U+30FB 不算，長音符 U+30FC 算
        assert_eq!(extract_hiragana("あ\u{30FB}ー"), "あー");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["こんにちはABC123こんばんはー", "Hello", "じょん・すみす", "  ゆーき  "] {
            let once = extract_hiragana(raw);
            assert_eq!(extract_hiragana(&once), once);
        }
    }
}
