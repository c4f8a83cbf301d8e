use std::io::{Cursor, Write};
use std::sync::Arc;

use lexstat::analysis::language::russian;
use lexstat::analysis::scanner::{OverflowPolicy, ScanConfig, Scanner};
use lexstat::analysis::source::{Encoding, TextSource};
use lexstat::analysis::stop::StopList;
use lexstat::analysis::token::{Token, TokenType};
use lexstat::analysis::token_list::TokenList;
use lexstat::analysis::token_model::{TokenModel, TokenRegistry};
use lexstat::error::LexstatError;
use tempfile::NamedTempFile;

const TEXT: &str = "В 1961 году Гагарин полетел в космос. Это был первый полёт!  \
                    Кто-то спросил: «Как?» — и т.д. Ответ: 108 минут…";

fn whitespace() -> TokenType {
    TokenType::new("SEP", "WORD")
}

fn letters() -> TokenType {
    TokenType::new("WORD", "")
}

#[test]
fn test_scans_are_deterministic() {
    let scanner = russian::scanner();
    let first = scanner.scan_text(TEXT).unwrap();
    let second = scanner.scan_text(TEXT).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_bodies_reconstruct_source() {
    let scanner = Scanner::new(russian::registry());
    let tokens = scanner.scan_text(TEXT).unwrap();
    assert_eq!(tokens.join(""), TEXT);

    // The ellipsis character matches no rule.
    assert!(tokens.last().unwrap().is_unmatched());
    assert_eq!(tokens.last().unwrap().body(), "…");
}

#[test]
fn test_reconstruction_holds_for_small_windows() {
    for window in [1, 2, 3, 7, 16] {
        let config = ScanConfig::default().with_max_token_len(window);
        let scanner = Scanner::new(russian::registry()).with_config(config);
        let tokens = scanner.scan_text(TEXT).unwrap();
        assert_eq!(tokens.join(""), TEXT, "window {window}");
    }
}

#[test]
fn test_priority_prefers_earlier_rule() {
    let sentence_end = TokenType::new("SEP", "SENT");
    let registry = TokenRegistry::new(vec![
        TokenModel::new(whitespace(), r"\s+").unwrap(),
        TokenModel::new(sentence_end.clone(), r"[.!?]+").unwrap(),
        TokenModel::new(letters(), r"\S+").unwrap(),
    ]);
    let scanner =
        Scanner::new(Arc::new(registry)).with_stop_list(StopList::from_types([whitespace()]));

    // The generic rule would take ".Мир" whole.
    let tokens = scanner.scan_text("Привет .Мир").unwrap();
    let typed: Vec<_> = tokens
        .iter()
        .map(|t| (t.token_type().clone(), t.body()))
        .collect();
    assert_eq!(
        typed,
        vec![
            (letters(), "Привет"),
            (sentence_end, "."),
            (letters(), "Мир"),
        ]
    );

    // With the default rules the word stops before the terminator.
    let tokens = russian::scanner().scan_text("Привет. Мир").unwrap();
    assert_eq!(tokens.join("|"), "Привет|.|Мир");
    assert!(tokens[1].is_type(&russian::sentence_separator()));
}

#[test]
fn test_stop_list_suppression() {
    let registry = TokenRegistry::new(vec![
        TokenModel::new(whitespace(), r"\s+").unwrap(),
        TokenModel::new(letters(), r"\p{L}+").unwrap(),
    ]);
    let scanner = Scanner::new(Arc::new(registry));

    assert_eq!(scanner.scan_text("a b").unwrap().len(), 3);

    let scanner = scanner.with_stop_list(StopList::from_types([whitespace()]));
    let tokens = scanner.scan_text("a b").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.join(","), "a,b");
}

#[test]
fn test_scan_windows_1251_file() {
    // "Привет. Мир." in windows-1251
    let bytes = [
        0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2, 0x2E, 0x20, 0xCC, 0xE8, 0xF0, 0x2E,
    ];
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let tokens = russian::scanner()
        .scan_file(file.path(), Encoding::Windows1251)
        .unwrap();
    assert_eq!(tokens.join(" "), "Привет . Мир .");
    assert_eq!(tokens.count(&russian::sentence_separator()), 2);
}

#[test]
fn test_scan_utf8_file_matches_text_scan() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TEXT.as_bytes()).unwrap();

    let scanner = russian::scanner_with_config(ScanConfig::default().with_max_token_len(16));
    let from_file = scanner.scan_file(file.path(), Encoding::Utf8).unwrap();
    let from_text = russian::scanner().scan_text(TEXT).unwrap();
    assert_eq!(from_file, from_text);
}

#[test]
fn test_missing_file_is_unreadable() {
    let result = russian::scanner().scan_file("/nonexistent/input.txt", Encoding::Utf8);
    assert!(matches!(result, Err(LexstatError::SourceUnreadable(_))));
}

#[test]
fn test_undefined_windows_1251_byte_fails() {
    let bytes = vec![0xCF, 0x98];
    let result = russian::scanner().scan_reader(Cursor::new(bytes), Encoding::Windows1251);
    assert!(matches!(result, Err(LexstatError::SourceUnreadable(_))));
}

#[test]
fn test_long_token_policies() {
    let word = "а".repeat(20);
    let text = format!("{word} б");

    let truncating = russian::scanner_with_config(ScanConfig::default().with_max_token_len(8));
    let tokens = truncating.scan_text(&text).unwrap();
    let bodies: Vec<_> = tokens.iter().map(Token::body).collect();
    assert_eq!(bodies.concat(), text.replace(' ', ""));
    assert!(tokens.len() > 2);

    let strict = russian::scanner_with_config(
        ScanConfig::default()
            .with_max_token_len(8)
            .with_overflow(OverflowPolicy::Error),
    );
    assert!(matches!(
        strict.scan_text(&text),
        Err(LexstatError::BufferOverflow { capacity: 8 })
    ));
}

#[test]
fn test_cut_word_is_reported() {
    let text = "абвгд1";
    let whole = russian::scanner().scan_text(text).unwrap();
    assert_eq!(whole.len(), 1);
    assert!(whole[0].is_type(&russian::generic_word()));

    let strict = russian::scanner_with_config(
        ScanConfig::default()
            .with_max_token_len(4)
            .with_overflow(OverflowPolicy::Error),
    );
    assert!(matches!(
        strict.scan_text(text),
        Err(LexstatError::BufferOverflow { capacity: 4 })
    ));

    let tokens = strict.scan_text("д1 абвг").unwrap();
    assert_eq!(tokens.join("|"), "д1|абвг");
}

#[test]
fn test_custom_source() {
    let scanner = russian::scanner();
    let tokens = scanner.scan(TextSource::new("Да. Нет.")).unwrap();
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_split_and_filter_over_scanned_text() {
    let tokens = russian::scanner().scan_text("Раз два. Три четыре. Пять").unwrap();
    let separator = [russian::sentence_separator()];

    let sentences = tokens.split(&separator, true, false);
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[1].join(" "), "Три четыре .");

    // Walking from the tail drops the leading run instead, and each
    // separator closes the run that follows it.
    let reversed = tokens.split(&separator, true, true);
    assert_eq!(reversed.len(), 2);
    assert_eq!(reversed[0].join(" "), "четыре Три .");
    assert_eq!(reversed[1].join(" "), "Пять .");

    let words = tokens.filter(&[russian::russian_word()], false);
    assert_eq!(words.filter(&[russian::russian_word()], false), words);

    let rest = tokens.filter(&separator, true);
    assert_eq!(rest.filter(&separator, true), rest);
    assert_eq!(rest.len() + tokens.count(&separator[0]), tokens.len());

    let empty = TokenList::new();
    assert!(empty.split(&separator, true, false).is_empty());
}
