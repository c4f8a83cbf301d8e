//! Command implementations for the lexstat CLI.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::analysis::language::russian;
use crate::analysis::scanner::Scanner;
use crate::analysis::stop::StopList;
use crate::analysis::token::Token;
use crate::analysis::token_list::TokenList;
use crate::analysis::token_model::{RuleSpec, TokenRegistry};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LexstatError, Result};
use crate::stats::analyzer::RussianAnalyzer;

/// Execute a CLI command.
pub fn execute_command(args: LexstatArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze_files(analyze_args, &args),
        Command::Tokens(tokens_args) => list_tokens(tokens_args, &args),
        Command::Sentences(sentences_args) => list_sentences(sentences_args, &args),
        Command::Rules(rules_args) => show_rules(rules_args, &args),
    }
}

/// Analyze one or more files.
fn analyze_files(args: &AnalyzeArgs, cli_args: &LexstatArgs) -> Result<()> {
    let scanner = build_scanner(&args.scan, false)?;
    let start_time = Instant::now();

    let reports = if args.parallel {
        let pool = ThreadPoolBuilder::new()
            .num_threads(args.threads.unwrap_or(0))
            .build()
            .map_err(|e| {
                LexstatError::invalid_argument(format!("cannot start thread pool: {e}"))
            })?;
        info!(
            "analyzing {} files on {} threads",
            args.files.len(),
            pool.current_num_threads()
        );
        pool.install(|| {
            args.files
                .par_iter()
                .map(|path| analyze_file(path, &scanner, args))
                .collect::<Result<Vec<_>>>()
        })?
    } else {
        args.files
            .iter()
            .map(|path| analyze_file(path, &scanner, args))
            .collect::<Result<Vec<_>>>()?
    };

    info!(
        "analyzed {} files in {:?}",
        reports.len(),
        start_time.elapsed()
    );

    match reports.as_slice() {
        [report] => output_result(report, cli_args, |report| print_report(report, cli_args)),
        _ => output_result(&reports, cli_args, |reports| {
            for report in reports {
                print_report(report, cli_args);
                println!();
            }
        }),
    }
}

fn analyze_file(path: &Path, scanner: &Scanner, args: &AnalyzeArgs) -> Result<AnalysisReport> {
    debug!("analyzing {}", path.display());
    let encoding = args.scan.encoding;

    let result = encoding
        .open_file(path)
        .and_then(|source| RussianAnalyzer::with_scanner(scanner, source))
        .and_then(|analyzer| {
            AnalysisReport::from_analyzer(
                path.display().to_string(),
                encoding.to_string(),
                &analyzer,
                args.averages,
                args.hardest,
            )
        });

    result.inspect_err(|e| error!("{}: {e}", path.display()))
}

/// Print the tokens of a file.
fn list_tokens(args: &TokensArgs, cli_args: &LexstatArgs) -> Result<()> {
    let scanner = build_scanner(&args.scan, args.all)?;
    let tokens = scanner.scan_file(&args.file, args.scan.encoding)?;

    let result = TokensResult {
        path: args.file.display().to_string(),
        tokens: select_tokens(tokens, args.tag.as_deref()),
    };

    output_result(&result, cli_args, |result| {
        for token in &result.tokens {
            println!("{token}");
        }
    })
}

/// Print the sentences of a file.
fn list_sentences(args: &SentencesArgs, cli_args: &LexstatArgs) -> Result<()> {
    let scanner = build_scanner(&args.scan, false)?;
    let source = args.scan.encoding.open_file(&args.file)?;
    let analyzer = RussianAnalyzer::with_scanner(&scanner, source)?;

    let result = SentencesResult {
        path: args.file.display().to_string(),
        sentences: select_sentences(&analyzer, args.longest),
    };

    output_result(&result, cli_args, |result| {
        for (i, sentence) in result.sentences.iter().enumerate() {
            println!("{}: {sentence}", i + 1);
        }
    })
}

/// Keep the tokens tagged `tag`, or all of them.
fn select_tokens(tokens: TokenList, tag: Option<&str>) -> Vec<Token> {
    match tag {
        Some(tag) => tokens
            .into_iter()
            .filter(|token| token.tag() == Some(tag))
            .collect(),
        None => tokens.into_vec(),
    }
}

/// Every sentence joined with spaces, or only the longest one.
fn select_sentences(analyzer: &RussianAnalyzer, longest: bool) -> Vec<String> {
    let sentences = if longest {
        analyzer.longest_sentence().into_iter().collect()
    } else {
        analyzer.sentences()
    };
    sentences.iter().map(|sentence| sentence.join(" ")).collect()
}

/// Print the built-in rules.
fn show_rules(args: &RulesArgs, cli_args: &LexstatArgs) -> Result<()> {
    let rules = default_rules(args.latin);

    output_result(&rules, cli_args, |rules| {
        let guard = |rule: &RuleSpec| match (&rule.followed_by, &rule.not_followed_by) {
            (Some(pattern), _) => format!("(?={pattern})"),
            (_, Some(pattern)) => format!("(?!{pattern})"),
            _ => String::new(),
        };
        let table = draw_table(
            &["#", "Тип", "Шаблон", "Условие"],
            &[
                (1..=rules.len()).map(|i| i.to_string()).collect(),
                rules
                    .iter()
                    .map(|rule| {
                        let tag = rule.tag.as_deref().unwrap_or_default();
                        let subtag = rule.subtag.as_deref().unwrap_or_default();
                        format!("{tag}/{subtag}")
                    })
                    .collect(),
                rules.iter().map(|rule| rule.pattern.clone()).collect(),
                rules.iter().map(guard).collect(),
            ],
        );
        println!("{table}");
    })
}

/// The built-in rules, optionally with the Latin word rule spliced in ahead
/// of the generic word rule.
fn default_rules(latin: bool) -> Vec<RuleSpec> {
    let mut rules = russian::rules();
    if latin {
        let generic = russian::generic_word();
        let position = rules
            .iter()
            .position(|rule| {
                rule.tag.as_deref() == generic.tag() && rule.subtag.as_deref() == generic.subtag()
            })
            .unwrap_or(rules.len());
        rules.insert(position, russian::latin_word_rule());
    }
    rules
}

/// Build the scanner for a command.
fn build_scanner(args: &ScanArgs, keep_whitespace: bool) -> Result<Scanner> {
    let registry = match &args.rules {
        Some(path) => {
            info!("loading rules from {}", path.display());
            Arc::new(load_rules_from_file(path)?)
        }
        None => russian::registry(),
    };

    let stop = if keep_whitespace {
        StopList::new()
    } else {
        russian::stop_list()
    };

    Ok(Scanner::new(registry)
        .with_stop_list(stop)
        .with_config(args.scan_config()))
}

/// Load a rule file.
fn load_rules_from_file(path: &Path) -> Result<TokenRegistry> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let rules: Vec<RuleSpec> = serde_json::from_reader(reader)?;
    if rules.is_empty() {
        return Err(LexstatError::invalid_rule(format!(
            "{} contains no rules",
            path.display()
        )));
    }
    TokenRegistry::from_rules(&rules)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::source::Encoding;

    fn scan_args() -> ScanArgs {
        ScanArgs {
            encoding: Encoding::Utf8,
            max_token_len: 64,
            strict: false,
            rules: None,
        }
    }

    #[test]
    fn test_default_rules_with_latin() {
        let plain = default_rules(false);
        let with_latin = default_rules(true);

        assert_eq!(with_latin.len(), plain.len() + 1);
        assert_eq!(with_latin[4], russian::latin_word_rule());
        assert_eq!(with_latin[5], plain[4]);
        assert!(TokenRegistry::from_rules(&with_latin).is_ok());
    }

    #[test]
    fn test_build_scanner_stop_list() {
        let scanner = build_scanner(&scan_args(), false).unwrap();
        assert_eq!(scanner.scan_text("a b").unwrap().len(), 2);
        assert_eq!(scanner.config().max_token_len, 64);

        let scanner = build_scanner(&scan_args(), true).unwrap();
        assert_eq!(scanner.scan_text("a b").unwrap().len(), 3);
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"tag": "SEP", "subtag": "WORD", "pattern": "\\s+"}},
                {{"tag": "WORD", "subtag": "", "pattern": "\\w+"}}]"#
        )
        .unwrap();

        let mut args = scan_args();
        args.rules = Some(file.path().to_path_buf());
        let scanner = build_scanner(&args, false).unwrap();

        assert_eq!(scanner.registry().len(), 2);
        let tokens = scanner.scan_text("один два").unwrap();
        assert_eq!(tokens.join("|"), "один|два");
    }

    #[test]
    fn test_load_rules_rejects_empty_and_invalid() {
        let mut empty = NamedTempFile::new().unwrap();
        write!(empty, "[]").unwrap();
        assert!(matches!(
            load_rules_from_file(empty.path()),
            Err(LexstatError::InvalidRegistryRule(_))
        ));

        let mut invalid = NamedTempFile::new().unwrap();
        write!(invalid, r#"[{{"tag": "X", "pattern": "a*"}}]"#).unwrap();
        assert!(matches!(
            load_rules_from_file(invalid.path()),
            Err(LexstatError::InvalidRegistryRule(_))
        ));

        let mut broken = NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        assert!(matches!(
            load_rules_from_file(broken.path()),
            Err(LexstatError::Json(_))
        ));
    }

    #[test]
    fn test_analyze_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Мама мыла раму. Папа читал.").unwrap();

        let args = AnalyzeArgs {
            files: vec![file.path().to_path_buf()],
            scan: scan_args(),
            averages: true,
            hardest: false,
            parallel: false,
            threads: None,
        };
        let scanner = build_scanner(&args.scan, false).unwrap();
        let report = analyze_file(file.path(), &scanner, &args).unwrap();

        assert_eq!(report.counts.sentences, 2);
        assert_eq!(report.encoding, "utf-8");
        assert!(report.averages.is_some());
        assert!(report.hardest.is_none());
    }

    #[test]
    fn test_select_tokens_by_tag() {
        let scanner = build_scanner(&scan_args(), false).unwrap();
        let tokens = scanner.scan_text("Кот спит 3 часа.").unwrap();

        let words = select_tokens(tokens.clone(), Some("WORD"));
        let bodies: Vec<_> = words.iter().map(Token::body).collect();
        assert_eq!(bodies, vec!["Кот", "спит", "часа"]);

        assert_eq!(select_tokens(tokens.clone(), None).len(), tokens.len());
        assert!(select_tokens(tokens, Some("NOPE")).is_empty());
    }

    #[test]
    fn test_select_sentences() {
        let analyzer =
            RussianAnalyzer::from_text("Да. Кот спит на тёплой печке. Нет.").unwrap();

        assert_eq!(
            select_sentences(&analyzer, false),
            vec!["Да .", "Кот спит на тёплой печке .", "Нет ."]
        );
        assert_eq!(
            select_sentences(&analyzer, true),
            vec!["Кот спит на тёплой печке ."]
        );
    }

    #[test]
    fn test_list_commands_on_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Мама мыла раму. Папа читал.").unwrap();
        let cli_args = LexstatArgs::try_parse_from(["lexstat", "-f", "json", "rules"]).unwrap();

        let tokens_args = TokensArgs {
            file: file.path().to_path_buf(),
            scan: scan_args(),
            all: false,
            tag: Some("SEP".to_string()),
        };
        assert!(list_tokens(&tokens_args, &cli_args).is_ok());

        let sentences_args = SentencesArgs {
            file: file.path().to_path_buf(),
            scan: scan_args(),
            longest: true,
        };
        assert!(list_sentences(&sentences_args, &cli_args).is_ok());
    }

    #[test]
    fn test_analyze_missing_file() {
        let args = AnalyzeArgs {
            files: vec![],
            scan: scan_args(),
            averages: false,
            hardest: false,
            parallel: false,
            threads: None,
        };
        let scanner = build_scanner(&args.scan, false).unwrap();
        let result = analyze_file(Path::new("/nonexistent/text.txt"), &scanner, &args);
        assert!(matches!(result, Err(LexstatError::SourceUnreadable(_))));
    }
}
