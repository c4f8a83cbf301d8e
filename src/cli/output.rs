//! Output formatting for CLI commands.

use serde::Serialize;

use crate::analysis::token::Token;
use crate::cli::args::{LexstatArgs, OutputFormat};
use crate::error::Result;
use crate::stats::analyzer::RussianAnalyzer;
use crate::stats::readability::{ReadabilityIndex, TextCounts};

/// Score of one readability index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexScore {
    pub index: ReadabilityIndex,
    pub value: f64,
    pub level: String,
}

/// Average lengths.
#[derive(Debug, Clone, Serialize)]
pub struct Averages {
    pub words_per_sentence: f64,
    pub syllables_per_word: f64,
    pub letters_per_word: f64,
    pub sentences_per_100_words: f64,
}

/// The hardest sentence for one index.
#[derive(Debug, Clone, Serialize)]
pub struct HardestSentence {
    pub index: ReadabilityIndex,
    pub score: f64,
    pub text: String,
    pub counts: TextCounts,
}

/// Result structure for file analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub path: String,
    pub encoding: String,
    pub counts: TextCounts,
    pub indices: Vec<IndexScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub averages: Option<Averages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardest: Option<Vec<HardestSentence>>,
}

impl AnalysisReport {
    /// Build a report from an analyzer. Fails if the text has no sentences
    /// or no Russian words.
    pub fn from_analyzer(
        path: String,
        encoding: String,
        analyzer: &RussianAnalyzer,
        with_averages: bool,
        with_hardest: bool,
    ) -> Result<Self> {
        let indices = ReadabilityIndex::ALL
            .into_iter()
            .map(|index| {
                let value = analyzer.index(index)?;
                Ok(IndexScore {
                    index,
                    value,
                    level: index.interpret(value),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let averages = if with_averages {
            let words_per_sentence = analyzer.words_per_sentence()?;
            Some(Averages {
                words_per_sentence,
                syllables_per_word: analyzer.syllables_per_word()?,
                letters_per_word: analyzer.letters_per_word()?,
                sentences_per_100_words: 100.0 / words_per_sentence,
            })
        } else {
            None
        };

        let hardest = with_hardest.then(|| {
            ReadabilityIndex::ALL
                .into_iter()
                .filter_map(|index| {
                    let (sentence, score) = analyzer.hardest_sentence(index)?;
                    let text = sentence.join(" ");
                    Some(HardestSentence {
                        index,
                        score,
                        text,
                        counts: RussianAnalyzer::from_tokens(sentence).counts(),
                    })
                })
                .collect()
        });

        Ok(AnalysisReport {
            path,
            encoding,
            counts: analyzer.counts(),
            indices,
            averages,
            hardest,
        })
    }
}

/// Result structure for token listings.
#[derive(Debug, Clone, Serialize)]
pub struct TokensResult {
    pub path: String,
    pub tokens: Vec<Token>,
}

/// Result structure for sentence listings.
#[derive(Debug, Clone, Serialize)]
pub struct SentencesResult {
    pub path: String,
    pub sentences: Vec<String>,
}

/// Output a result in the specified format.
///
/// `human` renders the result for [`OutputFormat::Human`].
pub fn output_result<T: Serialize>(
    result: &T,
    args: &LexstatArgs,
    human: impl FnOnce(&T),
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            human(result);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexstatArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print an analysis report as box-drawn tables.
pub fn print_report(report: &AnalysisReport, args: &LexstatArgs) {
    if args.verbosity() > 0 {
        println!("{} ({})", report.path, report.encoding);
    }

    let scores = &report.indices;
    println!(
        "{}",
        draw_table(
            &["Индекс", "Значение", "Уровень"],
            &[
                scores.iter().map(|s| s.index.to_string()).collect(),
                scores.iter().map(|s| format_signed(s.value, 3)).collect(),
                scores.iter().map(|s| s.level.clone()).collect(),
            ],
        )
    );

    println!("{}", counts_table(&report.counts));

    if let Some(averages) = &report.averages {
        println!(
            "{}",
            draw_table(
                &["Среднее кол-во", "Значение"],
                &[
                    vec![
                        "Слов в предложении".to_string(),
                        "Слогов в слове".to_string(),
                        "Букв в слове".to_string(),
                        "Предложений на 100 слов".to_string(),
                    ],
                    vec![
                        format_signed(averages.words_per_sentence, 2),
                        format!("{:.2}", averages.syllables_per_word),
                        format!("{:.2}", averages.letters_per_word),
                        format!("{:.2}", averages.sentences_per_100_words),
                    ],
                ],
            )
        );
    }

    if let Some(hardest) = &report.hardest {
        println!("Наиболее значимые предложения для индексов:");
        for sentence in hardest {
            println!("{}: {:.2}", sentence.index, sentence.score);
            println!("{}", sentence.text);
            println!("{}", counts_table(&sentence.counts));
        }
    }
}

fn counts_table(counts: &TextCounts) -> String {
    draw_table(
        &["Статистика", "Значение"],
        &[
            vec![
                "Предложений".to_string(),
                "Слов".to_string(),
                "Слогов".to_string(),
                "Букв".to_string(),
                "Цифр".to_string(),
            ],
            vec![
                counts.sentences.to_string(),
                counts.words.to_string(),
                counts.syllables.to_string(),
                counts.letters.to_string(),
                counts.digits.to_string(),
            ],
        ],
    )
}

/// Render columns as a box-drawn table.
///
/// Each column is as wide as its longest cell or label plus two. Labels sit
/// in the top border and cells are centered.
///
/// ```text
/// ╔═╡Id╞═╤╡Значение╞╗
/// ║ FRES │  64.300  ║
/// ╚══════╧══════════╝
/// ```
pub fn draw_table(labels: &[&str], columns: &[Vec<String>]) -> String {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cells = columns.get(i).map(Vec::as_slice).unwrap_or_default();
            let widest = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            widest.max(label.chars().count()) + 2
        })
        .collect();

    let mut lines = Vec::with_capacity(rows + 2);

    let header: Vec<String> = labels
        .iter()
        .zip(&widths)
        .map(|(label, &width)| format!("{:═^width$}", format!("╡{label}╞")))
        .collect();
    lines.push(format!("╔{}╗", header.join("╤")));

    for row in 0..rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = columns
                    .get(i)
                    .and_then(|column| column.get(row))
                    .map(String::as_str)
                    .unwrap_or("");
                format!("{cell:^width$}")
            })
            .collect();
        lines.push(format!("║{}║", cells.join("│")));
    }

    let footer: Vec<String> = widths.iter().map(|&width| "═".repeat(width)).collect();
    lines.push(format!("╚{}╝", footer.join("╧")));

    lines.join("\n")
}

/// Fixed-precision number with a space in place of a plus sign.
fn format_signed(value: f64, precision: usize) -> String {
    if value.is_sign_negative() {
        format!("{value:.precision$}")
    } else {
        format!(" {value:.precision$}")
    }
}
