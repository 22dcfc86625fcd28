use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::lexer::Lexer;
use crate::word_index::WordIndex;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Misspelling {
    pub word: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextReport {
    pub path: PathBuf,
    pub misspelled: Vec<Misspelling>,
    pub words_in_text: usize,
}

/// Spell checks `text` against `index`, skipping the words the lexer skips.
pub fn check_text(index: &WordIndex, path: impl Into<PathBuf>, text: &str) -> TextReport {
    let mut words_in_text = 0;
    let misspelled = Lexer::new(text, index.options().max_word_len)
        .inspect(|_| words_in_text += 1)
        .filter(|t| !index.check(&t.lexeme))
        .map(|t| Misspelling {
            line: t.start.line(),
            column: t.start.column(),
            word: t.lexeme,
        })
        .collect::<Vec<_>>();

    TextReport {
        path: path.into(),
        misspelled,
        words_in_text,
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Timings {
    pub load: f64,
    pub check: f64,
    pub size: f64,
    pub unload: f64,
}

impl Timings {
    pub fn total(&self) -> f64 {
        self.load + self.check + self.size + self.unload
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub dictionary: PathBuf,
    pub words_in_dictionary: usize,
    pub texts: Vec<TextReport>,
    pub timings: Timings,
}

impl Report {
    pub fn words_misspelled(&self) -> usize {
        self.texts.iter().map(|t| t.misspelled.len()).sum()
    }

    pub fn words_in_text(&self) -> usize {
        self.texts.iter().map(|t| t.words_in_text).sum()
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nMISSPELLED WORDS\n")?;
        for text in &self.texts {
            for m in &text.misspelled {
                writeln!(
                    out,
                    "{}:{}:{} {}",
                    text.path.display(),
                    m.line,
                    m.column,
                    m.word
                )?;
            }
        }
        writeln!(out)?;
        writeln!(out, "WORDS MISSPELLED:     {}", self.words_misspelled())?;
        writeln!(out, "WORDS IN DICTIONARY:  {}", self.words_in_dictionary)?;
        writeln!(out, "WORDS IN TEXT:        {}", self.words_in_text())?;
        writeln!(out, "TIME IN load:         {:.2}", self.timings.load)?;
        writeln!(out, "TIME IN check:        {:.2}", self.timings.check)?;
        writeln!(out, "TIME IN size:         {:.2}", self.timings.size)?;
        writeln!(out, "TIME IN unload:       {:.2}", self.timings.unload)?;
        writeln!(out, "TIME IN TOTAL:        {:.2}", self.timings.total())?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn index(words: &str) -> WordIndex {
        let mut index = WordIndex::new();
        index.load_from_reader(Cursor::new(words)).unwrap();
        index
    }

    fn report(texts: Vec<TextReport>) -> Report {
        Report {
            dictionary: PathBuf::from("dictionaries/small"),
            words_in_dictionary: 3,
            texts,
            timings: Timings::default(),
        }
    }

    #[test]
    fn finds_misspellings_with_positions() {
        let index = index("the cat sat");
        let report = check_text(&index, "cat.txt", "The cat sta\non teh mat");

        assert_eq!(report.words_in_text, 6);
        assert_eq!(
            report
                .misspelled
                .iter()
                .map(|m| (m.word.as_str(), m.line, m.column))
                .collect::<Vec<_>>(),
            vec![("sta", 1, 9), ("on", 2, 1), ("teh", 2, 4), ("mat", 2, 8)]
        );
    }

    #[test]
    fn skipped_words_are_not_counted() {
        let index = index("a");
        let report = check_text(&index, "t", "a b2b 42 a");
        assert_eq!(report.words_in_text, 2);
        assert!(report.misspelled.is_empty());
    }

    #[test]
    fn text_output() {
        let index = index("the cat sat");
        let report = report(vec![check_text(&index, "cat.txt", "the dog sat")]);
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("cat.txt:1:5 dog\n"));
        assert!(out.contains("WORDS MISSPELLED:     1\n"));
        assert!(out.contains("WORDS IN DICTIONARY:  3\n"));
        assert!(out.contains("WORDS IN TEXT:        3\n"));
        assert!(out.contains("TIME IN TOTAL:        0.00\n"));
    }

    #[test]
    fn json_output() {
        let index = index("the cat sat");
        let report = report(vec![
            check_text(&index, "a.txt", "the dgo"),
            check_text(&index, "b.txt", "cta sat"),
        ]);
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["words_in_dictionary"], 3);
        assert_eq!(value["texts"][0]["misspelled"][0]["word"], "dgo");
        assert_eq!(value["texts"][1]["misspelled"][0]["column"], 1);
        assert_eq!(report.words_misspelled(), 2);
        assert_eq!(report.words_in_text(), 4);
    }
}
