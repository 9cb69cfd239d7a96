//! Four-column treebank text: `word \t tag \t head \t label`.
//!
//! Blank lines separate sentences and lines starting with `#` are comments.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use arcus_protocol::{ParseResult, Sentence, SentenceId, TokenRecord, Treebank};
use nom::{
    bytes::complete::take_till,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    multi::separated_list1,
    IResult,
};
use tracing::{debug, warn};

use crate::error::{LoadError, RecordError};

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

fn head_index(input: &str) -> IResult<&str, u32> {
    all_consuming(map_res(digit1, str::parse::<u32>))(input)
}

/// Parses one non-blank, non-comment line. Fields past the fourth are ignored.
pub fn parse_record(line: &str) -> Result<TokenRecord, RecordError> {
    let columns = match fields(line) {
        Ok((_, columns)) => columns,
        Err(_) => return Err(RecordError::TooFewFields(0)),
    };
    if columns.len() < 4 {
        return Err(RecordError::TooFewFields(columns.len()));
    }

    let head_text = columns[2].trim();
    let (_, head) =
        head_index(head_text).map_err(|_| RecordError::InvalidHead(head_text.to_string()))?;

    Ok(TokenRecord {
        word: columns[0].to_string(),
        tag: columns[1].to_string(),
        head,
        label: columns[3].to_string(),
    })
}

struct SentenceBuilder {
    sentences: Vec<Sentence>,
    records: Vec<TokenRecord>,
}

impl SentenceBuilder {
    fn flush(&mut self, line: usize) {
        if self.records.is_empty() {
            return;
        }
        let records = std::mem::take(&mut self.records);
        let id = SentenceId::from_index(self.sentences.len());
        match Sentence::new(id, records) {
            Ok(sentence) => self.sentences.push(sentence),
            Err(error) => warn!(line, %error, "dropping sentence"),
        }
    }
}

/// Reads every sentence from `reader`. Malformed records and sentences with
/// out-of-range heads are dropped with a warning.
pub fn read_treebank<R: BufRead>(reader: R) -> Result<Treebank, LoadError> {
    let mut builder = SentenceBuilder { sentences: Vec::new(), records: Vec::new() };
    let mut line_number = 0;

    for line in reader.lines() {
        let line = line?;
        line_number += 1;
        let line = line.trim();

        if line.is_empty() {
            builder.flush(line_number);
        } else if line.starts_with('#') {
            continue;
        } else {
            match parse_record(line) {
                Ok(record) => builder.records.push(record),
                Err(error) => warn!(line = line_number, %error, "dropping malformed record"),
            }
        }
    }
    builder.flush(line_number);

    debug!(sentences = builder.sentences.len(), "treebank loaded");
    Ok(Treebank::new(builder.sentences))
}

pub fn load_treebank(path: impl AsRef<Path>) -> Result<Treebank, LoadError> {
    let file = File::open(path)?;
    read_treebank(BufReader::new(file))
}

/// Writes the predicted tree of `sentence` in the same four-column format,
/// followed by a blank line.
pub fn write_tab<W: Write>(
    out: &mut W,
    sentence: &Sentence,
    result: &ParseResult,
) -> std::io::Result<()> {
    for id in sentence.dependents() {
        let token = sentence.token(id);
        let (head, label) = (result.head(id), result.label(id));
        writeln!(out, "{}\t{}\t{}\t{}", token.word, token.tag, head, label)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcus_protocol::{Arc, ArcSet, TokenId};

    #[test]
    fn test_parse_record() {
        let record = parse_record("cat\tNOUN\t3\tnsubj").unwrap();
        assert_eq!(record.word, "cat");
        assert_eq!(record.tag, "NOUN");
        assert_eq!(record.head, 3);
        assert_eq!(record.label, "nsubj");

        // Trailing columns are ignored
        assert_eq!(parse_record("a\tb\t0\troot\textra").unwrap().label, "root");
    }

    #[test]
    fn test_malformed_records() {
        assert_eq!(parse_record("cat\tNOUN\t3"), Err(RecordError::TooFewFields(3)));
        assert_eq!(parse_record("cat"), Err(RecordError::TooFewFields(1)));
        assert_eq!(
            parse_record("cat\tNOUN\tthree\tnsubj"),
            Err(RecordError::InvalidHead("three".to_string()))
        );
        assert_eq!(
            parse_record("cat\tNOUN\t-1\tnsubj"),
            Err(RecordError::InvalidHead("-1".to_string()))
        );
    }

    #[test]
    fn test_read_treebank_boundaries() {
        let text = "# sent 1\nthe\tDET\t2\tdet\ncat\tNOUN\t0\troot\n\n\n\
                    broken line\nhello\tINTJ\t0\troot\n\nbad\tX\t9\tdep\n\n\
                    last\tX\t0\troot";
        let treebank = read_treebank(text.as_bytes()).unwrap();

        let texts: Vec<String> = treebank.sentences.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["the cat", "hello", "last"]);
        assert_eq!(treebank.sentences[1].id, SentenceId(1));
        assert_eq!(treebank.token_count(), 4);
    }

    #[test]
    fn test_load_treebank_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gold.tab");
        std::fs::write(&path, "a\tX\t0\troot\r\nb\tX\t1\tdep\r\n").unwrap();

        let treebank = load_treebank(&path).unwrap();
        assert_eq!(treebank.sentences.len(), 1);
        assert_eq!(treebank.sentences[0].gold_label(TokenId(2)), "dep");
    }

    #[test]
    fn test_write_tab() {
        let treebank = read_treebank("the\tDET\t2\tdet\ncat\tNOUN\t0\troot\n".as_bytes()).unwrap();
        let sentence = &treebank.sentences[0];

        let mut arcs = ArcSet::new();
        arcs.push(Arc::new(TokenId(2), TokenId(1), "det"));
        arcs.push(Arc::new(TokenId::ROOT, TokenId(2), "root"));
        let result = ParseResult::from_arcs(arcs, sentence.len());

        let mut out = Vec::new();
        write_tab(&mut out, sentence, &result).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "the\tDET\t2\tdet\ncat\tNOUN\t0\troot\n\n");
    }
}
