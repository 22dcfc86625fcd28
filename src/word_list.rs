use std::io::{self, BufRead};

/// A word read from a dictionary source.
///
/// `bytes` holds at most the first `limit` bytes of the word while `len` is
/// its full length, so an over-long word never has to be buffered whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub bytes: Vec<u8>,
    pub len: usize,
}

impl Word {
    pub fn is_truncated(&self) -> bool {
        self.bytes.len() < self.len
    }
}

/// Streams whitespace-delimited words out of a dictionary source.
///
/// Separators are the C `isspace` set, which includes vertical tab on top of
/// what `u8::is_ascii_whitespace` accepts. Words are yielded verbatim as bytes.
#[derive(Debug)]
pub struct WordList<R> {
    reader: R,
    limit: Option<usize>,
}

impl<R: BufRead> Iterator for WordList<R> {
    type Item = io::Result<Word>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_word().transpose()
    }
}

pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

impl<R: BufRead> WordList<R> {
    pub fn new(reader: R) -> WordList<R> {
        WordList {
            reader,
            limit: None,
        }
    }

    /// Keeps at most `limit` bytes of each word; the rest is skipped but
    /// still counted in [`Word::len`].
    pub fn with_limit(reader: R, limit: Option<usize>) -> WordList<R> {
        WordList { reader, limit }
    }

    fn next_word(&mut self) -> io::Result<Option<Word>> {
        let mut bytes = Vec::new();
        let mut len = 0;

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                break;
            }

            if len == 0 {
                let skip = buf.iter().take_while(|&&b| is_separator(b)).count();
                if skip > 0 {
                    self.reader.consume(skip);
                    continue;
                }
            }

            let end = buf.iter().position(|&b| is_separator(b));
            let take = end.unwrap_or(buf.len());
            let keep = match self.limit {
                Some(max) => take.min(max.saturating_sub(bytes.len())),
                None => take,
            };
            bytes
                .try_reserve(keep)
                .map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;
            bytes.extend_from_slice(&buf[..keep]);
            len += take;
            self.reader.consume(take);

            if end.is_some() {
                break;
            }
        }

        if len == 0 {
            return Ok(None);
        }
        Ok(Some(Word { bytes, len }))
    }
}
