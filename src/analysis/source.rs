//! Character sources feeding the read buffer.
//!
//! The scanner consumes decoded characters, never bytes. A [`CharSource`]
//! hands out characters in batches; in-memory text and encoded byte streams
//! implement it the same way, so scanning code never needs to know where its
//! input came from.
//!
//! # Available Sources
//!
//! - [`TextSource`] - In-memory text
//! - [`DecodingSource`] - UTF-8 or Windows-1251 (Cyrillic) byte stream
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::source::{CharSource, TextSource};
//!
//! let mut source = TextSource::new("привет");
//! let mut out = String::new();
//!
//! assert_eq!(source.read_chars(4, &mut out).unwrap(), 4);
//! assert_eq!(out, "прив");
//! assert_eq!(source.read_chars(4, &mut out).unwrap(), 2);
//! assert_eq!(source.read_chars(4, &mut out).unwrap(), 0);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use encoding_rs::{Decoder, DecoderResult, UTF_8, WINDOWS_1251};

use crate::error::{LexstatError, Result};

/// A stream of decoded characters.
pub trait CharSource {
    /// Append up to `n` characters to `out`.
    ///
    /// Returns the number of characters appended. Fewer than `n` characters
    /// are returned only when the source is exhausted.
    fn read_chars(&mut self, n: usize, out: &mut String) -> Result<usize>;
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_chars(&mut self, n: usize, out: &mut String) -> Result<usize> {
        (**self).read_chars(n, out)
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_chars(&mut self, n: usize, out: &mut String) -> Result<usize> {
        (**self).read_chars(n, out)
    }
}

/// In-memory text as a character source.
#[derive(Clone, Debug)]
pub struct TextSource {
    text: String,
    /// Byte offset of the next unread character.
    position: usize,
}

impl TextSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        TextSource {
            text: text.into(),
            position: 0,
        }
    }
}

impl CharSource for TextSource {
    fn read_chars(&mut self, n: usize, out: &mut String) -> Result<usize> {
        let rest = &self.text[self.position..];
        let mut count = 0;
        let mut end = 0;
        for (offset, ch) in rest.char_indices().take(n) {
            end = offset + ch.len_utf8();
            count += 1;
        }
        out.push_str(&rest[..end]);
        self.position += end;
        Ok(count)
    }
}

/// Decodes an encoded byte stream.
///
/// Input is decoded one reader buffer at a time, so memory stays bounded by
/// the reader's buffer no matter how large the stream is. Sequences split
/// across reads are reassembled. Malformed input fails the read.
pub struct DecodingSource<R> {
    reader: R,
    encoding: Encoding,
    decoder: Decoder,
    decoded: String,
    /// Byte offset of the next undelivered character in `decoded`.
    position: usize,
    finished: bool,
}

impl<R: BufRead> DecodingSource<R> {
    pub fn new(reader: R, encoding: Encoding) -> Self {
        DecodingSource {
            reader,
            encoding,
            decoder: encoding.codec().new_decoder_without_bom_handling(),
            decoded: String::new(),
            position: 0,
            finished: false,
        }
    }

    /// Replace `decoded` with the next chunk of input. Returns `false` once
    /// the stream is exhausted.
    fn decode_more(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        self.decoded.clear();
        self.position = 0;

        let available = self.reader.fill_buf()?;
        let last = available.is_empty();
        let needed = self
            .decoder
            .max_utf8_buffer_length_without_replacement(available.len())
            .ok_or_else(|| LexstatError::invalid_data("input chunk too large to decode"))?;
        self.decoded.reserve(needed);

        let (result, read) =
            self.decoder
                .decode_to_string_without_replacement(available, &mut self.decoded, last);
        if let DecoderResult::Malformed(..) = result {
            return Err(LexstatError::invalid_data(format!(
                "malformed {} input",
                self.encoding
            )));
        }
        self.reader.consume(read);

        // Unassigned in the code page, but decoded as U+0098 by the WHATWG table.
        if self.encoding == Encoding::Windows1251 && self.decoded.contains('\u{98}') {
            return Err(LexstatError::invalid_data(
                "byte 0x98 is not defined in windows-1251",
            ));
        }

        self.finished = last;
        Ok(true)
    }
}

impl<R: BufRead> CharSource for DecodingSource<R> {
    fn read_chars(&mut self, n: usize, out: &mut String) -> Result<usize> {
        let mut read = 0;

        while read < n {
            if self.position == self.decoded.len() {
                if !self.decode_more()? {
                    break;
                }
                continue;
            }

            let rest = &self.decoded[self.position..];
            let mut end = 0;
            for ch in rest.chars().take(n - read) {
                end += ch.len_utf8();
                read += 1;
            }
            out.push_str(&rest[..end]);
            self.position += end;
        }

        Ok(read)
    }
}

/// Text encodings understood by [`Encoding::open`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// Cyrillic single-byte code page; the default for Russian plain text.
    #[default]
    Windows1251,
}

impl Encoding {
    /// Wrap a byte reader in a decoding character source.
    pub fn open<'a, R: BufRead + 'a>(self, reader: R) -> Box<dyn CharSource + 'a> {
        Box::new(DecodingSource::new(reader, self))
    }

    fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::Utf8 => UTF_8,
            Encoding::Windows1251 => WINDOWS_1251,
        }
    }

    /// Open a file for decoding.
    pub fn open_file<P: AsRef<Path>>(self, path: P) -> Result<Box<dyn CharSource>> {
        let file = File::open(path)?;
        Ok(self.open(BufReader::new(file)))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Windows1251 => "windows-1251",
        }
    }
}

impl FromStr for Encoding {
    type Err = LexstatError;

    fn from_str(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "windows-1251" | "windows1251" | "cp1251" | "cp-1251" => Ok(Encoding::Windows1251),
            other => Err(LexstatError::invalid_argument(format!(
                "unsupported encoding: {other}"
            ))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
