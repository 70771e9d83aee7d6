//! Streaming reader for JSON configuration documents.
//!
//! The document is deserialized straight from the body stream; no DOM is
//! built. Parameter names are interned as they are read.

use std::fmt;
use std::io::{self, BufReader, Read};

use encoding_rs::mem::convert_latin1_to_utf8;
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::configuration::Parameters;
use crate::error::{Error, Result};
use crate::intern::{intern, Symbol};

/// The raw shape of a configuration document, before required-field checks.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub(crate) protocol: Option<String>,
    pub(crate) parameters: Option<Parameters>,
}

/// ISO-8859-1 labels. These decode byte-for-byte, unlike the windows-1252
/// alias `Encoding::for_label` resolves them to.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso88591",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "csisolatin1",
    "ibm819",
    "cp819",
];

/// Reads a document from `body`, decoding it as `charset` (UTF-8 when absent).
///
/// UTF-8 input is parsed byte-oriented; any other charset goes through a
/// transcoding reader first. At most `limit` bytes of the body are consumed.
pub(crate) fn read_document(
    body: impl Read,
    charset: Option<&str>,
    limit: u64,
) -> Result<Document> {
    let body = body.take(limit);
    let label = match charset.map(str::trim) {
        None => return parse(BufReader::new(body)),
        Some(label) => label,
    };
    if LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
        return parse(BufReader::new(Latin1Reader::new(body)));
    }

    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| Error::UnsupportedCharset(label.to_string()))?;
    if encoding == UTF_8 {
        parse(BufReader::new(body))
    } else {
        let decoded = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(body);
        parse(BufReader::new(decoded))
    }
}

/// Maps each ISO-8859-1 byte to the code point of the same value, as UTF-8.
struct Latin1Reader<R> {
    inner: R,
    raw: Vec<u8>,
    utf8: Vec<u8>,
    pos: usize,
}

impl<R: Read> Latin1Reader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            raw: vec![0; 4096],
            utf8: Vec::new(),
            pos: 0,
        }
    }
}

impl<R: Read> Read for Latin1Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.utf8.len() {
            let n = self.inner.read(&mut self.raw)?;
            if n == 0 {
                return Ok(0);
            }
            self.utf8.resize(n * 2, 0);
            let written = convert_latin1_to_utf8(&self.raw[..n], &mut self.utf8);
            self.utf8.truncate(written);
            self.pos = 0;
        }
        let n = buf.len().min(self.utf8.len() - self.pos);
        buf[..n].copy_from_slice(&self.utf8[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn parse(source: impl Read) -> Result<Document> {
    let mut de = serde_json::Deserializer::from_reader(source);
    let document = Document::deserialize(&mut de)
        .and_then(|document| de.end().map(|()| document))
        .map_err(classify_error)?;
    Ok(document)
}

fn classify_error(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Io(io::Error::from(err))
    } else {
        Error::MalformedBody(err)
    }
}

enum Field {
    Protocol,
    Parameters,
    Other,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Field, E> {
                Ok(match v {
                    "protocol" => Field::Protocol,
                    "parameters" => Field::Parameters,
                    _ => Field::Other,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a configuration object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Document, A::Error> {
                let mut document = Document::default();
                while let Some(field) = map.next_key::<Field>()? {
                    match field {
                        Field::Protocol => {
                            document.protocol = map.next_value::<Option<Text>>()?.map(|t| t.0);
                        }
                        Field::Parameters => {
                            document.parameters =
                                map.next_value::<Option<ParameterMap>>()?.map(|p| p.0);
                        }
                        Field::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// A JSON scalar rendered as text.
struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = Text;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Text, E> {
                Ok(Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Text, E> {
                Ok(Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Text, E> {
                // Matches JSON's own rendering, e.g. 1.0 stays "1.0".
                match serde_json::Number::from_f64(v) {
                    Some(n) => Ok(Text(n.to_string())),
                    None => Err(E::invalid_value(de::Unexpected::Float(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

struct InternedName(Symbol);

impl<'de> Deserialize<'de> for InternedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = InternedName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a parameter name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<InternedName, E> {
                Ok(InternedName(intern(v)))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

struct ParameterMap(Parameters);

impl<'de> Deserialize<'de> for ParameterMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ParameterMapVisitor;

        impl<'de> Visitor<'de> for ParameterMapVisitor {
            type Value = ParameterMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of connection parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ParameterMap, A::Error> {
                let mut parameters = Parameters::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<InternedName, Text>()? {
                    parameters.insert(name.0, value.0);
                }
                Ok(ParameterMap(parameters))
            }
        }

        deserializer.deserialize_map(ParameterMapVisitor)
    }
}
