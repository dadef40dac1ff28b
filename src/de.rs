//! Deserialization helpers for the Last.fm JSON format.
//!
//! Last.fm's JSON is a mechanical translation of its XML responses, which
//! leaves a few quirks every payload type has to cope with:
//!
//! - numbers are usually sent as strings (`"playcount": "42"`), but not always
//! - an empty collection can arrive as `""` instead of an object
//! - a list with one element can arrive as that element instead of an array
//! - a name can be a plain string, `{"#text": ..}` or `{"name": ..}` depending on the method

use serde::de::{self, Deserializer, IgnoredAny};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Text {
        #[serde(rename = "#text")]
        text: String,
    },
    Named {
        name: String,
    },
}

impl TextField {
    fn into_string(self) -> String {
        match self {
            TextField::Plain(s) => s,
            TextField::Text { text } => text,
            TextField::Named { name } => name,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueOrOther<T> {
    Value(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(u64),
    String(String),
}

/// A count sent either as a JSON number or a numeric string. Blank counts as zero.
pub fn number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_number(deserializer)?.unwrap_or(0))
}

/// Like [`number`], but `null` and blank strings become `None`.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid number: {s:?}"))),
    }
}

/// A name given as a string, `{"#text": ..}` or `{"name": ..}`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextField::deserialize(deserializer).map(TextField::into_string)
}

/// Like [`text`], but `null` and blank names become `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextField>::deserialize(deserializer)?
        .map(TextField::into_string)
        .filter(|s| !s.trim().is_empty()))
}

/// An optional string where `""` means absent (e.g. `mbid`).
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// A list that may be sent as an array, a single element, `""` or `null`.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        Some(OneOrMany::Other(_)) | None => Vec::new(),
    })
}

/// An object that is replaced by `""` when empty.
pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Option::<ValueOrOther<T>>::deserialize(deserializer)? {
        Some(ValueOrOther::Value(value)) => value,
        Some(ValueOrOther::Other(_)) | None => T::default(),
    })
}

/// A boolean sent as `true`, `1`, `"1"` or `"true"`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n != 0,
        Some(Flag::String(s)) => matches!(s.trim(), "1" | "true"),
        None => false,
    })
}
