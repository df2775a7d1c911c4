//! Output wire forms
//!
//! The rewrite and retirement passes emit narrower documents than the
//! input: `override` and `is_witness` are never written, and a retired
//! rule drops its range and role as well. These views borrow a [`Rule`]
//! and serialize only the fields of their form, in wire order.
//!
//! Documents are indented by two spaces, and `<`, `>`, `&`, U+2028 and
//! U+2029 inside strings are written as `\uXXXX` escapes, so the bytes
//! match what the scheduler's own tooling emits.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use super::label_constraint::LabelConstraint;
use super::rule::{PeerRole, Rule};
use crate::errors::{PlaceRuleError, Result};

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn is_empty_slice<T>(v: &&[T]) -> bool {
    v.is_empty()
}

fn is_empty_str(v: &&str) -> bool {
    v.is_empty()
}

/// Wire form of a rule produced by the write-region rewrite
#[derive(Debug, Serialize)]
pub struct EnabledRuleWire<'a> {
    pub group_id: &'a str,
    pub id: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    pub index: i64,
    pub start_key: &'a str,
    pub end_key: &'a str,
    pub role: &'a PeerRole,
    pub count: i64,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub label_constraints: &'a [LabelConstraint],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub location_labels: &'a [String],
    #[serde(skip_serializing_if = "is_empty_str")]
    pub isolation_level: &'a str,
}

impl<'a> From<&'a Rule> for EnabledRuleWire<'a> {
    fn from(rule: &'a Rule) -> Self {
        Self {
            group_id: &rule.group_id,
            id: &rule.id,
            index: rule.index,
            start_key: &rule.start_key,
            end_key: &rule.end_key,
            role: &rule.role,
            count: rule.count,
            label_constraints: &rule.label_constraints,
            location_labels: &rule.location_labels,
            isolation_level: &rule.isolation_level,
        }
    }
}

/// Wire form of a rule produced by the retirement pass
#[derive(Debug, Serialize)]
pub struct DeletedRuleWire<'a> {
    pub group_id: &'a str,
    pub id: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    pub index: i64,
    pub count: i64,
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub label_constraints: &'a [LabelConstraint],
    #[serde(skip_serializing_if = "is_empty_slice")]
    pub location_labels: &'a [String],
    #[serde(skip_serializing_if = "is_empty_str")]
    pub isolation_level: &'a str,
}

impl<'a> From<&'a Rule> for DeletedRuleWire<'a> {
    fn from(rule: &'a Rule) -> Self {
        Self {
            group_id: &rule.group_id,
            id: &rule.id,
            index: rule.index,
            count: rule.count,
            label_constraints: &rule.label_constraints,
            location_labels: &rule.location_labels,
            isolation_level: &rule.isolation_level,
        }
    }
}

/// Parse a rule document (a JSON array of rules in the full form)
///
/// # Errors
/// `Serialization` if the text is not JSON or does not map onto rules.
pub fn parse_rules(json: &str) -> Result<Vec<Rule>> {
    Ok(serde_json::from_str(json)?)
}

/// Render rewritten rules as a 2-space indented JSON array
pub fn enabled_document(rules: &[Rule]) -> Result<String> {
    let views: Vec<EnabledRuleWire<'_>> = rules.iter().map(EnabledRuleWire::from).collect();
    to_document(&views)
}

/// Render retired rules as a 2-space indented JSON array
pub fn retired_document(rules: &[Rule]) -> Result<String> {
    let views: Vec<DeletedRuleWire<'_>> = rules.iter().map(DeletedRuleWire::from).collect();
    to_document(&views)
}

fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, EscapingFormatter::default());
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| PlaceRuleError::Serialization {
        message: e.to_string(),
    })
}

/// Two-space pretty printer that also escapes HTML-sensitive characters
/// and the Unicode line and paragraph separators
#[derive(Default)]
struct EscapingFormatter {
    pretty: PrettyFormatter<'static>,
}

impl Formatter for EscapingFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escape = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}
