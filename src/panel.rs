//! Panels: ordered field-to-value mappings making up a card.

use std::{fmt, str::FromStr};

use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::CardError;

/// The three panels of a card, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelKind {
    Overall,
    Structure,
    Metainfo,
}

impl PanelKind {
    /// All panels in display order.
    pub const ALL: [PanelKind; 3] = [PanelKind::Overall, PanelKind::Structure, PanelKind::Metainfo];

    /// The key of the panel in a card's JSON document.
    pub fn key(&self) -> &'static str {
        match self {
            PanelKind::Overall => "overall",
            PanelKind::Structure => "structure",
            PanelKind::Metainfo => "metainfo",
        }
    }

    /// The human readable title of the panel.
    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Overall => "Overall",
            PanelKind::Structure => "Structure",
            PanelKind::Metainfo => "Metainformation",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PanelKind {
    type Err = CardError;

    /// Parses either the JSON key or the title of a panel, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::panel::PanelKind;
    ///
    /// assert_eq!("metainfo".parse::<PanelKind>().unwrap(), PanelKind::Metainfo);
    /// assert_eq!("Metainformation".parse::<PanelKind>().unwrap(), PanelKind::Metainfo);
    /// assert!("footer".parse::<PanelKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s) || kind.title().eq_ignore_ascii_case(s))
            .ok_or_else(|| CardError::UnknownPanel(s.to_string()))
    }
}

/// The value of a field. A blank value is the empty string.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn blank() -> Self {
        Value::Text(String::new())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(text) if text.is_empty())
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::blank()
    }
}

impl fmt::Display for Value {
    /// Floats always show a fractional part, `0.0` rather than `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(integer) => write!(f, "{integer}"),
            Value::Float(float) => write!(f, "{float:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value::Text(text.clone())
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Value::Integer(integer)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Value::Integer(integer.into())
    }
}

impl From<usize> for Value {
    fn from(count: usize) -> Self {
        i64::try_from(count)
            .map(Value::Integer)
            .unwrap_or(Value::Float(count as f64))
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Value::Float(float)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Integer(integer) => serializer.serialize_i64(*integer),
            Value::Float(float) => serializer.serialize_f64(*float),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v)
            .map(Value::Integer)
            .unwrap_or(Value::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::blank())
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::blank())
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// A field's value and the footnotes attached to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    value: Value,
    notes: Vec<String>,
}

impl Entry {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            notes: Vec::new(),
        }
    }

    /// Attaches a footnote, a note already attached isn't repeated.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.add_note(note);
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        let note = note.into();
        if !self.notes.contains(&note) {
            self.notes.push(note);
        }
    }
}

/// Serialized as the bare value, or as `[value, note, ...]` when notes are attached.
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.notes.is_empty() {
            return self.value.serialize(serializer);
        }

        let mut seq = serializer.serialize_seq(Some(self.notes.len() + 1))?;
        seq.serialize_element(&self.value)?;
        for note in &self.notes {
            seq.serialize_element(note)?;
        }
        seq.end()
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a value or an array of a value followed by footnotes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Entry, E> {
        ValueVisitor.visit_str(v).map(Entry::new)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Entry, E> {
        ValueVisitor.visit_string(v).map(Entry::new)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Entry, E> {
        ValueVisitor.visit_bool(v).map(Entry::new)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Entry, E> {
        ValueVisitor.visit_i64(v).map(Entry::new)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Entry, E> {
        ValueVisitor.visit_u64(v).map(Entry::new)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Entry, E> {
        ValueVisitor.visit_f64(v).map(Entry::new)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Entry, E> {
        Ok(Entry::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Entry, A::Error> {
        let value: Value = seq.next_element()?.unwrap_or_default();

        let mut entry = Entry::new(value);
        while let Some(note) = seq.next_element::<String>()? {
            entry.add_note(note);
        }

        Ok(entry)
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

/// An ordered mapping of field names to entries. Insertion order is display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Panel {
    entries: Vec<(String, Entry)>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a panel holding a blank entry for each field.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::panel::Panel;
    ///
    /// let panel = Panel::blank(&["Name", "Kind"]);
    ///
    /// assert_eq!(panel.fields().collect::<Vec<_>>(), vec!["Name", "Kind"]);
    /// assert!(panel.value("Name").unwrap().is_blank());
    /// ```
    pub fn blank(fields: &[&str]) -> Self {
        let mut panel = Self::new();
        for field in fields {
            panel.set(*field, Value::blank());
        }
        panel
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    pub fn get(&self, field: &str) -> Option<&Entry> {
        self.position(field).map(|i| &self.entries[i].1)
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).map(Entry::value)
    }

    /// Returns the field names in display order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    /// Returns the fields and their entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(field, entry)| (field.as_str(), entry))
    }

    /// Sets a field's value. An existing field is updated in place and keeps its notes, a new one
    /// is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::panel::Panel;
    ///
    /// let mut panel = Panel::blank(&["Name", "Kind"]);
    /// panel.set("Funding", "N/A");
    /// panel.set("Name", "Experiment A-1");
    ///
    /// assert_eq!(panel.fields().collect::<Vec<_>>(), vec!["Name", "Kind", "Funding"]);
    /// ```
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();

        match self.position(&field) {
            Some(i) => self.entries[i].1.value = value,
            None => self.entries.push((field, Entry::new(value))),
        }
    }

    /// Inserts a whole entry, replacing the entry of an existing field in place.
    pub fn insert(&mut self, field: impl Into<String>, entry: Entry) {
        let field = field.into();

        match self.position(&field) {
            Some(i) => self.entries[i].1 = entry,
            None => self.entries.push((field, entry)),
        }
    }

    /// Appends a blank field unless it's already present.
    pub fn ensure(&mut self, field: &str) {
        if !self.contains(field) {
            self.entries.push((field.to_string(), Entry::default()));
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Entry> {
        self.position(field).map(|i| self.entries.remove(i).1)
    }

    /// Attaches a footnote to a field, returns `false` if the field isn't present.
    pub fn add_note(&mut self, field: &str, note: impl Into<String>) -> bool {
        match self.position(field) {
            Some(i) => {
                self.entries[i].1.add_note(note);
                true
            }
            None => false,
        }
    }

    /// Returns a copy with every value blanked, optionally keeping the notes.
    pub fn blanked(&self, keep_notes: bool) -> Panel {
        let entries = self
            .entries
            .iter()
            .map(|(field, entry)| {
                let notes = if keep_notes {
                    entry.notes.clone()
                } else {
                    Vec::new()
                };

                (
                    field.clone(),
                    Entry {
                        value: Value::blank(),
                        notes,
                    },
                )
            })
            .collect();

        Panel { entries }
    }

    /// Puts the known fields first, in the given order, followed by the other fields in their
    /// current order. Missing required fields are added as blanks.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::panel::Panel;
    ///
    /// let mut panel = Panel::blank(&["Curator", "Kind"]);
    /// panel.arrange(&["Name", "Kind"], &["Name"]);
    ///
    /// assert_eq!(panel.fields().collect::<Vec<_>>(), vec!["Name", "Kind", "Curator"]);
    /// ```
    pub fn arrange(&mut self, known: &[&str], required: &[&str]) {
        for field in required {
            self.ensure(field);
        }

        let rank = |field: &str| {
            known
                .iter()
                .position(|known| *known == field)
                .unwrap_or(known.len())
        };
        // Stable, so fields of equal rank keep their order.
        self.entries.sort_by_key(|(field, _)| rank(field));
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == field)
    }
}

impl<K, V> FromIterator<(K, V)> for Panel
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut panel = Panel::new();
        for (field, value) in iter {
            panel.set(field, value);
        }
        panel
    }
}

impl Serialize for Panel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, entry) in &self.entries {
            map.serialize_entry(field, entry)?;
        }
        map.end()
    }
}

struct PanelVisitor;

impl<'de> Visitor<'de> for PanelVisitor {
    type Value = Panel;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Panel, A::Error> {
        let mut panel = Panel::new();

        // Read in document order, the order is the display order.
        while let Some((field, entry)) = map.next_entry::<String, Entry>()? {
            panel.insert(field, entry);
        }

        Ok(panel)
    }
}

impl<'de> Deserialize<'de> for Panel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PanelVisitor)
    }
}
