//! Network cards: an overall panel, a computed structure panel and a metainformation panel.

use std::{fmt, io::Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{
    algorithms::GraphAlgorithms,
    config::{CardConfig, RenderConfig},
    error::{CardError, Result},
    metrics::{StructuralSummary, REQUIRED_STRUCTURE_FIELDS, STRUCTURE_FIELDS},
    panel::{Entry, Panel, PanelKind, Value},
    render::Table,
};

/// The version of the card document written by [`Card::to_json`].
pub const SCHEMA_VERSION: &str = "0.0.1";

pub const NAME: &str = "Name";
pub const KIND: &str = "Kind";
pub const NODES_ARE: &str = "Nodes are";
pub const LINKS_ARE: &str = "Links are";
pub const LINK_WEIGHTS_ARE: &str = "Link weights are";
pub const CONSIDERATIONS: &str = "Considerations";

/// Overall fields present on every card.
pub const REQUIRED_OVERALL_FIELDS: [&str; 5] = [NAME, KIND, NODES_ARE, LINKS_ARE, CONSIDERATIONS];

/// Every overall template field, in display order.
pub const OVERALL_FIELDS: [&str; 6] = [
    NAME,
    KIND,
    NODES_ARE,
    LINKS_ARE,
    LINK_WEIGHTS_ARE,
    CONSIDERATIONS,
];

/// The metainformation fields a new card starts with.
pub const METAINFO_TEMPLATE: [&str; 8] = [
    "Node metadata",
    "Link metadata",
    "Date of creation",
    "Data generating process",
    "Ethics",
    "Funding",
    "Citation",
    "Access",
];

/// A field of a card, as handed to exporters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row<'a> {
    pub panel: PanelKind,
    pub field: &'a str,
    pub entry: &'a Entry,
}

/// A standardized summary of a network dataset.
///
/// The structure panel is computed when the card is built and can't be changed afterwards, the
/// overall and metainformation panels are free text.
///
/// # Examples
///
/// ```
/// use netcards::card::Card;
/// use netcards::edge::Edge;
/// use netcards::graph::Graph;
///
/// let mut graph = Graph::new();
/// graph.insert(Edge::new("alice", "bob"));
/// graph.insert(Edge::new("bob", "carol"));
///
/// let mut card = Card::new(&graph).unwrap();
/// card.update_overall("Nodes are", "Survey participants");
/// card.update_metainfo("Funding", "N/A");
///
/// assert_eq!(card.structure().value("Connected").unwrap().to_string(), "Yes");
/// println!("{card}");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    overall: Panel,
    structure: Panel,
    metainfo: Panel,
}

/// The serialized form of a card.
#[derive(Serialize, Deserialize)]
struct CardDocument {
    schema_version: String,
    #[serde(default)]
    overall: Panel,
    #[serde(default)]
    structure: Panel,
    #[serde(default)]
    metainfo: Panel,
}

impl Card {
    /// Builds a card for a graph with the default configuration.
    pub fn new<G>(graph: &G) -> Result<Self>
    where
        G: GraphAlgorithms + ?Sized,
    {
        Self::with_config(graph, &CardConfig::default())
    }

    /// Builds a card for a graph, computing its structure panel.
    ///
    /// Fails if the graph has no nodes.
    pub fn with_config<G>(graph: &G, config: &CardConfig) -> Result<Self>
    where
        G: GraphAlgorithms + ?Sized,
    {
        let summary = StructuralSummary::compute(graph, config)?;
        let structure = summary.to_panel(config);

        let mut overall = Panel::blank(&[NAME, KIND, NODES_ARE, LINKS_ARE]);
        if graph.is_weighted() {
            overall.set(LINK_WEIGHTS_ARE, Value::blank());
        }
        overall.set(CONSIDERATIONS, Value::blank());

        if config.infer_overall {
            overall.set(NAME, graph.name().unwrap_or_default());
            overall.set(KIND, kind(graph));
        }

        info!(
            nodes = summary.nodes,
            links = summary.links,
            "built network card"
        );

        Ok(Self {
            overall,
            structure,
            metainfo: Panel::blank(&METAINFO_TEMPLATE),
        })
    }

    pub fn overall(&self) -> &Panel {
        &self.overall
    }

    pub fn structure(&self) -> &Panel {
        &self.structure
    }

    pub fn metainfo(&self) -> &Panel {
        &self.metainfo
    }

    pub fn panel(&self, kind: PanelKind) -> &Panel {
        match kind {
            PanelKind::Overall => &self.overall,
            PanelKind::Structure => &self.structure,
            PanelKind::Metainfo => &self.metainfo,
        }
    }

    /// Sets a field of the overall panel. A template field goes back to its template position,
    /// any other field is appended.
    pub fn update_overall(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        trace!(%field, "updating overall panel");
        self.overall.set(field, value);
        self.overall.arrange(&OVERALL_FIELDS, &REQUIRED_OVERALL_FIELDS);
    }

    /// Sets a field of the metainformation panel, placed like [`Card::update_overall`] places
    /// overall fields.
    pub fn update_metainfo(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        trace!(%field, "updating metainfo panel");
        self.metainfo.set(field, value);
        self.metainfo.arrange(&METAINFO_TEMPLATE, &[]);
    }

    /// Sets several fields of the overall panel. New fields are appended in iteration order,
    /// existing ones keep their position.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::card::Card;
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(1, 2));
    ///
    /// let mut card = Card::new(&graph).unwrap();
    /// card.extend_overall([("Nodes are", "Platform users"), ("Curator", "J. Doe")]);
    ///
    /// assert_eq!(card.overall().fields().last(), Some("Curator"));
    /// ```
    pub fn extend_overall<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (field, value) in entries {
            self.update_overall(field, value);
        }
    }

    /// Sets several fields of the metainformation panel, see [`Card::extend_overall`].
    pub fn extend_metainfo<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (field, value) in entries {
            self.update_metainfo(field, value);
        }
    }

    /// Sets a field of the named panel.
    ///
    /// The structure panel is computed from the graph and rejects updates.
    pub fn update(
        &mut self,
        panel: &str,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        match panel.parse::<PanelKind>()? {
            PanelKind::Overall => self.update_overall(field, value),
            PanelKind::Metainfo => self.update_metainfo(field, value),
            PanelKind::Structure => return Err(CardError::ComputedPanel),
        }
        Ok(())
    }

    /// Removes a field from the overall panel, if present, returning its entry.
    ///
    /// Required fields stay on the card: their value and footnotes are cleared in place.
    pub fn remove_overall(&mut self, field: &str) -> Option<Entry> {
        if REQUIRED_OVERALL_FIELDS.contains(&field) {
            let entry = self.overall.get(field).cloned()?;
            self.overall.insert(field, Entry::default());
            return Some(entry);
        }
        self.overall.remove(field)
    }

    /// Removes a field from the metainformation panel, if present.
    pub fn remove_metainfo(&mut self, field: &str) -> Option<Entry> {
        self.metainfo.remove(field)
    }

    /// Attaches a footnote to a field of the first panel containing it.
    pub fn add_footnote(&mut self, field: &str, note: impl Into<String>) -> Result<()> {
        let kind = PanelKind::ALL
            .into_iter()
            .find(|kind| self.panel(*kind).contains(field))
            .ok_or_else(|| CardError::FieldNotInCard(field.to_string()))?;

        self.add_footnote_to(kind, field, note)
    }

    /// Attaches a footnote to a field of the given panel.
    ///
    /// Footnotes never change values, so computed fields can be annotated too.
    pub fn add_footnote_to(
        &mut self,
        kind: PanelKind,
        field: &str,
        note: impl Into<String>,
    ) -> Result<()> {
        let panel = match kind {
            PanelKind::Overall => &mut self.overall,
            PanelKind::Structure => &mut self.structure,
            PanelKind::Metainfo => &mut self.metainfo,
        };

        if panel.add_note(field, note) {
            Ok(())
        } else {
            Err(CardError::FieldNotFound {
                panel: kind,
                field: field.to_string(),
            })
        }
    }

    /// Returns a copy of the card with every value blanked, as a template for other datasets.
    pub fn to_template(&self, keep_notes: bool) -> Card {
        Card {
            overall: self.overall.blanked(keep_notes),
            structure: self.structure.blanked(keep_notes),
            metainfo: self.metainfo.blanked(keep_notes),
        }
    }

    /// Returns every field of the card in display order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        PanelKind::ALL.into_iter().flat_map(move |kind| {
            self.panel(kind)
                .iter()
                .map(move |(field, entry)| Row {
                    panel: kind,
                    field,
                    entry,
                })
        })
    }

    /// Renders the card as an aligned text table.
    pub fn render(&self, config: &RenderConfig) -> String {
        Table::from_card(self).render(config)
    }

    /// Serializes the card to its JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.document())?)
    }

    /// Serializes the card to its JSON document, indented.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    /// Writes the card's JSON document.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.document())?;
        Ok(())
    }

    /// Reads a card from its JSON document.
    ///
    /// Known fields are placed in template order, followed by any other fields in document order.
    /// Required fields missing from the document are added as blanks.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CardDocument = serde_json::from_str(json)?;

        if document.schema_version != SCHEMA_VERSION {
            debug!(
                version = %document.schema_version,
                expected = SCHEMA_VERSION,
                "reading card with a different schema version"
            );
        }

        let mut card = Card {
            overall: document.overall,
            structure: document.structure,
            metainfo: document.metainfo,
        };

        card.overall.arrange(&OVERALL_FIELDS, &REQUIRED_OVERALL_FIELDS);
        card.structure.arrange(&STRUCTURE_FIELDS, &REQUIRED_STRUCTURE_FIELDS);
        card.metainfo.arrange(&METAINFO_TEMPLATE, &[]);

        Ok(card)
    }

    fn document(&self) -> CardDocument {
        CardDocument {
            schema_version: SCHEMA_VERSION.to_string(),
            overall: self.overall.clone(),
            structure: self.structure.clone(),
            metainfo: self.metainfo.clone(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderConfig::default()))
    }
}

/// Describes the kind of a graph, e.g. `"Undirected, weighted"`.
///
/// # Examples
///
/// ```
/// use netcards::card::kind;
/// use netcards::edge::Edge;
/// use netcards::graph::Graph;
///
/// let mut graph = Graph::directed();
/// graph.insert(Edge::weighted("a", "b", -1.0));
///
/// assert_eq!(kind(&graph), "Directed, weighted (negatively)");
/// ```
pub fn kind<G>(graph: &G) -> String
where
    G: GraphAlgorithms + ?Sized,
{
    let mut attributes = vec![if graph.is_directed() {
        "directed"
    } else {
        "undirected"
    }];

    attributes.push(if !graph.is_weighted() {
        "unweighted"
    } else if graph.is_negatively_weighted() {
        "weighted (negatively)"
    } else {
        "weighted"
    });
    attributes.sort_unstable();

    capitalize(&attributes.join(", "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::Edge, graph::Graph, metrics};

    fn triangle() -> Graph<&'static str> {
        let mut graph = Graph::new().with_name("Triangle");
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("b", "c"));
        graph.insert(Edge::new("c", "a"));
        graph
    }

    #[test]
    fn new() {
        let card = Card::new(&triangle()).unwrap();

        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            REQUIRED_OVERALL_FIELDS.to_vec()
        );
        assert!(card.overall().iter().all(|(_, entry)| entry.value().is_blank()));
        assert_eq!(
            card.metainfo().fields().collect::<Vec<_>>(),
            METAINFO_TEMPLATE.to_vec()
        );
        assert_eq!(
            card.structure().value(metrics::CLUSTERING),
            Some(&Value::Float(1.0))
        );
    }

    #[test]
    fn empty_graph() {
        let graph: Graph<u8> = Graph::new();
        assert!(matches!(Card::new(&graph), Err(CardError::EmptyGraph)));
    }

    #[test]
    fn weighted_template() {
        let mut graph = Graph::new();
        graph.insert(Edge::weighted(1, 2, 0.5));

        let card = Card::new(&graph).unwrap();
        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            vec![NAME, KIND, NODES_ARE, LINKS_ARE, LINK_WEIGHTS_ARE, CONSIDERATIONS]
        );
    }

    #[test]
    fn inferred_overall() {
        let config = CardConfig {
            infer_overall: true,
            ..CardConfig::default()
        };
        let card = Card::with_config(&triangle(), &config).unwrap();

        assert_eq!(card.overall().value(NAME), Some(&Value::from("Triangle")));
        assert_eq!(
            card.overall().value(KIND),
            Some(&Value::from("Undirected, unweighted"))
        );
    }

    #[test]
    fn updates_in_place() {
        let mut card = Card::new(&triangle()).unwrap();

        card.extend_overall([(NAME, "Triangle"), ("Curator", "J. Doe"), ("Version", "2")]);
        card.update_overall(NAME, "Triangle 2");

        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            vec![NAME, KIND, NODES_ARE, LINKS_ARE, CONSIDERATIONS, "Curator", "Version"]
        );
        assert_eq!(card.overall().value(NAME), Some(&Value::from("Triangle 2")));
    }

    #[test]
    fn updates_idempotent() {
        let mut card = Card::new(&triangle()).unwrap();

        card.extend_metainfo([("Funding", "NSF"), ("License", "CC-BY")]);
        let once = card.clone();
        card.extend_metainfo([("Funding", "NSF"), ("License", "CC-BY")]);

        assert_eq!(card, once);
    }

    #[test]
    fn update_by_panel_name() {
        let mut card = Card::new(&triangle()).unwrap();

        card.update("overall", NODES_ARE, "Letters").unwrap();
        card.update("Metainformation", "Ethics", "None needed").unwrap();

        assert_eq!(card.overall().value(NODES_ARE), Some(&Value::from("Letters")));
        assert_eq!(
            card.metainfo().value("Ethics"),
            Some(&Value::from("None needed"))
        );

        assert!(matches!(
            card.update("footer", "x", "y"),
            Err(CardError::UnknownPanel(_))
        ));
    }

    #[test]
    fn structure_is_read_only() {
        let mut card = Card::new(&triangle()).unwrap();
        let structure = card.structure().clone();

        assert!(matches!(
            card.update("structure", metrics::DIAMETER, 100),
            Err(CardError::ComputedPanel)
        ));
        assert_eq!(card.structure(), &structure);
    }

    #[test]
    fn remove() {
        let mut card = Card::new(&triangle()).unwrap();

        assert!(card.remove_metainfo("Funding").is_some());
        assert!(card.remove_metainfo("Funding").is_none());
        assert!(!card.metainfo().contains("Funding"));

        card.update_overall("Curator", "J. Doe");
        assert!(card.remove_overall("Curator").is_some());
        assert!(!card.overall().contains("Curator"));
    }

    #[test]
    fn remove_required_blanks() {
        let mut card = Card::new(&triangle()).unwrap();
        card.update_overall(NAME, "Triangle");
        card.add_footnote(NAME, "Informal.").unwrap();

        let removed = card.remove_overall(NAME).unwrap();
        assert_eq!(removed.value(), &Value::from("Triangle"));
        assert_eq!(removed.notes(), ["Informal."]);

        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            REQUIRED_OVERALL_FIELDS.to_vec()
        );
        assert!(card.overall().get(NAME).unwrap().value().is_blank());
        assert!(card.overall().get(NAME).unwrap().notes().is_empty());

        let rendered = card.to_string();
        assert!(rendered.lines().any(|line| line.trim() == NAME));

        let json = card.to_json().unwrap();
        assert_eq!(Card::from_json(&json).unwrap(), card);
    }

    #[test]
    fn updates_restore_template_position() {
        let mut graph = Graph::new();
        graph.insert(Edge::weighted(1, 2, 0.5));
        let mut card = Card::new(&graph).unwrap();

        card.remove_overall(LINK_WEIGHTS_ARE);
        card.update_overall("Curator", "J. Doe");
        card.update_overall(LINK_WEIGHTS_ARE, "Message counts");
        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            vec![NAME, KIND, NODES_ARE, LINKS_ARE, LINK_WEIGHTS_ARE, CONSIDERATIONS, "Curator"]
        );

        card.remove_metainfo("Funding");
        card.update_metainfo("Licence", "CC-BY");
        card.update_metainfo("Funding", "None");
        let mut expected = METAINFO_TEMPLATE.to_vec();
        expected.push("Licence");
        assert_eq!(card.metainfo().fields().collect::<Vec<_>>(), expected);

        let json = card.to_json().unwrap();
        assert_eq!(Card::from_json(&json).unwrap(), card);
    }

    #[test]
    fn footnotes() {
        let mut card = Card::new(&triangle()).unwrap();

        card.add_footnote(NODES_ARE, "Letters of the alphabet.").unwrap();
        card.add_footnote(metrics::DIAMETER, "Unweighted.").unwrap();

        assert_eq!(card.overall().get(NODES_ARE).unwrap().notes().len(), 1);
        assert_eq!(
            card.structure().get(metrics::DIAMETER).unwrap().value(),
            &Value::Integer(1)
        );

        assert!(matches!(
            card.add_footnote("Missing", "x"),
            Err(CardError::FieldNotInCard(_))
        ));
        assert!(matches!(
            card.add_footnote_to(PanelKind::Metainfo, NAME, "x"),
            Err(CardError::FieldNotFound {
                panel: PanelKind::Metainfo,
                ..
            })
        ));
    }

    #[test]
    fn template() {
        let mut card = Card::new(&triangle()).unwrap();
        card.update_overall(NAME, "Triangle");

        let template = card.to_template(true);

        assert!(template.rows().all(|row| row.entry.value().is_blank()));
        assert_eq!(template.rows().count(), card.rows().count());
        assert!(!template
            .structure()
            .get(metrics::DEGREE)
            .unwrap()
            .notes()
            .is_empty());
    }

    #[test]
    fn rows() {
        let card = Card::new(&triangle()).unwrap();
        let rows: Vec<Row> = card.rows().collect();

        assert_eq!(
            rows.len(),
            card.overall().len() + card.structure().len() + card.metainfo().len()
        );
        assert_eq!(rows[0].panel, PanelKind::Overall);
        assert_eq!(rows[0].field, NAME);
        assert_eq!(rows.last().unwrap().panel, PanelKind::Metainfo);
    }

    #[test]
    fn json_round_trip() {
        let mut card = Card::new(&triangle()).unwrap();
        card.update_overall(NAME, "Triangle");
        card.update_metainfo("Extra", 7);

        let json = card.to_json().unwrap();
        assert!(json.starts_with(r#"{"schema_version":"0.0.1","overall":{"Name":"Triangle""#));

        assert_eq!(Card::from_json(&json).unwrap(), card);
        assert_eq!(
            Card::from_json(&card.to_json_pretty().unwrap()).unwrap(),
            card
        );
    }

    #[test]
    fn json_missing_required() {
        let card = Card::from_json(
            r#"{"schema_version": "0.0.1", "overall": {"Kind": "Directed"}, "structure": {}}"#,
        )
        .unwrap();

        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            vec![NAME, KIND, NODES_ARE, LINKS_ARE, CONSIDERATIONS]
        );
        assert_eq!(card.structure().len(), REQUIRED_STRUCTURE_FIELDS.len());
        assert!(card.metainfo().is_empty());
    }

    #[test]
    fn json_known_fields_first() {
        let card = Card::from_json(
            r#"{
                "schema_version": "0.0.1",
                "overall": {"Curator": "J. Doe", "Links are": "Roads", "Name": "Towns"},
                "structure": {"Notes": "Hand counted", "Number of nodes": 3},
                "metainfo": {"Licence": "CC-BY", "Funding": "None", "Ethics": ""}
            }"#,
        )
        .unwrap();

        assert_eq!(
            card.overall().fields().collect::<Vec<_>>(),
            vec![NAME, KIND, NODES_ARE, LINKS_ARE, CONSIDERATIONS, "Curator"]
        );
        assert_eq!(card.overall().value(LINKS_ARE), Some(&Value::from("Roads")));
        assert_eq!(
            card.structure().fields().collect::<Vec<_>>(),
            vec![
                metrics::NUMBER_OF_NODES,
                metrics::NUMBER_OF_LINKS,
                metrics::DEGREE,
                metrics::CLUSTERING,
                metrics::CONNECTED,
                metrics::ASSORTATIVITY,
                "Notes",
            ]
        );
        assert_eq!(
            card.metainfo().fields().collect::<Vec<_>>(),
            vec!["Ethics", "Funding", "Licence"]
        );
    }

    #[test]
    fn json_invalid() {
        assert!(matches!(Card::from_json("[1, 2]"), Err(CardError::Json(_))));
    }

    #[test]
    fn kinds() {
        assert_eq!(kind(&triangle()), "Undirected, unweighted");

        let mut graph = Graph::new();
        graph.insert(Edge::weighted(1, 2, 3.0));
        assert_eq!(kind(&graph), "Undirected, weighted");

        let mut graph = Graph::directed();
        graph.insert(Edge::new(1, 2));
        assert_eq!(kind(&graph), "Directed, unweighted");
    }
}
