//! LaTeX and CSV forms of card tables.

use std::{fmt::Write as _, io, path::Path};

use itertools::Itertools;

use crate::{error::Result, render::Table};

/// The column width, in cm, of each value column of a multi-column table.
pub const DEFAULT_COLUMN_WIDTH: f64 = 2.5;

const FOOTNOTE_COMMENT: &str =
    r"% footnotes require tablefootnote package (put \usepackage{tablefootnote} in preamble)";
const ARRAY_COMMENT: &str = r"% put \usepackage{array} in preamble";

/// Escapes the characters LaTeX treats specially.
///
/// # Examples
///
/// ```
/// use netcards::export::tex_escape;
///
/// assert_eq!(tex_escape("50% of A&B"), r"50\% of A\&B");
/// assert_eq!(tex_escape("x^2 ~ y"), r"x\^{}2 \textasciitilde{} y");
/// ```
pub fn tex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\^{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '<' => escaped.push_str(r"\textless{}"),
            '>' => escaped.push_str(r"\textgreater{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes a table as a booktabs `tabular`, meant to be included inside a `table` environment.
///
/// Single column tables use an `ll` layout, or `lp{<width>cm}` when a width is given. Tables with
/// several value columns always use fixed width, ragged right value columns, by default
/// [`DEFAULT_COLUMN_WIDTH`] wide.
///
/// The first row carrying a note defines it with `\tablefootnote`, later rows refer back to it.
///
/// # Examples
///
/// ```
/// use netcards::card::Card;
/// use netcards::edge::Edge;
/// use netcards::export::to_latex;
/// use netcards::graph::Graph;
/// use netcards::render::Table;
///
/// let mut graph = Graph::new();
/// graph.insert(Edge::new(1, 2));
///
/// let card = Card::new(&graph).unwrap();
/// let latex = to_latex(&Table::from_card(&card), None);
///
/// assert!(latex.starts_with("\\begin{tabular}{ll}\n\\toprule\n"));
/// assert!(latex.contains("Number of nodes & 2 \\\\"));
/// ```
pub fn to_latex(table: &Table, width: Option<f64>) -> String {
    let footnotes = table.footnotes();
    let mut defined = Vec::new();

    let mut lines = vec![
        format!(r"\begin{{tabular}}{{{}}}", column_format(table, width)),
        r"\toprule".to_string(),
    ];

    let mut previous_panel = None;
    for row in table.rows() {
        if previous_panel.is_some_and(|panel| panel != row.panel) {
            lines.push(r"\midrule".to_string());
        }
        previous_panel = Some(row.panel);

        let marks = row
            .notes
            .iter()
            .filter_map(|note| footnotes.number(note).map(|number| (number, note)))
            .map(|(number, note)| {
                if defined.contains(&number) {
                    format!(r"\textsuperscript{{\ref{{foot{number}}}}}")
                } else {
                    defined.push(number);
                    format!(r"\tablefootnote{{\label{{foot{number}}}{}}}", tex_escape(note))
                }
            })
            .join(r"\textsuperscript{,}");

        let mut line = tex_escape(&row.field);
        line.push_str(&marks);
        for value in &row.values {
            let _ = write!(line, " & {}", tex_escape(value));
        }
        line.push_str(r" \\");
        lines.push(line);
    }

    lines.push(r"\bottomrule".to_string());
    lines.push(r"\end{tabular}".to_string());
    lines.push(FOOTNOTE_COMMENT.to_string());
    if table.columns() > 1 {
        lines.push(ARRAY_COMMENT.to_string());
    }

    lines.join("\n")
}

/// Writes a table as CSV with one record per field.
///
/// The header is `Panel,Field,Value,Note` for a single card and `Panel,Field,Value_0,..,Note`
/// for several. A field's notes are joined with `"; "`.
pub fn write_csv<W: io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Panel".to_string(), "Field".to_string()];
    if table.columns() == 1 {
        header.push("Value".to_string());
    } else {
        header.extend((0..table.columns()).map(|column| format!("Value_{column}")));
    }
    header.push("Note".to_string());
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.panel.title().to_string(), row.field.clone()];
        record.extend(row.values.iter().cloned());
        record.push(row.notes.join("; "));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a table as CSV to a file, see [`write_csv`].
pub fn save_csv(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)?;
    tracing::info!(path = %path.display(), rows = table.rows().len(), "exported card table to CSV");
    Ok(())
}

fn column_format(table: &Table, width: Option<f64>) -> String {
    match (table.columns(), width) {
        (1, None) => "ll".to_string(),
        (1, Some(width)) => format!("lp{{{width}cm}}"),
        (columns, width) => {
            let width = width.unwrap_or(DEFAULT_COLUMN_WIDTH);
            let column = format!(r">{{\raggedright\arraybackslash}}p{{{width}cm}}");
            format!("l{}", column.repeat(columns))
        }
    }
}
