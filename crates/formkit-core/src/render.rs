//! Form rendering.
//!
//! [`render`] turns a schema document and its type map into the inner markup
//! of an HTML form. Input names are field paths. [`field_paths`] produces the
//! pairs a browser would post for the same form left untouched, using the
//! same traversal, so the two can never disagree about naming.
//!
//! List fields use one of two encodings:
//!
//! - [`ListEncoding::Rows`]: one input per element named `<path>.<index>`,
//!   plus a blank trailing row for appending. The page script renumbers the
//!   rows after a removal so indices stay `0..n`.
//! - [`ListEncoding::Comma`]: one input named `<path>` holding the elements
//!   joined with `", "`.
//!
//! The reconstructor accepts both.

use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::descriptor::{FieldType, ScalarType, TypeMap};
use crate::path::FieldPath;
use crate::reconstruct::FlatSubmission;
use crate::walk::{walk, Field, FormVisitor};

/// How list fields are laid out in the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListEncoding {
    #[default]
    Rows,
    Comma,
}

impl ListEncoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Comma => "comma",
        }
    }
}

impl fmt::Display for ListEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rows" => Ok(Self::Rows),
            "comma" => Ok(Self::Comma),
            other => Err(format!("unknown list encoding '{other}' (expected rows or comma)")),
        }
    }
}

/// Render the form controls for `schema`.
#[must_use]
pub fn render(schema: &Map<String, Value>, types: &TypeMap, encoding: ListEncoding) -> String {
    let mut renderer = HtmlRenderer {
        out: String::new(),
        encoding,
    };
    walk(schema, types, &FieldPath::root(), &mut renderer);
    renderer.out
}

/// The submission an unmodified rendering of `schema` would post.
#[must_use]
pub fn field_paths(
    schema: &Map<String, Value>,
    types: &TypeMap,
    encoding: ListEncoding,
) -> FlatSubmission {
    let mut collector = PathCollector {
        flat: FlatSubmission::new(),
        encoding,
    };
    walk(schema, types, &FieldPath::root(), &mut collector);
    collector.flat
}

/// Escape text for use in element content and quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The option a `<select>` for a bool field starts on.
///
/// `false` only when the stored text says so; otherwise the first option,
/// `true`, just as a browser picks it when nothing is marked selected.
fn selected_bool(text: &str) -> &'static str {
    if text.eq_ignore_ascii_case("false") {
        "false"
    } else {
        "true"
    }
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

struct HtmlRenderer {
    out: String,
    encoding: ListEncoding,
}

impl HtmlRenderer {
    fn text_input(&mut self, field: &Field<'_>, input_type: &str) {
        let _ = write!(
            self.out,
            r#"<div class="field"><label>{key}:</label><input type="{input_type}" name="{name}" value="{value}"></div>"#,
            key = escape_html(field.key),
            name = escape_html(field.path.as_str()),
            value = escape_html(&field.text()),
        );
    }

    fn bool_select(&mut self, field: &Field<'_>) {
        let text = field.text();
        let marker = |option: &str| {
            if text.eq_ignore_ascii_case(option) {
                " selected"
            } else {
                ""
            }
        };
        let _ = write!(
            self.out,
            r#"<div class="field"><label>{key}:</label><select name="{name}"><option value="true"{on}>True</option><option value="false"{off}>False</option></select></div>"#,
            key = escape_html(field.key),
            name = escape_html(field.path.as_str()),
            on = marker("true"),
            off = marker("false"),
        );
    }

    fn comma_list(&mut self, field: &Field<'_>, element: ScalarType) {
        let _ = write!(
            self.out,
            r#"<div class="field"><label>{key}:</label><input type="text" name="{name}" value="{value}"><span class="hint">(comma-separated {element} values)</span></div>"#,
            key = escape_html(field.key),
            name = escape_html(field.path.as_str()),
            value = escape_html(&field.items().join(", ")),
        );
    }

    fn row_list(&mut self, field: &Field<'_>, element: ScalarType) {
        let items = field.items();
        let _ = write!(
            self.out,
            r#"<div class="field list-field" data-path="{path}"><label>{key}:</label><div class="list-rows">"#,
            path = escape_html(field.path.as_str()),
            key = escape_html(field.key),
        );
        let blank = String::new();
        for (index, item) in items.iter().chain(std::iter::once(&blank)).enumerate() {
            let _ = write!(
                self.out,
                r#"<div class="list-row"><input type="text" name="{name}" value="{value}">"#,
                name = escape_html(field.path.index(index).as_str()),
                value = escape_html(item),
            );
            if index > 0 {
                self.out
                    .push_str(r#"<button type="button" class="remove-row">&minus;</button>"#);
            }
            self.out.push_str("</div>");
        }
        let _ = write!(
            self.out,
            r#"</div><button type="button" class="add-row">+</button><span class="hint">(list of {element} values)</span></div>"#,
        );
    }
}

impl FormVisitor for HtmlRenderer {
    fn enter_group(&mut self, key: &str, _path: &FieldPath) {
        let _ = write!(self.out, "<fieldset><legend>{}</legend>", escape_html(key));
    }

    fn field(&mut self, field: Field<'_>) {
        match field.field_type {
            FieldType::List(element) => match self.encoding {
                ListEncoding::Rows => self.row_list(&field, element),
                ListEncoding::Comma => self.comma_list(&field, element),
            },
            FieldType::Scalar(ScalarType::Bool) => self.bool_select(&field),
            FieldType::Scalar(ScalarType::Int) => self.text_input(&field, "number"),
            FieldType::Scalar(ScalarType::Str) => self.text_input(&field, "text"),
        }
    }

    fn exit_group(&mut self, _key: &str, _path: &FieldPath) {
        self.out.push_str("</fieldset>");
    }
}

// ---------------------------------------------------------------------------
// Posted pairs
// ---------------------------------------------------------------------------

struct PathCollector {
    flat: FlatSubmission,
    encoding: ListEncoding,
}

impl FormVisitor for PathCollector {
    fn enter_group(&mut self, _key: &str, _path: &FieldPath) {}

    fn field(&mut self, field: Field<'_>) {
        let path = field.path;
        match (field.field_type, self.encoding) {
            (FieldType::List(_), ListEncoding::Rows) => {
                let items = field.items();
                let blank_row = items.len();
                for (index, item) in items.into_iter().enumerate() {
                    self.flat.insert(path.index(index).into_string(), item);
                }
                self.flat.insert(path.index(blank_row).into_string(), "");
            }
            (FieldType::List(_), ListEncoding::Comma) => {
                self.flat.insert(path.as_str(), field.items().join(", "));
            }
            (FieldType::Scalar(ScalarType::Bool), _) => {
                self.flat.insert(path.as_str(), selected_bool(&field.text()));
            }
            (FieldType::Scalar(_), _) => {
                self.flat.insert(path.as_str(), field.text());
            }
        }
    }

    fn exit_group(&mut self, _key: &str, _path: &FieldPath) {}
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counts of what a form contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    pub groups: usize,
    /// Leaf fields, list fields included.
    pub fields: usize,
    pub lists: usize,
    /// Deepest group nesting; `0` when every field is top-level.
    pub depth: usize,
}

impl FormSummary {
    #[must_use]
    pub fn of(schema: &Map<String, Value>, types: &TypeMap) -> Self {
        let mut counter = SummaryCounter::default();
        walk(schema, types, &FieldPath::root(), &mut counter);
        counter.summary
    }
}

#[derive(Default)]
struct SummaryCounter {
    summary: FormSummary,
    level: usize,
}

impl FormVisitor for SummaryCounter {
    fn enter_group(&mut self, _key: &str, _path: &FieldPath) {
        self.summary.groups += 1;
        self.level += 1;
        self.summary.depth = self.summary.depth.max(self.level);
    }

    fn field(&mut self, field: Field<'_>) {
        self.summary.fields += 1;
        if field.field_type.is_list() {
            self.summary.lists += 1;
        }
    }

    fn exit_group(&mut self, _key: &str, _path: &FieldPath) {
        self.level -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixture() -> (Map<String, Value>, TypeMap) {
        let schema = json!({
            "user": {"name": "Ann", "age": 30, "tags": ["a", "b"]},
            "flag": "TRUE"
        });
        let types = TypeMap::from_value(&json!({
            "user": {"name": "str", "age": "int", "tags": "list[str]"},
            "flag": "bool"
        }))
        .expect("types");
        (schema.as_object().cloned().expect("object"), types)
    }

    #[test]
    fn groups_become_fieldsets() {
        let (schema, types) = fixture();
        let html = render(&schema, &types, ListEncoding::Rows);
        assert!(html.starts_with("<fieldset><legend>user</legend>"));
        assert_eq!(html.matches("</fieldset>").count(), 1);
    }

    #[test]
    fn scalar_controls_follow_type() {
        let (schema, types) = fixture();
        let html = render(&schema, &types, ListEncoding::Rows);
        assert!(html.contains(r#"<input type="text" name="user.name" value="Ann">"#));
        assert!(html.contains(r#"<input type="number" name="user.age" value="30">"#));
        assert!(html.contains(
            r#"<select name="flag"><option value="true" selected>True</option><option value="false">False</option></select>"#
        ));
    }

    #[test]
    fn rows_encoding_adds_blank_trailing_row() {
        let (schema, types) = fixture();
        let html = render(&schema, &types, ListEncoding::Rows);
        assert!(html.contains(r#"data-path="user.tags""#));
        assert!(html.contains(r#"name="user.tags.0" value="a">"#));
        assert!(html.contains(r#"name="user.tags.1" value="b">"#));
        assert!(html.contains(r#"name="user.tags.2" value="">"#));
        assert_eq!(html.matches("remove-row").count(), 2);
        assert!(html.contains("(list of str values)"));
    }

    #[test]
    fn comma_encoding_joins_elements() {
        let (schema, types) = fixture();
        let html = render(&schema, &types, ListEncoding::Comma);
        assert!(html.contains(r#"<input type="text" name="user.tags" value="a, b">"#));
        assert!(html.contains("(comma-separated str values)"));
        assert!(!html.contains("user.tags.0"));
    }

    #[test]
    fn int_field_shows_non_numeric_value_verbatim() {
        let schema = json!({"age": "unknown"});
        let types = TypeMap::from_value(&json!({"age": "int"})).expect("types");
        let html = render(schema.as_object().expect("object"), &types, ListEncoding::Rows);
        assert!(html.contains(r#"type="number" name="age" value="unknown""#));
    }

    #[test]
    fn missing_annotation_renders_text_input() {
        let schema = json!({"note": 5});
        let html = render(
            schema.as_object().expect("object"),
            TypeMap::empty(),
            ListEncoding::Rows,
        );
        assert_eq!(
            html,
            r#"<div class="field"><label>note:</label><input type="text" name="note" value="5"></div>"#
        );
    }

    #[test]
    fn values_and_keys_are_escaped() {
        let schema = json!({"<b>": "\"quoted\" & 'single'"});
        let html = render(
            schema.as_object().expect("object"),
            TypeMap::empty(),
            ListEncoding::Rows,
        );
        assert!(html.contains("<label>&lt;b&gt;:</label>"));
        assert!(html.contains(r#"value="&quot;quoted&quot; &amp; &#39;single&#39;""#));
    }

    #[test]
    fn bool_with_unrecognised_value_marks_nothing() {
        let schema = json!({"flag": "maybe"});
        let types = TypeMap::from_value(&json!({"flag": "bool"})).expect("types");
        let html = render(schema.as_object().expect("object"), &types, ListEncoding::Rows);
        assert!(!html.contains("selected"));
    }

    #[test]
    fn field_paths_match_rendered_names() {
        let (schema, types) = fixture();
        let flat = field_paths(&schema, &types, ListEncoding::Rows);
        let pairs: Vec<(&str, &str)> = flat.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("user.name", "Ann"),
                ("user.age", "30"),
                ("user.tags.0", "a"),
                ("user.tags.1", "b"),
                ("user.tags.2", ""),
                ("flag", "true"),
            ]
        );

        let comma = field_paths(&schema, &types, ListEncoding::Comma);
        assert_eq!(comma.get("user.tags"), Some("a, b"));
    }

    #[test]
    fn summary_counts_groups_fields_and_lists() {
        let schema = json!({
            "a": {"b": {"c": 1}, "d": [1]},
            "e": "x"
        });
        let types = TypeMap::from_value(&json!({"a": {"d": "list[int]"}})).expect("types");
        let summary = FormSummary::of(schema.as_object().expect("object"), &types);
        assert_eq!(
            summary,
            FormSummary {
                groups: 2,
                fields: 3,
                lists: 1,
                depth: 2,
            }
        );
    }

    #[test]
    fn list_encoding_parses_case_insensitively() {
        assert_eq!("Comma".parse::<ListEncoding>(), Ok(ListEncoding::Comma));
        assert_eq!(" rows ".parse::<ListEncoding>(), Ok(ListEncoding::Rows));
        assert!("csv".parse::<ListEncoding>().is_err());
    }
}
