use scraper::{ElementRef, Html, Selector};

use crate::error::QueryError;

/// A structured element lookup: tag, id, classes and exact attribute values,
/// optionally nested inside other lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    /// Outermost first.
    ancestors: Vec<QuerySpec>,
}

impl QuerySpec {
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Only match inside an element matching `ancestor`. Chained calls go
    /// outward: `tr.inside(tbody).inside(table)` is `table tbody tr`.
    pub fn inside(mut self, ancestor: QuerySpec) -> Self {
        self.ancestors.insert(0, ancestor);
        self
    }

    /// Renders the lookup as a CSS selector.
    pub fn to_css(&self) -> String {
        self.ancestors
            .iter()
            .map(QuerySpec::compound)
            .chain(std::iter::once(self.compound()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn compound(&self) -> String {
        let mut css = self.tag.clone().unwrap_or_default();

        if let Some(id) = &self.id {
            css.push('#');
            css.push_str(id);
        }

        for class in &self.classes {
            css.push('.');
            css.push_str(class);
        }

        for (name, value) in &self.attrs {
            let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
            css.push_str(&format!("[{}=\"{}\"]", name, escaped));
        }

        if css.is_empty() {
            "*".to_string()
        } else {
            css
        }
    }

    pub fn compile(self) -> Result<Query, QueryError> {
        let css = self.to_css();
        let selector = Selector::parse(&css).map_err(|e| QueryError::InvalidSelector {
            css: css.clone(),
            message: format!("{:?}", e),
        })?;

        Ok(Query { css, selector })
    }
}

/// A compiled [`QuerySpec`].
#[derive(Debug, Clone)]
pub struct Query {
    css: String,
    selector: Selector,
}

impl Query {
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

/// Element lookup over a parsed document or a subtree of one.
///
/// Results borrow the document `'d`, not the handle the lookup started from.
pub trait DocumentQuery<'d> {
    fn find_all(self, query: &Query) -> Vec<ElementRef<'d>>;

    fn find_first(self, query: &Query) -> Option<ElementRef<'d>>;
}

impl<'d> DocumentQuery<'d> for &'d Html {
    fn find_all(self, query: &Query) -> Vec<ElementRef<'d>> {
        self.select(query.selector()).collect()
    }

    fn find_first(self, query: &Query) -> Option<ElementRef<'d>> {
        self.select(query.selector()).next()
    }
}

impl<'d> DocumentQuery<'d> for ElementRef<'d> {
    fn find_all(self, query: &Query) -> Vec<ElementRef<'d>> {
        self.select(query.selector()).collect()
    }

    fn find_first(self, query: &Query) -> Option<ElementRef<'d>> {
        self.select(query.selector()).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_css() {
        let spec = QuerySpec::tag("div").id("MainSearchTable_info").class("dataTables_info");
        assert_eq!(spec.to_css(), "div#MainSearchTable_info.dataTables_info");

        let spec = QuerySpec::tag("td").class("sticky-col").attr("data-value", "Part Number");
        assert_eq!(spec.to_css(), "td.sticky-col[data-value=\"Part Number\"]");

        let query = QuerySpec::tag("a").class("side-link").class("datasheet-link").compile().unwrap();
        assert_eq!(query.css(), "a.side-link.datasheet-link");
    }

    #[test]
    fn escapes_attribute_quotes() {
        let spec = QuerySpec::tag("td").attr("data-value", "say \"hi\"");
        assert_eq!(spec.to_css(), r#"td[data-value="say \"hi\""]"#);
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn apostrophe_values_compile() {
        let query = QuerySpec::tag("td")
            .attr("data-value", "REACH (SVHC's)")
            .compile()
            .unwrap();
        let html = Html::parse_document(
            r#"<table><tr><td data-value="REACH (SVHC's)">Compliant</td></tr></table>"#,
        );
        assert!(html.find_first(&query).is_some());
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let err = QuerySpec::tag("div").class("1bad").compile().unwrap_err();
        assert!(err.to_string().contains("div.1bad"));
    }

    #[test]
    fn element_query_searches_subtree() {
        let html = Html::parse_document(
            r#"<div id="a"><span class="x">one</span></div><div id="b"><span class="x">two</span></div>"#,
        );
        let div_b = QuerySpec::tag("div").id("b").compile().unwrap();
        let span = QuerySpec::tag("span").class("x").compile().unwrap();

        assert_eq!(html.find_all(&span).len(), 2);

        let b = html.find_first(&div_b).unwrap();
        let found = b.find_all(&span);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text().collect::<String>(), "two");
    }

    #[test]
    fn renders_descendant_chain() {
        let spec = QuerySpec::tag("tr")
            .inside(QuerySpec::tag("tbody"))
            .inside(QuerySpec::tag("table").class("envirnonmental-table"));
        assert_eq!(spec.to_css(), "table.envirnonmental-table tbody tr");
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn nested_lookup_outlives_intermediate_element() {
        let html = Html::parse_document(
            r#"<div id="a"><ul><li>first</li></ul></div>"#,
        );
        let div = QuerySpec::tag("div").compile().unwrap();
        let ul = QuerySpec::tag("ul").compile().unwrap();
        let li = QuerySpec::tag("li").compile().unwrap();

        let item = html
            .find_first(&div)
            .and_then(|d| d.find_first(&ul))
            .and_then(|list| list.find_first(&li));
        assert_eq!(item.unwrap().text().collect::<String>(), "first");
    }
}
