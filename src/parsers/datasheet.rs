use once_cell::sync::Lazy;

use super::query::{DocumentQuery, Query, QuerySpec};
use super::{non_empty, parse_page};

static DATASHEET_LINK: Lazy<Query> = Lazy::new(|| {
    QuerySpec::tag("a")
        .class("datasheet-link")
        .compile()
        .expect("Invalid datasheet link selector")
});

/// Datasheet URL from a product page, independent of the environmental table.
pub fn extract_datasheet_link(page_markup: &str) -> Option<String> {
    parse_page(page_markup)
        .find_first(&DATASHEET_LINK)
        .and_then(|a| a.value().attr("href").and_then(non_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_href() {
        let page = r#"<div><a class="datasheet-link" href="/ds/123.pdf">Datasheet</a></div>"#;
        assert_eq!(extract_datasheet_link(page), Some("/ds/123.pdf".to_string()));
    }

    #[test]
    fn href_is_trimmed() {
        let page = r#"<a class="side-link datasheet-link" href=" /ds/123.pdf
        ">Datasheet</a>"#;
        assert_eq!(extract_datasheet_link(page), Some("/ds/123.pdf".to_string()));
    }

    #[test]
    fn first_anchor_wins() {
        let page = r#"
            <a class="datasheet-link" href="/ds/first.pdf">One</a>
            <a class="datasheet-link" href="/ds/second.pdf">Two</a>"#;
        assert_eq!(extract_datasheet_link(page), Some("/ds/first.pdf".to_string()));
    }

    #[test]
    fn missing_anchor_or_href() {
        assert_eq!(extract_datasheet_link("<a href=\"/ds/123.pdf\">Datasheet</a>"), None);
        assert_eq!(extract_datasheet_link("<a class=\"datasheet-link\">Datasheet</a>"), None);
        assert_eq!(extract_datasheet_link("<span class=\"datasheet-link\" href=\"/x\"></span>"), None);
        assert_eq!(extract_datasheet_link(""), None);
    }
}
