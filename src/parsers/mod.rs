pub mod classifier;
pub mod datasheet;
pub mod environmental;
pub mod query;

pub use classifier::classify;
pub use datasheet::extract_datasheet_link;
pub use environmental::{extract, find_environmental_row};

use scraper::{ElementRef, Html};

/// Parse a full page.
pub fn parse_page(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Parse a table fragment such as the outer HTML of a single `<tr>`.
///
/// HTML5 fragment parsing drops table tags outside a table, so bare rows and
/// cells are wrapped in the smallest table context that keeps them.
pub fn parse_row(markup: &str) -> Html {
    let head: String = markup.trim_start().chars().take(6).collect::<String>().to_ascii_lowercase();

    let wrapped = if head.starts_with("<tbody") || head.starts_with("<thead") || head.starts_with("<tfoot") {
        format!("<table>{}</table>", markup)
    } else if head.starts_with("<tr") {
        format!("<table><tbody>{}</tbody></table>", markup)
    } else if head.starts_with("<td") || head.starts_with("<th") {
        format!("<table><tbody><tr>{}</tr></tbody></table>", markup)
    } else {
        markup.to_string()
    };

    Html::parse_fragment(&wrapped)
}

/// Visible text with every text node trimmed and blank nodes dropped.
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<String>()
}

/// All text of the element, trimmed once at the ends.
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed copy of `text`, or `None` when nothing is left.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn cells(html: &Html) -> usize {
        let td = Selector::parse("td").unwrap();
        html.select(&td).count()
    }

    #[test]
    fn bare_row_keeps_cells() {
        let html = parse_row(r#"<tr><td data-value="Pb-Free">Yes</td><td>No</td></tr>"#);
        assert_eq!(cells(&html), 2);
    }

    #[test]
    fn bare_cell_keeps_cell() {
        let html = parse_row(r#"  <td data-value="Pb-Free">Yes</td>"#);
        assert_eq!(cells(&html), 1);
    }

    #[test]
    fn full_table_is_untouched() {
        let html = parse_row("<table><tbody><tr><td>a</td></tr></tbody></table>");
        assert_eq!(cells(&html), 1);
    }

    #[test]
    fn stripped_text_joins_trimmed_nodes() {
        let html = parse_page("<div><span> RoHS </span>\n  <b> 2015 </b></div>");
        let div = Selector::parse("div").unwrap();
        let element = html.select(&div).next().unwrap();

        assert_eq!(stripped_text(&element), "RoHS2015");
        assert_eq!(trimmed_text(&element), "RoHS \n   2015");
    }

    #[test]
    fn non_empty_filters_blank() {
        assert_eq!(non_empty("  x "), Some("x".to_string()));
        assert_eq!(non_empty(" \t"), None);
    }
}
