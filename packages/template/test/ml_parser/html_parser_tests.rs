/**
 * HTML Parser Tests
 *
 * Tree construction on top of the html5gum tokenizer
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{humanize_dom, row};
    use attr_template::ml_parser::{HtmlParser, ParseTreeResult};

    fn parse(html: &str) -> ParseTreeResult {
        HtmlParser::new().parse(html)
    }

    fn humanize(html: &str) -> Vec<(String, String, usize)> {
        let result = parse(html);
        assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
        humanize_dom(&result.document)
    }

    fn error_messages(html: &str) -> Vec<String> {
        parse(html).errors.into_iter().map(|e| e.msg).collect()
    }

    mod text_nodes {
        use super::*;

        #[test]
        fn should_parse_root_level_text_nodes() {
            assert_eq!(humanize("a"), vec![row("text", "a", 0)]);
        }

        #[test]
        fn should_parse_text_nodes_inside_regular_elements() {
            assert_eq!(
                humanize("<div>a</div>"),
                vec![row("element", "div", 0), row("text", "a", 1)]
            );
        }

        #[test]
        fn should_decode_entities() {
            assert_eq!(
                humanize("<p>a &amp; b</p>"),
                vec![row("element", "p", 0), row("text", "a & b", 1)]
            );
        }

        #[test]
        fn should_drop_the_first_lf_in_pre() {
            assert_eq!(
                humanize("<pre>\nfoo</pre>"),
                vec![row("element", "pre", 0), row("text", "foo", 1)]
            );
        }

        #[test]
        fn should_keep_script_content_raw() {
            assert_eq!(
                humanize("<script>if (a < b && c) {}</script>"),
                vec![
                    row("element", "script", 0),
                    row("text", "if (a < b && c) {}", 1)
                ]
            );
        }

        #[test]
        fn should_keep_markup_in_textarea_as_text() {
            assert_eq!(
                humanize("<textarea><b>x</b></textarea>"),
                vec![row("element", "textarea", 0), row("text", "<b>x</b>", 1)]
            );
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn should_parse_nested_elements() {
            assert_eq!(
                humanize("<div><span>a</span><b>c</b></div>"),
                vec![
                    row("element", "div", 0),
                    row("element", "span", 1),
                    row("text", "a", 2),
                    row("element", "b", 1),
                    row("text", "c", 2),
                ]
            );
        }

        #[test]
        fn should_close_void_elements() {
            assert_eq!(
                humanize("<div><br><img src=\"a.png\">x</div>"),
                vec![
                    row("element", "div", 0),
                    row("element", "br", 1),
                    row("element", "img", 1),
                    row("text", "x", 1),
                ]
            );
        }

        #[test]
        fn should_close_self_closing_elements() {
            assert_eq!(
                humanize("<div/><span>a</span>"),
                vec![
                    row("element", "div", 0),
                    row("element", "span", 0),
                    row("text", "a", 1),
                ]
            );
        }

        #[test]
        fn should_lowercase_tag_names() {
            assert_eq!(
                humanize("<DIV>a</DIV>"),
                vec![row("element", "div", 0), row("text", "a", 1)]
            );
        }

        #[test]
        fn should_keep_attributes() {
            let result = parse(r#"<li each="u in users" class="row">x</li>"#);
            let doc = &result.document;
            let li = doc.element_children(doc.root())[0];
            let element = doc.element(li).unwrap();
            assert_eq!(element.attr("each"), Some("u in users"));
            assert_eq!(element.attr("class"), Some("row"));
            assert!(element.has_class("row"));
        }
    }

    mod implied_end_tags {
        use super::*;

        #[test]
        fn should_close_p_by_p() {
            assert_eq!(
                humanize("<p>a<p>b"),
                vec![
                    row("element", "p", 0),
                    row("text", "a", 1),
                    row("element", "p", 0),
                    row("text", "b", 1),
                ]
            );
        }

        #[test]
        fn should_close_li_by_li() {
            assert_eq!(
                humanize("<ul><li>1<li>2</ul>"),
                vec![
                    row("element", "ul", 0),
                    row("element", "li", 1),
                    row("text", "1", 2),
                    row("element", "li", 1),
                    row("text", "2", 2),
                ]
            );
        }

        #[test]
        fn should_close_table_cells_and_rows() {
            assert_eq!(
                humanize("<table><tr><td>1<td>2<tr><td>3</table>"),
                vec![
                    row("element", "table", 0),
                    row("element", "tr", 1),
                    row("element", "td", 2),
                    row("text", "1", 3),
                    row("element", "td", 2),
                    row("text", "2", 3),
                    row("element", "tr", 1),
                    row("element", "td", 2),
                    row("text", "3", 3),
                ]
            );
        }
    }

    mod other_nodes {
        use super::*;

        #[test]
        fn should_parse_comments() {
            assert_eq!(
                humanize("<div><!-- note --></div>"),
                vec![row("element", "div", 0), row("comment", " note ", 1)]
            );
        }

        #[test]
        fn should_parse_doctype() {
            assert_eq!(
                humanize("<!DOCTYPE html><p>x</p>"),
                vec![
                    row("doctype", "html", 0),
                    row("element", "p", 0),
                    row("text", "x", 1),
                ]
            );
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_stray_end_tags() {
            let messages = error_messages("<div></span></div>");
            assert_eq!(messages.len(), 1);
            assert!(messages[0].starts_with("Unexpected closing tag \"span\""));
        }

        #[test]
        fn should_report_end_tags_of_void_elements() {
            assert_eq!(
                error_messages("<br></br>"),
                vec!["Void elements do not have end tags \"br\"".to_string()]
            );
        }

        #[test]
        fn should_report_unclosed_elements() {
            assert_eq!(
                error_messages("<div><span>a</div>"),
                vec!["Unclosed element \"span\"".to_string()]
            );
        }

        #[test]
        fn should_not_report_elements_closed_by_parent() {
            assert!(error_messages("<ul><li>a</ul>").is_empty());
        }

        #[test]
        fn should_recover_from_errors() {
            let result = parse("<div></span>a</div>");
            assert_eq!(
                humanize_dom(&result.document),
                vec![row("element", "div", 0), row("text", "a", 1)]
            );
        }
    }
}
