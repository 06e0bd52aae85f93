/**
 * Finalize Tests
 *
 * Output of the two `remove_js_attributes` modes
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{render_keep, render_strip};
    use attr_template::directives::DirectiveNames;
    use attr_template::finalizer::finalize;
    use attr_template::ml_parser::{serialize, HtmlParser};
    use indoc::indoc;
    use serde_json::json;

    mod keep_attributes {
        use super::*;

        #[test]
        fn should_remove_only_hidden_conditional_elements() {
            let html = r#"<p if="a">x</p><p if-not="a">y</p><p value="v">z</p>"#;
            assert_eq!(
                render_keep(html, &json!({"a": true, "v": "V"})),
                r#"<p if="a">x</p><p value="v">V</p>"#
            );
        }

        #[test]
        fn should_keep_marker_on_elements_without_conditionals() {
            let html = r#"<p class="remove-it" value="v">x</p>"#;
            assert_eq!(
                render_keep(html, &json!({"v": "V"})),
                r#"<p class="remove-it" value="v">V</p>"#
            );
        }
    }

    mod remove_attributes {
        use super::*;

        #[test]
        fn should_strip_every_directive_attribute() {
            let html = r#"<div id="d" if="a" value="v" data-x="1">x</div>"#;
            assert_eq!(
                render_strip(html, &json!({"a": true, "v": "V"})),
                r#"<div data-x="1" id="d">V</div>"#
            );
        }

        #[test]
        fn should_remove_marked_element_carrying_any_directive() {
            let html = r#"<p class="remove-it" value="v">x</p><p class="remove-it">y</p>"#;
            assert_eq!(
                render_strip(html, &json!({"v": "V"})),
                r#"<p class="remove-it">y</p>"#
            );
        }

        #[test]
        fn should_keep_other_classes() {
            let html = r#"<p class="lead" if="a">x</p>"#;
            assert_eq!(
                render_strip(html, &json!({"a": true})),
                r#"<p class="lead">x</p>"#
            );
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn should_agree_on_directive_free_content() {
            let html = indoc! {r#"
                <!DOCTYPE html>
                <html>
                  <head><title>T &amp; U</title></head>
                  <body>
                    <p class="lead">Hello <b>world</b></p>
                    <br>
                    <!-- note -->
                  </body>
                </html>
            "#};
            let data = json!({"unused": true});
            assert_eq!(render_keep(html, &data), render_strip(html, &data));
        }

        #[test]
        fn should_report_removed_count() {
            let names = DirectiveNames::default();
            let mut document = HtmlParser::new()
                .parse(r#"<p if="a" class="remove-it"><i if="b" class="remove-it"></i></p><p if="c">x</p>"#)
                .document;
            assert_eq!(finalize(&mut document, &names, false), 2);
            assert_eq!(serialize(&document), r#"<p if="c">x</p>"#);
        }
    }
}
