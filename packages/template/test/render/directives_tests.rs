/**
 * Directive Tests
 *
 * `value`, `if` and `if-not` through the full render pipeline
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{render_keep, render_strip, squash};
    use attr_template::{render, render_json, Renderer, RenderOptions, TemplateError};
    use indoc::indoc;
    use serde_json::json;

    mod value {
        use super::*;

        #[test]
        fn should_replace_text_with_resolved_value() {
            let html = r#"<h1 value="user.name">placeholder</h1>"#;
            assert_eq!(
                render_strip(html, &json!({"user": {"name": "Ann"}})),
                "<h1>Ann</h1>"
            );
        }

        #[test]
        fn should_keep_text_when_path_is_unresolved() {
            let html = r#"<h1 value="user.name">placeholder</h1>"#;
            assert_eq!(render_strip(html, &json!({})), "<h1>placeholder</h1>");
            assert_eq!(render(html, &json!({})), html);
        }

        #[test]
        fn should_replace_child_elements() {
            let html = r#"<p value="msg">old <b>bold</b></p>"#;
            assert_eq!(render_strip(html, &json!({"msg": "new"})), "<p>new</p>");
        }

        #[test]
        fn should_escape_substituted_text() {
            let html = r#"<p value="msg"></p>"#;
            assert_eq!(
                render_strip(html, &json!({"msg": "<script>x</script> & y"})),
                "<p>&lt;script&gt;x&lt;/script&gt; &amp; y</p>"
            );
        }

        #[test]
        fn should_format_non_string_values() {
            let html = indoc! {r#"
                <span value="n"></span>
                <span value="f"></span>
                <span value="b"></span>
                <span value="list"></span>
                <span value="nil">gone</span>
            "#};
            let data = json!({"n": 42, "f": 2.5, "b": true, "list": [1, 2], "nil": null});
            assert_eq!(
                render_strip(html, &data),
                "<span>42</span><span>2.5</span><span>true</span><span>1,2</span><span></span>"
            );
        }

        #[test]
        fn should_resolve_global_prefix() {
            let html = r#"<p value="global.site.title"></p>"#;
            assert_eq!(
                render_strip(html, &json!({"site": {"title": "Home"}})),
                "<p>Home</p>"
            );
        }

        #[test]
        fn should_read_array_length() {
            let html = r#"<p value="items.length"></p>"#;
            assert_eq!(render_strip(html, &json!({"items": [1, 2, 3]})), "<p>3</p>");
        }

        #[test]
        fn should_reach_nested_elements() {
            let html = indoc! {r#"
                <div>
                  <section>
                    <p value="a.b"></p>
                  </section>
                </div>
            "#};
            assert_eq!(
                render_strip(html, &json!({"a": {"b": "deep"}})),
                "<div><section><p>deep</p></section></div>"
            );
        }
    }

    mod conditionals {
        use super::*;

        #[test]
        fn should_remove_element_when_if_is_false() {
            let html = r#"<div><p if="user.isAdmin">admin</p><p>all</p></div>"#;
            assert_eq!(
                render_strip(html, &json!({"user": {"isAdmin": false}})),
                "<div><p>all</p></div>"
            );
            assert_eq!(
                render_strip(html, &json!({"user": {"isAdmin": true}})),
                "<div><p>admin</p><p>all</p></div>"
            );
        }

        #[test]
        fn should_remove_element_when_if_not_is_true() {
            let html = r#"<p if-not="loggedIn">Please sign in</p>"#;
            assert_eq!(render_strip(html, &json!({"loggedIn": true})), "");
            assert_eq!(
                render_strip(html, &json!({"loggedIn": false})),
                "<p>Please sign in</p>"
            );
        }

        #[test]
        fn should_treat_missing_data_as_false() {
            let html = r#"<p if="flags.beta">beta</p><p if-not="flags.beta">stable</p>"#;
            assert_eq!(render_strip(html, &json!({})), "<p>stable</p>");
        }

        #[test]
        fn should_never_show_both_branches() {
            let html = r#"<i if="E">yes</i><i if-not="E">no</i>"#;
            for value in [json!(true), json!(false), json!(0), json!("x"), json!(null)] {
                let out = render_strip(html, &json!({"E": value}));
                assert!(
                    out == "<i>yes</i>" || out == "<i>no</i>",
                    "unexpected output {out}"
                );
            }
        }

        #[test]
        fn should_remove_whole_subtree() {
            let html = r#"<div if="false"><p value="x">a</p><span>b</span></div><em>c</em>"#;
            assert_eq!(render_strip(html, &json!({"x": "y"})), "<em>c</em>");
        }

        #[test]
        fn should_hide_on_invalid_expression() {
            let html = r#"<p if="a ===">x</p><p if-not="a ===">y</p>"#;
            assert_eq!(render_strip(html, &json!({"a": 1})), "<p>y</p>");
        }

        #[test]
        fn should_let_if_not_decide_when_both_present() {
            let html = r#"<p if="a" if-not="a">x</p>"#;
            assert_eq!(render_strip(html, &json!({"a": true})), "");
            assert_eq!(render_strip(html, &json!({"a": false})), "<p>x</p>");
        }

        #[test]
        fn should_show_element_with_stale_marker_when_true() {
            let html = r#"<p class="remove-it" if="ok">x</p>"#;
            assert_eq!(render_keep(html, &json!({"ok": true})), r#"<p if="ok">x</p>"#);
        }

        #[test]
        fn should_evaluate_comparisons() {
            let html = indoc! {r#"
                <p if="cart.total >= 100 && !cart.coupon">free shipping</p>
                <p if="cart.items.length === 0">empty</p>
                <p if="cart.status == 'open' ? true : false">open</p>
            "#};
            let data = json!({"cart": {"total": 120, "coupon": null, "items": [1], "status": "open"}});
            assert_eq!(render_strip(html, &data), "<p>free shipping</p><p>open</p>");
        }
    }

    mod options {
        use super::*;

        #[test]
        fn should_use_attribute_prefix() {
            let renderer = Renderer::new(
                RenderOptions::new()
                    .with_attribute_prefix("js-")
                    .with_remove_js_attributes(true),
            );
            let html = r#"<p js-value="name">x</p><p if="false" js-if="true">y</p>"#;
            assert_eq!(
                squash(&renderer.render(html, &json!({"name": "Ann"}))),
                r#"<p>Ann</p><p if="false">y</p>"#
            );
        }

        #[test]
        fn should_use_custom_hidden_class() {
            let options = RenderOptions::new().with_hidden_class("d-none");
            let renderer = Renderer::new(options);
            assert_eq!(renderer.names().hidden_class, "d-none");
            let html = r#"<p if="a">x</p><p if="b">y</p>"#;
            assert_eq!(
                renderer.render(html, &json!({"a": true, "b": false})),
                r#"<p if="a">x</p>"#
            );
        }

        #[test]
        fn should_render_json_data() {
            let options = RenderOptions::new().with_remove_js_attributes(true);
            assert_eq!(
                render_json(r#"<b value="n"></b>"#, r#"{"n": 7}"#, &options).unwrap(),
                "<b>7</b>"
            );
            assert!(matches!(
                render_json("<b></b>", "[", &options),
                Err(TemplateError::InvalidData(_))
            ));
        }
    }
}
