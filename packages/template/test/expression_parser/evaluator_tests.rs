/**
 * Evaluator Tests
 *
 * Condition expressions evaluated against data scopes
 */

#[cfg(test)]
mod tests {
    use attr_template::expression_parser::{evaluate_condition, evaluate_expression, Parser};
    use attr_template::scope::Scope;
    use attr_template::TemplateError;
    use serde_json::{json, Value};

    fn eval(expression: &str, data: &Value) -> bool {
        evaluate_condition(expression, &Scope::root(data), data)
    }

    fn check(expression: &str, data: &Value) -> Result<bool, TemplateError> {
        evaluate_expression(expression, &Scope::root(data), data)
    }

    mod paths {
        use super::*;

        #[test]
        fn should_read_nested_paths() {
            let data = json!({"user": {"isAdmin": true, "profile": {"age": 30}}});
            assert!(eval("user.isAdmin", &data));
            assert!(eval("user.profile.age > 18", &data));
            assert!(!eval("user.profile.age < 18", &data));
        }

        #[test]
        fn should_treat_unresolved_paths_as_false() {
            let data = json!({"user": {}});
            assert!(!eval("user.isAdmin", &data));
            assert!(!eval("missing.deeper.path", &data));
            assert!(eval("!missing", &data));
            assert!(eval("missing === false", &data));
        }

        #[test]
        fn should_not_look_up_keywords() {
            let data = json!({"true": false, "null": 1, "undefined": 1});
            assert!(eval("true", &data));
            assert!(!eval("null", &data));
            assert!(!eval("undefined", &data));
        }

        #[test]
        fn should_not_substitute_inside_strings() {
            let data = json!({"role": "admin", "admin": "nope"});
            assert!(eval("role == 'admin'", &data));
        }

        #[test]
        fn should_resolve_global_paths() {
            let data = json!({"settings": {"beta": true}, "user": "root"});
            let item = json!("item");
            let root = Scope::root(&data);
            let scope = root.bind("user", &item);
            assert!(evaluate_condition("global.settings.beta", &scope, &data));
            assert!(evaluate_condition("global.user == 'root'", &scope, &data));
            assert!(evaluate_condition("user == 'item'", &scope, &data));
        }

        #[test]
        fn should_read_array_length() {
            let data = json!({"items": [1, 2, 3], "empty": []});
            assert!(eval("items.length", &data));
            assert!(eval("items.length === 3", &data));
            assert!(!eval("empty.length", &data));
            assert!(eval("empty.length === 0", &data));
        }

        #[test]
        fn should_read_keyed_and_member_access() {
            let data = json!({"users": [{"name": "Ann"}, {"name": "Bob"}], "key": "name"});
            assert!(eval("users[1].name == 'Bob'", &data));
            assert!(eval("users[0][key] === 'Ann'", &data));
            assert!(eval("users[5] === undefined", &data));
        }
    }

    mod operators {
        use super::*;

        #[test]
        fn should_follow_truthiness() {
            let data = json!({"zero": 0, "empty": "", "text": "x", "list": [], "obj": {}, "nil": null});
            assert!(!eval("zero", &data));
            assert!(!eval("empty", &data));
            assert!(eval("text", &data));
            assert!(eval("list", &data));
            assert!(eval("obj", &data));
            assert!(!eval("nil", &data));
        }

        #[test]
        fn should_compare_loosely_and_strictly() {
            let data = json!({"n": 1, "s": "1"});
            assert!(eval("n == s", &data));
            assert!(!eval("n === s", &data));
            assert!(eval("n !== s", &data));
            assert!(eval("0 == ''", &data));
            assert!(!eval("null == 0", &data));
        }

        #[test]
        fn should_compare_strings_lexicographically() {
            let data = json!({});
            assert!(eval("'apple' < 'banana'", &data));
            assert!(eval("'10' < '9'", &data));
            assert!(!eval("10 < 9", &data));
        }

        #[test]
        fn should_apply_precedence() {
            let data = json!({"a": true, "b": false, "c": false});
            assert!(eval("a || b && c", &data));
            assert!(!eval("(a || b) && c", &data));
            assert!(eval("1 + 2 * 3 === 7", &data));
            assert!(eval("2 ** 3 ** 2 === 512", &data));
            assert!(eval("-2 ** 2 === 4", &data));
            assert!(eval("7 % 4 === 3", &data));
        }

        #[test]
        fn should_concatenate_strings() {
            let data = json!({"first": "A", "n": 1});
            assert!(eval("first + n === 'A1'", &data));
            assert!(eval("n + 1 === 2", &data));
        }

        #[test]
        fn should_evaluate_ternary_and_nullish() {
            let data = json!({"flag": true, "nil": null});
            assert!(eval("flag ? 1 : 0", &data));
            assert!(!eval("flag ? 0 : 1", &data));
            assert!(eval("nil ?? true", &data));
            assert!(!eval("flag ? false : true ? true : true", &data));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_parse_errors() {
            let data = json!({});
            assert!(matches!(check("a &&", &data), Err(TemplateError::Parser { .. })));
            assert!(matches!(check("a = 1", &data), Err(TemplateError::Lexer { .. })));
        }

        #[test]
        fn should_report_reads_on_undefined() {
            let data = json!({});
            let error = check("(undefined).x", &data).unwrap_err();
            assert!(matches!(error, TemplateError::Evaluation { .. }));
            assert!(error.to_string().contains("Cannot read properties of undefined"));
        }

        #[test]
        fn should_treat_failures_as_false() {
            let data = json!({"a": true});
            assert!(!eval("a &&", &data));
            assert!(!eval("(null)[0]", &data));
        }

        #[test]
        fn should_include_expression_in_error_message() {
            let error = Parser::new().parse("a b").unwrap_err();
            assert_eq!(
                error.to_string(),
                "Parser Error: Unexpected token 'b' at column 2 in [a b]"
            );
        }
    }
}
