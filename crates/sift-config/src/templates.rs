//! Configuration templates for `sift init`.
//!
//! Templates are stored as valid TOML and handed out commented-out, so a fresh file
//! documents every setting without changing behavior.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every non-empty, non-comment line with `# `.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UnknownFields, parse::parse_config};

    #[test]
    fn templates_parse_as_valid_toml() {
        let local = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(local.root, Some(true));
        let sql = local.sql.unwrap();
        assert_eq!(sql.unknown_fields, Some(UnknownFields::Passthrough));

        let global = parse_config(GLOBAL_TEMPLATE).unwrap();
        assert_eq!(
            global.sql.unwrap().implicit_columns,
            Some(vec!["Body".to_string()])
        );
    }

    #[test]
    fn commented_templates_are_inert() {
        for template in [local_template(), global_template()] {
            let parsed = parse_config(&template).unwrap();
            assert!(parsed.root.is_none());
            assert!(parsed.sql.is_none());
        }
    }

    #[test]
    fn comment_template_keeps_comments_and_blanks() {
        let input = "# note\n[sql]\n\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# note\n# [sql]\n\n# key = \"value\"\n"
        );
    }
}
