// src/prompts/template.rs
use std::collections::HashMap;

/// Substitutes `{{name}}` placeholders in prompt templates
pub struct TemplateProcessor;

impl TemplateProcessor {
    /// Replace every `{{key}}` with its value in one left-to-right pass.
    ///
    /// Substituted values are copied verbatim and never scanned again, and
    /// placeholders without a value are kept as written.
    pub fn process_variables(content: &str, vars: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            match after_open.find("}}") {
                Some(end) => {
                    let key = after_open[..end].trim();
                    match vars.get(key) {
                        Some(value) => result.push_str(value),
                        None => result.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_substitutes_placeholders() {
        let out = TemplateProcessor::process_variables(
            "Должность: {{job_title}}\nГород: {{ city }}",
            &vars(&[("job_title", "Сварщик"), ("city", "Бремен")]),
        );
        assert_eq!(out, "Должность: Сварщик\nГород: Бремен");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = TemplateProcessor::process_variables(
            "{{a}} / {{b}}",
            &vars(&[("a", "{{b}}"), ("b", "x")]),
        );
        assert_eq!(out, "{{b}} / x");
    }

    #[test]
    fn test_unknown_and_unclosed_placeholders_are_kept() {
        let out = TemplateProcessor::process_variables("{{missing}} and {{open", &vars(&[]));
        assert_eq!(out, "{{missing}} and {{open");
    }
}
