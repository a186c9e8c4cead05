use crate::error::LoanPlannerError;
use crate::LoanPlannerResult;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute `{{name}}` placeholders from `vars`.
///
/// Every placeholder in `template` must have a value; an unknown name is an
/// error rather than being left in the output.
pub fn render(template: &str, vars: &[(&str, &str)]) -> LoanPlannerResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after = &rest[open + OPEN.len()..];
        let close = after.find(CLOSE).ok_or_else(|| {
            LoanPlannerError::invalid("template", "unterminated placeholder")
        })?;

        let name = after[..close].trim();
        let value = vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                LoanPlannerError::invalid("template", format!("no value for placeholder '{name}'"))
            })?;
        out.push_str(value);
        rest = &after[close + CLOSE.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all() {
        let out = render("a {{x}} b {{ y }} {{x}}", &[("x", "1"), ("y", "2")]).unwrap();
        assert_eq!(out, "a 1 b 2 1");
    }

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render("plain ${js}", &[]).unwrap(), "plain ${js}");
    }

    #[test]
    fn test_render_unknown_placeholder() {
        assert!(render("{{missing}}", &[("x", "1")]).is_err());
    }

    #[test]
    fn test_render_unterminated() {
        assert!(render("oops {{x", &[("x", "1")]).is_err());
    }
}
