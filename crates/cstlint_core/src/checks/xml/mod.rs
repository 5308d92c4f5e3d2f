//! Checks for XML documents.

mod attribute_name;
mod attribute_order;
mod empty_content;
mod illegal_token;
mod illegal_token_text;
mod indentation;

pub use attribute_name::{AttributeNameXmlCheck, AttributeNameXmlOptions};
pub use attribute_order::{AttributeOrderXmlCheck, AttributeOrderXmlOptions};
pub use empty_content::EmptyContentXmlCheck;
pub use illegal_token::IllegalTokenXmlCheck;
pub use illegal_token_text::{IllegalTokenTextXmlCheck, IllegalTokenTextXmlOptions};
pub use indentation::{IndentationXmlCheck, IndentationXmlOptions};

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use cstlint_ast::{AstArena, XmlToken};
    use cstlint_parser::{Parser, XmlParser};

    use crate::check::{Check, CheckSettings};
    use crate::violation::Violation;
    use crate::walker::Walker;

    /// Runs `check` over `source`, registered for `tokens`.
    pub(crate) fn run_violations(
        check: impl Check<XmlToken> + 'static,
        tokens: &[&str],
        source: &str,
    ) -> Vec<Violation> {
        let arena = AstArena::new();
        let tree = XmlParser::new().parse(&arena, source).unwrap();
        let mut walker = Walker::new(4);
        let settings = CheckSettings {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..CheckSettings::default()
        };
        walker.register(Box::new(check), settings).unwrap();
        walker.walk(Path::new("test.xml"), source, &tree)
    }

    /// Violations rendered as `line:column [args]`.
    pub(crate) fn run_with_tokens(
        check: impl Check<XmlToken> + 'static,
        tokens: &[&str],
        source: &str,
    ) -> Vec<String> {
        run_violations(check, tokens, source)
            .iter()
            .map(|v| format!("{}:{} [{}]", v.line, v.column, v.args.join(", ")))
            .collect()
    }

    pub(crate) fn run(check: impl Check<XmlToken> + 'static, source: &str) -> Vec<String> {
        run_with_tokens(check, &[], source)
    }
}
