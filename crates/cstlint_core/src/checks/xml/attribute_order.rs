use cstlint_ast::{NodeRef, XmlToken};
use regex::Regex;
use serde::Deserialize;

use crate::check::{Check, CheckContext};
use crate::checks::compile_pattern;
use crate::error::LinterError;

pub const MSG_KEY: &str = "attribute.order";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AttributeOrderXmlOptions {
    /// Pattern the whole element name must match. The XML declaration is
    /// named `PROLOG`.
    pub element: String,
    /// Attribute names in their expected order. Attributes not listed may
    /// appear anywhere.
    pub attribute_order: Vec<String>,
}

impl Default for AttributeOrderXmlOptions {
    fn default() -> Self {
        Self {
            element: "$^".to_string(),
            attribute_order: Vec::new(),
        }
    }
}

/// Enforces the order of attributes on matching elements.
#[derive(Debug)]
pub struct AttributeOrderXmlCheck {
    element: Regex,
    order: Vec<String>,
    rendered_order: String,
}

impl AttributeOrderXmlCheck {
    pub const NAME: &'static str = "AttributeOrderXml";

    pub fn new(options: AttributeOrderXmlOptions) -> Result<Self, LinterError> {
        let anchored = format!("^(?:{})$", options.element);
        Ok(Self {
            element: compile_pattern(Self::NAME, &anchored, false)?,
            rendered_order: format!("[{}]", options.attribute_order.join(", ")),
            order: options.attribute_order,
        })
    }

    fn element_name<'t>(node: NodeRef<'t, XmlToken>) -> &'t str {
        match node.kind() {
            XmlToken::Prolog => node.text(),
            _ => node.find_first(XmlToken::Name).map(|n| n.text()).unwrap_or_default(),
        }
    }

    fn validate_attributes(&self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        let mut max_index = 0;
        for attribute in node.children().filter(|c| c.kind() == XmlToken::Attribute) {
            let Some(name) = attribute.find_first(XmlToken::Name) else {
                continue;
            };
            let Some(index) = self.order.iter().position(|o| o == name.text()) else {
                continue;
            };
            if index < max_index {
                ctx.log(attribute, MSG_KEY, [self.rendered_order.as_str()]);
            } else {
                max_index = index;
            }
        }
    }
}

impl Check<XmlToken> for AttributeOrderXmlCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_tokens(&self) -> &'static [XmlToken] {
        &[XmlToken::Prolog, XmlToken::StartElement, XmlToken::EmptyElement]
    }

    fn acceptable_tokens(&self) -> &'static [XmlToken] {
        self.default_tokens()
    }

    fn required_tokens(&self) -> &'static [XmlToken] {
        self.default_tokens()
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_, '_>, node: NodeRef<'_, XmlToken>) {
        if self.element.is_match(Self::element_name(node)) {
            self.validate_attributes(ctx, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::checks::xml::tests::run;

    fn check(element: &str, order: &[&str]) -> AttributeOrderXmlCheck {
        AttributeOrderXmlCheck::new(AttributeOrderXmlOptions {
            element: element.to_string(),
            attribute_order: order.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_matches_nothing_by_default() {
        let check = AttributeOrderXmlCheck::new(AttributeOrderXmlOptions::default()).unwrap();
        assert!(run(check, "<a z=\"1\" y=\"2\"/>").is_empty());
    }

    #[test]
    fn test_out_of_order() {
        let source = "<dependency scope=\"test\" other=\"x\" id=\"a\" version=\"1\"/>\n";
        assert_eq!(
            run(check("dependency", &["id", "version", "scope"]), source),
            vec!["1:36 [[id, version, scope]]", "1:43 [[id, version, scope]]"]
        );
    }

    #[test]
    fn test_element_pattern_must_match_whole_name() {
        let source = "<dependencies b=\"1\" a=\"2\"></dependencies>\n";
        assert!(run(check("dependency", &["a", "b"]), source).is_empty());
        assert_eq!(
            run(check("dependenc.*", &["a", "b"]), source),
            vec!["1:21 [[a, b]]"]
        );
    }

    #[test]
    fn test_prolog() {
        let source = "<?xml encoding=\"UTF-8\" version=\"1.0\"?>\n<a/>\n";
        assert_eq!(
            run(check("PROLOG", &["version", "encoding"]), source),
            vec!["1:24 [[version, encoding]]"]
        );
    }
}
