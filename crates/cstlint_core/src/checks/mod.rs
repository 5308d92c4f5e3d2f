//! Built-in checks and the factory that creates them by name.

pub mod indentation;
pub mod property;
pub mod xml;

use cstlint_ast::{PropertyToken, TokenKind, XmlToken};
use regex::{Regex, RegexBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::check::Check;
use crate::error::LinterError;
use crate::format::SourceFormat;

use self::property::{
    DuplicateKeyPropertyCheck, IllegalAssignmentTextPropertyCheck, IllegalCommentTextPropertyCheck,
    IllegalTokenPropertyCheck, IllegalTokenTextPropertyCheck, IndentationPropertyCheck,
    KeyNamePropertyCheck, MissingAssignmentPropertyCheck, OrderedKeyPropertyCheck,
};
use self::xml::{
    AttributeNameXmlCheck, AttributeOrderXmlCheck, EmptyContentXmlCheck, IllegalTokenTextXmlCheck,
    IllegalTokenXmlCheck, IndentationXmlCheck,
};

/// Names of the checks for property files.
pub const PROPERTY_CHECKS: &[&str] = &[
    DuplicateKeyPropertyCheck::NAME,
    IllegalAssignmentTextPropertyCheck::NAME,
    IllegalCommentTextPropertyCheck::NAME,
    IllegalTokenPropertyCheck::NAME,
    IllegalTokenTextPropertyCheck::NAME,
    IndentationPropertyCheck::NAME,
    KeyNamePropertyCheck::NAME,
    MissingAssignmentPropertyCheck::NAME,
    OrderedKeyPropertyCheck::NAME,
];

/// Names of the checks for XML files.
pub const XML_CHECKS: &[&str] = &[
    AttributeNameXmlCheck::NAME,
    AttributeOrderXmlCheck::NAME,
    EmptyContentXmlCheck::NAME,
    IllegalTokenTextXmlCheck::NAME,
    IllegalTokenXmlCheck::NAME,
    IndentationXmlCheck::NAME,
];

/// The format a check of this name applies to.
pub fn format_of(name: &str) -> Option<SourceFormat> {
    if PROPERTY_CHECKS.contains(&name) {
        Some(SourceFormat::Property)
    } else if XML_CHECKS.contains(&name) {
        Some(SourceFormat::Xml)
    } else {
        None
    }
}

/// Creates the property check called `name`, configured from `options`.
pub fn create_property_check(
    name: &str,
    options: &Value,
) -> Result<Box<dyn Check<PropertyToken>>, LinterError> {
    let check: Box<dyn Check<PropertyToken>> = match name {
        DuplicateKeyPropertyCheck::NAME => {
            no_options(name, options)?;
            Box::new(DuplicateKeyPropertyCheck::new())
        }
        IllegalAssignmentTextPropertyCheck::NAME => Box::new(
            IllegalAssignmentTextPropertyCheck::new(parse_options(name, options)?)?,
        ),
        IllegalCommentTextPropertyCheck::NAME => Box::new(IllegalCommentTextPropertyCheck::new(
            parse_options(name, options)?,
        )?),
        IllegalTokenPropertyCheck::NAME => {
            no_options(name, options)?;
            Box::new(IllegalTokenPropertyCheck)
        }
        IllegalTokenTextPropertyCheck::NAME => Box::new(IllegalTokenTextPropertyCheck::new(
            parse_options(name, options)?,
        )?),
        IndentationPropertyCheck::NAME => {
            Box::new(IndentationPropertyCheck::new(parse_options(name, options)?))
        }
        KeyNamePropertyCheck::NAME => {
            Box::new(KeyNamePropertyCheck::new(parse_options(name, options)?)?)
        }
        MissingAssignmentPropertyCheck::NAME => {
            no_options(name, options)?;
            Box::new(MissingAssignmentPropertyCheck)
        }
        OrderedKeyPropertyCheck::NAME => {
            Box::new(OrderedKeyPropertyCheck::new(parse_options(name, options)?))
        }
        _ => return Err(unknown_check(name, SourceFormat::Property)),
    };
    Ok(check)
}

/// Creates the XML check called `name`, configured from `options`.
pub fn create_xml_check(name: &str, options: &Value) -> Result<Box<dyn Check<XmlToken>>, LinterError> {
    let check: Box<dyn Check<XmlToken>> = match name {
        AttributeNameXmlCheck::NAME => {
            Box::new(AttributeNameXmlCheck::new(parse_options(name, options)?)?)
        }
        AttributeOrderXmlCheck::NAME => {
            Box::new(AttributeOrderXmlCheck::new(parse_options(name, options)?)?)
        }
        EmptyContentXmlCheck::NAME => {
            no_options(name, options)?;
            Box::new(EmptyContentXmlCheck)
        }
        IllegalTokenXmlCheck::NAME => {
            no_options(name, options)?;
            Box::new(IllegalTokenXmlCheck)
        }
        IllegalTokenTextXmlCheck::NAME => {
            Box::new(IllegalTokenTextXmlCheck::new(parse_options(name, options)?)?)
        }
        IndentationXmlCheck::NAME => Box::new(IndentationXmlCheck::new(parse_options(name, options)?)),
        _ => return Err(unknown_check(name, SourceFormat::Xml)),
    };
    Ok(check)
}

fn unknown_check(name: &str, format: SourceFormat) -> LinterError {
    LinterError::config(format!("Unknown {} check '{}'", format.name(), name))
}

/// Deserializes the `options` object of a check. Missing options mean the
/// defaults.
pub(crate) fn parse_options<T>(check: &str, options: &Value) -> Result<T, LinterError>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|e| LinterError::config(format!("Invalid options for check {}: {}", check, e)))
}

fn no_options(check: &str, options: &Value) -> Result<(), LinterError> {
    match options {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        _ => Err(LinterError::config(format!(
            "Check {} does not take options",
            check
        ))),
    }
}

/// Compiles a user supplied pattern.
pub(crate) fn compile_pattern(
    check: &str,
    pattern: &str,
    ignore_case: bool,
) -> Result<Regex, LinterError> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| {
            LinterError::config(format!(
                "Invalid pattern '{}' in check {}: {}",
                pattern, check, e
            ))
        })
}

/// Text of a token with line breaks and tabs spelled out.
pub(crate) fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolves token names from options into kinds.
pub(crate) fn token_kinds<K: TokenKind>(names: &[String]) -> Result<Vec<K>, LinterError> {
    names
        .iter()
        .map(|name| K::catalog().kind_of_name(name).map_err(LinterError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_every_property_check_can_be_created() {
        for name in PROPERTY_CHECKS {
            let check = create_property_check(name, &Value::Null).unwrap();
            assert_eq!(check.name(), *name);
            assert_eq!(format_of(name), Some(SourceFormat::Property));
        }
    }

    #[test]
    fn test_every_xml_check_can_be_created() {
        for name in XML_CHECKS {
            let check = create_xml_check(name, &json!({})).unwrap();
            assert_eq!(check.name(), *name);
            assert_eq!(format_of(name), Some(SourceFormat::Xml));
        }
    }

    #[rstest]
    #[case::unknown_name("NoSuchCheck", Value::Null, "Unknown property check 'NoSuchCheck'")]
    #[case::unknown_option(
        "IndentationProperty",
        json!({ "nestedIndentation": 2 }),
        "Invalid options for check IndentationProperty"
    )]
    #[case::bad_regex(
        "KeyNameProperty",
        json!({ "format": "(" }),
        "Invalid pattern '(' in check KeyNameProperty"
    )]
    #[case::unknown_token(
        "IllegalAssignmentTextProperty",
        json!({ "allowedAssignments": ["ARROW"] }),
        "unknown token name 'ARROW'"
    )]
    #[case::options_not_taken(
        "MissingAssignmentProperty",
        json!({ "strict": true }),
        "does not take options"
    )]
    fn test_property_check_errors(#[case] name: &str, #[case] options: Value, #[case] message: &str) {
        let error = match create_property_check(name, &options) {
            Ok(_) => panic!("expected {} to fail", name),
            Err(error) => error,
        };
        assert!(error.is_config());
        assert!(
            error.to_string().contains(message),
            "'{}' should contain '{}'",
            error,
            message
        );
    }

    #[test]
    fn test_escape_control_chars() {
        assert_eq!(escape_control_chars("<!-- a\tb\r\n -->"), "<!-- a\\tb\\r\\n -->");
    }

    #[test]
    fn test_format_of_unknown() {
        assert_eq!(format_of("IndentationJson"), None);
    }
}
