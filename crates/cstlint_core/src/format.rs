//! Source formats and how files are matched to them.

use std::fmt;
use std::path::Path;

use cstlint_parser::{Parser, PropertyParser, XmlParser};

/// A supported input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Property,
    Xml,
}

impl SourceFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|e| e.to_str())?;
        if PropertyParser::new().can_parse(extension) {
            Some(Self::Property)
        } else if XmlParser::new().can_parse(extension) {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
