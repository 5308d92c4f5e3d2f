//! Tree command implementation

use std::fs;
use std::path::Path;

use cstlint_ast::{AstArena, print_tree};
use cstlint_core::SourceFormat;
use cstlint_parser::{Parser, PropertyParser, XmlParser};
use miette::{IntoDiagnostic, Result, miette};

pub fn run_tree(file: &Path) -> Result<()> {
    let format = SourceFormat::from_path(file)
        .ok_or_else(|| miette!("Unsupported file type: {}", file.display()))?;
    let source = fs::read_to_string(file).into_diagnostic()?;

    let arena = AstArena::new();
    let dump = match format {
        SourceFormat::Property => {
            let tree = PropertyParser::new().parse(&arena, &source).into_diagnostic()?;
            print_tree(&tree)
        }
        SourceFormat::Xml => {
            let tree = XmlParser::new().parse(&arena, &source).into_diagnostic()?;
            print_tree(&tree)
        }
    };
    print!("{}", dump);
    Ok(())
}
