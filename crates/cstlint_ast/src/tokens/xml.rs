token_kinds! {
    /// Node kinds of the XML tree.
    pub enum XmlToken {
        Document = "DOCUMENT",
        /// The `<?xml ... ?>` declaration.
        Prolog = "PROLOG",
        /// Everything between a start and an end tag.
        Content = "CONTENT",
        Element = "ELEMENT",
        StartElement = "START_ELEMENT",
        EndElement = "END_ELEMENT",
        /// Self-closing element, `<name/>`.
        EmptyElement = "EMPTY_ELEMENT",
        Reference = "REFERENCE",
        Attribute = "ATTRIBUTE",
        /// Comments, processing instructions and whitespace outside the root element.
        Misc = "MISC",
        Comment = "COMMENT",
        Cdata = "CDATA",
        Dtd = "DTD",
        EntityRef = "ENTITY_REF",
        CharRef = "CHAR_REF",
        /// Whitespace-only character data.
        SeaWs = "SEA_WS",
        Open = "OPEN",
        XmlDeclOpen = "XML_DECL_OPEN",
        Text = "TEXT",
        Close = "CLOSE",
        XmlDeclClose = "XML_DECL_CLOSE",
        SlashClose = "SLASH_CLOSE",
        Slash = "SLASH",
        Equals = "EQUALS",
        /// Quoted attribute value, quotes included.
        String = "STRING",
        Name = "NAME",
        /// Processing instruction other than the XML declaration.
        Pi = "PI",
    }
}
