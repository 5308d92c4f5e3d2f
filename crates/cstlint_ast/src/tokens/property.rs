token_kinds! {
    /// Node kinds of the property-file tree.
    pub enum PropertyToken {
        /// Whole file.
        File = "FILE",
        /// One physical line.
        Row = "ROW",
        /// A key/value declaration.
        Decl = "DECL",
        Key = "KEY",
        /// Separator between key and value (`=`, `:` or whitespace).
        Assignment = "ASSIGNMENT",
        /// Full value, including continuation lines.
        Value = "VALUE",
        /// A run of value text between continuations.
        ValueText = "VALUE_TEXT",
        Comment = "COMMENT",
        /// Backslash-newline that joins the next line onto the value.
        Continuation = "CONTINUATION",
        /// Backslash plus the single character it escapes.
        EscapedCharacter = "ESCAPED_CHARACTER",
        Equals = "EQUALS",
        Colon = "COLON",
        Exclamation = "EXCLAMATION",
        Pound = "POUND",
        Backslash = "BACKSLASH",
        Text = "TEXT",
        /// Spaces, tabs and form feeds.
        Ws = "WS",
        /// Line terminator (`\n`, `\r\n` or `\r`).
        Terminator = "TERMINATOR",
    }
}
