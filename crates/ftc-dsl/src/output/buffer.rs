//! Line buffer with brace-tracking indentation.

/// Ordered output lines plus the current block depth.
///
/// Every `open` must be matched by a `close`; `reopen` closes and opens in
/// one line (`} else {`) so the depth is unchanged.
#[derive(Debug)]
pub struct EmitBuffer {
    lines: Vec<String>,
    depth: usize,
    unit: String,
}

impl EmitBuffer {
    pub fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            unit: " ".repeat(indent_width),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Push one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.unit.repeat(self.depth), text));
        }
    }

    /// Push an empty line, unless the previous line is already empty or
    /// opens a block.
    pub fn blank(&mut self) {
        match self.lines.last() {
            Some(last) if !last.is_empty() && !last.ends_with('{') => {
                self.lines.push(String::new());
            }
            _ => {}
        }
    }

    /// `header {` and indent.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedent and `}`.
    pub fn close(&mut self) {
        debug_assert!(self.depth > 0, "unbalanced close");
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// `} header {` at the enclosing depth, staying inside a block.
    pub fn reopen(&mut self, header: impl AsRef<str>) {
        debug_assert!(self.depth > 0, "reopen outside a block");
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}} {} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Join the lines, ending with a newline.
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed block");
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
