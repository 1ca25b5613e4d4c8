//! Incremental Java source construction with indentation handling

const INDENT: &str = "    ";

/// Accumulates Java source text line by line at the current indent level.
#[derive(Debug, Default, Clone)]
pub struct SourceBuilder {
    content: String,
    indent_level: usize,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.content.push_str(INDENT);
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// A separator line, written without trailing indentation.
    pub fn blank_line(&mut self) {
        self.content.push('\n');
    }

    /// Push a preformatted multi-line chunk, re-indenting each line.
    pub fn push_lines(&mut self, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                self.blank_line();
            } else {
                self.push_line(line);
            }
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut builder = SourceBuilder::new();
        builder.push_line("class A {");
        builder.indent();
        builder.push_line("int x;");
        builder.dedent();
        builder.push_line("}");
        assert_eq!(builder.build(), "class A {\n    int x;\n}\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut builder = SourceBuilder::new();
        builder.indent();
        builder.push_line("a();");
        builder.blank_line();
        builder.push_line("b();");
        assert_eq!(builder.build(), "    a();\n\n    b();\n");
    }

    #[test]
    fn test_push_lines_reindents_chunk() {
        let mut builder = SourceBuilder::new();
        builder.indent();
        builder.push_lines("void run() {\n    go();\n}");
        assert_eq!(builder.build(), "    void run() {\n        go();\n    }\n");
    }

    #[test]
    fn test_dedent_stops_at_zero() {
        let mut builder = SourceBuilder::new();
        builder.dedent();
        builder.push_line("x");
        assert_eq!(builder.build(), "x\n");
    }
}
