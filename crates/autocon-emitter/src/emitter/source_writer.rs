/// Output buffer that inserts indentation at the start of each line.
pub(crate) struct SourceWriter {
    output: String,
    indent: usize,
    indent_width: usize,
    new_line: &'static str,
    at_line_start: bool,
}

impl SourceWriter {
    pub(crate) fn new(indent_width: usize, new_line: &'static str) -> Self {
        SourceWriter {
            output: String::new(),
            indent: 0,
            indent_width,
            new_line,
            at_line_start: true,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.output.clear();
        self.indent = 0;
        self.at_line_start = true;
    }

    pub(crate) fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            let width = self.indent * self.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push_str(self.new_line);
        self.at_line_start = true;
    }

    pub(crate) fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub(crate) fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
