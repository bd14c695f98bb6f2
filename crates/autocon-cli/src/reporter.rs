use autocon_common::{Diagnostic, DiagnosticCategory, LineMap};
use autocon_emitter::RewriteStats;
use colored::Colorize;
use rustc_hash::FxHashMap;

/// Renders diagnostics against the source text they refer to.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Make `text` available for locations and snippets in `file`.
    pub fn add_source(&mut self, file: &str, text: &str) {
        self.line_maps.remove(file);
        self.sources.insert(file.to_string(), text.to_string());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        match self.format_location(&diagnostic.file, diagnostic.start) {
            Some(location) => output.push_str(&location),
            None if !diagnostic.file.is_empty() => output.push_str(&diagnostic.file),
            None => output.push_str("<stdin>"),
        }

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// `file: 3 wrapped, 1 already output, ...` for `--stats`.
    pub fn format_stats(&self, file: &str, stats: &RewriteStats) -> String {
        let wrapped = format!("{} wrapped", stats.wrapped);
        let wrapped = if self.color && stats.wrapped > 0 {
            wrapped.green().to_string()
        } else {
            wrapped
        };
        format!(
            "{}: {}, {} already output, {} unbound, {} ineligible, {} bodies skipped",
            file,
            wrapped,
            stats.output_calls,
            stats.unbound_identifiers,
            stats.ineligible,
            stats.excluded_function_bodies
        )
    }

    /// Source line with the span underlined:
    ///
    /// ```text
    ///     2   f(;
    ///           ~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;
        let length = source
            .get(start as usize..(start + length) as usize)
            .map_or(length, |span| span.chars().count() as u32);

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            let offset = i as u32;
            if offset < column - 1 {
                underline.push(if ch == '\t' { '\t' } else { ' ' });
            } else if offset < column - 1 + length.max(1) {
                underline.push('~');
            } else {
                break;
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {:>3}   {}\n        {}", line_num, line_text, underline))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{}:{}:{}", file, line, column))
    }

    /// 1-based line and column. The line map counts bytes; the column is
    /// counted in chars so it matches what an editor shows.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let source = self.sources.get(file)?;
        let map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = map.offset_to_position(offset);
        let line_start = (offset - position.character) as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(position.character, |prefix| prefix.chars().count() as u32);
        Some((position.line + 1, column + 1))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.name();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("AC{}", code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
