//! Table formatting for CLI output.

/// Table rendering style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    #[default]
    Plain,
    /// GitHub-flavored markdown, for pasting the support matrix into docs.
    Markdown,
}

/// Column alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Table column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
            max_width: None,
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Table structure
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    style: TableStyle,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            style: TableStyle::default(),
        }
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_row(&mut self, row: Vec<impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn calculate_widths(&self, max_total: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| width_of(&c.header)).collect();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(width_of(cell));
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            if let Some(max) = col.max_width {
                widths[i] = widths[i].min(max);
            }
        }

        // Shrink evenly when the table is wider than the terminal
        let separator_width = self.columns.len().saturating_sub(1) * 3;
        let total: usize = widths.iter().sum::<usize>() + separator_width;
        if total > max_total && widths.len() > 1 {
            let reduce_per = (total - max_total) / widths.len() + 1;
            for w in &mut widths {
                *w = w.saturating_sub(reduce_per).max(5);
            }
        }

        widths
    }

    /// Render the table to a string
    pub fn render(&self, max_width: usize, color: bool) -> String {
        let mut output = String::new();
        match self.style {
            TableStyle::Plain => self.render_plain(&mut output, &self.calculate_widths(max_width), color),
            // Markdown is copied elsewhere; never truncate it.
            TableStyle::Markdown => self.render_markdown(&mut output, &self.calculate_widths(usize::MAX)),
        }
        output
    }

    fn render_plain(&self, output: &mut String, widths: &[usize], color: bool) {
        let header: Vec<_> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(col, &w)| format_cell(&col.header, w, col.alignment))
            .collect();

        if color {
            output.push_str("\x1b[1m");
        }
        output.push_str(header.join("   ").trim_end());
        if color {
            output.push_str("\x1b[0m");
        }
        output.push('\n');

        let sep: Vec<_> = widths.iter().map(|&w| "-".repeat(w)).collect();
        output.push_str(&sep.join("   "));
        output.push('\n');

        for row in &self.rows {
            let cells: Vec<_> = row
                .iter()
                .zip(&self.columns)
                .zip(widths)
                .map(|((cell, col), &w)| format_cell(cell, w, col.alignment))
                .collect();
            output.push_str(cells.join("   ").trim_end());
            output.push('\n');
        }
    }

    fn render_markdown(&self, output: &mut String, widths: &[usize]) {
        output.push('|');
        for (col, &w) in self.columns.iter().zip(widths) {
            output.push_str(&format!(" {} |", format_cell(&col.header, w, col.alignment)));
        }
        output.push('\n');

        output.push('|');
        for (col, &w) in self.columns.iter().zip(widths) {
            let sep = match col.alignment {
                Alignment::Left => format!(":{}", "-".repeat(w.saturating_sub(1))),
                Alignment::Right => format!("{}:", "-".repeat(w.saturating_sub(1))),
            };
            output.push_str(&format!(" {sep} |"));
        }
        output.push('\n');

        for row in &self.rows {
            output.push('|');
            for ((cell, col), &w) in row.iter().zip(&self.columns).zip(widths) {
                output.push_str(&format!(" {} |", format_cell(cell, w, col.alignment)));
            }
            output.push('\n');
        }
    }
}

fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn format_cell(content: &str, width: usize, alignment: Alignment) -> String {
    let content = if width_of(content) > width {
        let kept: String = content.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        content.to_string()
    };

    match alignment {
        Alignment::Left => format!("{content:<width$}"),
        Alignment::Right => format!("{content:>width$}"),
    }
}
