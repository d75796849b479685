use std::cmp::Ordering;

/// A run of text positioned on a page. `y` grows downwards from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl TextBlock {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Orders blocks top-to-bottom, then left-to-right.
pub fn sort_reading_order(blocks: &mut [TextBlock]) {
    blocks.sort_by(|a, b| match a.y.total_cmp(&b.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });
}

pub fn join_blocks(blocks: &[TextBlock]) -> String {
    let mut out = String::with_capacity(blocks.iter().map(|b| b.text.len() + 1).sum());
    for block in blocks {
        out.push_str(&block.text);
        if !block.text.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// A styled run of text and its vertical extent on the page (`top < bottom`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub left: f32,
    pub top: f32,
    pub bottom: f32,
    pub text: String,
}

impl TextRun {
    pub fn new(left: f32, top: f32, bottom: f32, text: impl Into<String>) -> Self {
        Self {
            left,
            top,
            bottom,
            text: text.into(),
        }
    }

    fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

struct Line {
    top: f32,
    bottom: f32,
    runs: Vec<TextRun>,
}

impl Line {
    fn start(run: TextRun) -> Self {
        Self {
            top: run.top,
            bottom: run.bottom,
            runs: vec![run],
        }
    }

    /// Runs share a line when they overlap for at least half the shorter height.
    fn accepts(&self, run: &TextRun) -> bool {
        let overlap = self.bottom.min(run.bottom) - self.top.max(run.top);
        let shorter = (self.bottom - self.top).min(run.height());
        if shorter <= 0.0 {
            return (self.top - run.top).abs() <= f32::EPSILON;
        }
        overlap >= shorter * 0.5
    }

    fn push(&mut self, run: TextRun) {
        self.top = self.top.min(run.top);
        self.bottom = self.bottom.max(run.bottom);
        self.runs.push(run);
    }

    fn into_block(mut self) -> TextBlock {
        self.runs.sort_by(|a, b| a.left.total_cmp(&b.left));
        let left = self.runs.first().map(|r| r.left).unwrap_or(0.0);

        let mut text = String::new();
        for run in &self.runs {
            let piece = run.text.trim_matches(|c| c == '\r' || c == '\n');
            if piece.is_empty() {
                continue;
            }
            let needs_space = !text.is_empty()
                && !text.ends_with(char::is_whitespace)
                && !piece.starts_with(char::is_whitespace);
            if needs_space {
                text.push(' ');
            }
            text.push_str(piece);
        }

        TextBlock::new(left, self.top, text)
    }
}

/// Merges runs that sit on the same visual line, left to right, so that
/// mixed font sizes on one baseline stay together.
pub fn group_runs_into_lines(mut runs: Vec<TextRun>) -> Vec<TextBlock> {
    runs.sort_by(|a, b| match a.top.total_cmp(&b.top) {
        Ordering::Equal => a.left.total_cmp(&b.left),
        other => other,
    });

    let mut lines: Vec<Line> = Vec::new();
    for run in runs {
        match lines.last_mut() {
            Some(line) if line.accepts(&run) => line.push(run),
            _ => lines.push(Line::start(run)),
        }
    }

    lines
        .into_iter()
        .map(Line::into_block)
        .filter(|block| !block.text.trim().is_empty())
        .collect()
}
