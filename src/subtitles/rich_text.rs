use super::types::RenderMode;
use std::collections::HashSet;

/// Accumulates caption text with nested tags that may be closed out of order.
///
/// Closing a tag that is not the innermost one closes everything above it,
/// then reopens those tags, so the output is always a well formed tree.
#[derive(Debug)]
pub struct TagStackRenderer {
    mode: RenderMode,
    tag_stack: Vec<(String, String)>,
    opened_tags: HashSet<String>,
    output: String,
}

impl TagStackRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            tag_stack: Vec::new(),
            opened_tags: HashSet::new(),
            output: String::new(),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Append literal text.
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Append text that only makes sense as markup; dropped in plain mode.
    pub fn write_markup(&mut self, markup: &str) {
        if self.mode == RenderMode::Markup {
            self.output.push_str(markup);
        }
    }

    /// Open `tag_name`, using `markup` (default `<tag_name>`) as its opening text.
    ///
    /// Opening a tag that is already open does nothing.
    pub fn open(&mut self, tag_name: &str, markup: Option<&str>) {
        if self.opened_tags.contains(tag_name) {
            return;
        }
        let markup = match markup {
            Some(m) => m.to_string(),
            None => format!("<{}>", tag_name),
        };
        match self.mode {
            RenderMode::Markup => self.output.push_str(&markup),
            // keep the visual gap the control code occupied
            RenderMode::Plain => self.output.push(' '),
        }
        self.opened_tags.insert(tag_name.to_string());
        self.tag_stack.push((tag_name.to_string(), markup));
    }

    /// Close `tag_name` wherever it sits in the stack.
    pub fn close(&mut self, tag_name: &str) {
        if self.mode == RenderMode::Plain || !self.opened_tags.contains(tag_name) {
            return;
        }

        let mut reopen_stack = Vec::new();
        while let Some(entry) = self.tag_stack.pop() {
            self.output.push_str(&closing_markup(&entry.0));
            if entry.0 == tag_name {
                self.opened_tags.remove(tag_name);
                break;
            }
            reopen_stack.push(entry);
        }

        // popped innermost first, so reopen in reverse to restore the order
        while let Some(entry) = reopen_stack.pop() {
            self.output.push_str(&entry.1);
            self.tag_stack.push(entry);
        }
    }

    /// Close every open tag, innermost first.
    pub fn close_all(&mut self) {
        while let Some((name, _)) = self.tag_stack.pop() {
            if self.mode == RenderMode::Markup {
                self.output.push_str(&closing_markup(&name));
            }
            self.opened_tags.remove(&name);
        }
    }

    pub fn is_open(&self, tag_name: &str) -> bool {
        self.opened_tags.contains(tag_name)
    }

    /// Names of the open tags, outermost first.
    pub fn open_tags(&self) -> Vec<&str> {
        self.tag_stack.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The accumulated text with every still-open tag closed.
    pub fn render(&self) -> String {
        let mut rendered = self.output.clone();
        if self.mode == RenderMode::Markup {
            for (name, _) in self.tag_stack.iter().rev() {
                rendered.push_str(&closing_markup(name));
            }
        }
        rendered
    }
}

fn closing_markup(tag_name: &str) -> String {
    format!("</{}>", tag_name)
}
