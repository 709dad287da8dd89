/// One line of the buffer, split into characters, with its absolute char offset.
pub(crate) struct SourceLine {
    /// Char offset of the first character.
    pub start: usize,
    /// Characters including the terminator.
    pub chars: Vec<char>,
    /// Number of characters before the terminator.
    pub content_len: usize,
}

impl SourceLine {
    fn new(start: usize, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut content_len = chars.len();
        if chars.last() == Some(&'\n') {
            content_len -= 1;
            if content_len > 0 && chars[content_len - 1] == '\r' {
                content_len -= 1;
            }
        }
        Self {
            start,
            chars,
            content_len,
        }
    }

    /// Total length in chars, terminator included.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn content(&self) -> &[char] {
        &self.chars[..self.content_len]
    }

    pub fn has_terminator(&self) -> bool {
        self.content_len < self.chars.len()
    }

    /// Number of leading spaces/tabs.
    pub fn leading_ws(&self) -> usize {
        self.content().iter().take_while(|c| is_blank(**c)).count()
    }

    /// Index where the trailing run of spaces/tabs starts (`content_len` if there is none).
    pub fn trailing_ws_start(&self) -> usize {
        let trailing = self
            .content()
            .iter()
            .rev()
            .take_while(|c| is_blank(**c))
            .count();
        self.content_len - trailing
    }

    /// Whether the line holds nothing but spaces/tabs.
    pub fn is_blank(&self) -> bool {
        self.leading_ws() == self.content_len
    }

    /// The text between the indentation and the trailing whitespace.
    pub fn trimmed(&self) -> String {
        if self.is_blank() {
            return String::new();
        }
        self.chars[self.leading_ws()..self.trailing_ws_start()]
            .iter()
            .collect()
    }
}

pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub(crate) fn source_lines(buffer: &str) -> Vec<SourceLine> {
    let mut start = 0;
    buffer
        .split_inclusive('\n')
        .map(|text| {
            let line = SourceLine::new(start, text);
            start += line.len();
            line
        })
        .collect()
}
