/// One numbered paragraph of the catechism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub number: u32,

    /// Paragraph body, including its leading number
    pub text: String,

    /// Cross references to other paragraphs (not populated by extraction)
    pub references: Vec<String>,
}

impl Paragraph {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            references: Vec::new(),
        }
    }

    /// Text with every line break collapsed to a single space
    pub fn one_line(&self) -> String {
        self.text
            .replace("\r\n", " ")
            .replace(['\r', '\n'], " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let paragraph = Paragraph::new(27, "27 The desire for God is written in the human heart");
        assert_eq!(paragraph.number, 27);
        assert!(paragraph.references.is_empty());
    }

    #[test]
    fn test_one_line() {
        let paragraph = Paragraph::new(1, "1 God, infinitely perfect\nand blessed in himself,\r\nfreely\rcreated man");
        assert_eq!(
            paragraph.one_line(),
            "1 God, infinitely perfect and blessed in himself, freely created man"
        );
    }
}
