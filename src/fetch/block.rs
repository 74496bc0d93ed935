// src/fetch/block.rs

/// Recognises soft-block pages: valid HTML that says "come back later"
/// instead of showing the docket.
#[derive(Clone, Debug, Default)]
pub struct BlockDetector {
    phrases: Vec<String>, // lowercased
}

impl BlockDetector {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// The first configured phrase found in `content`, case-insensitively.
    pub fn detect(&self, content: &str) -> Option<&str> {
        if self.phrases.is_empty() {
            return None;
        }
        let lc = content.to_lowercase();
        self.phrases
            .iter()
            .find(|p| lc.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn is_blocked(&self, content: &str) -> bool {
        self.detect(content).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::BLOCK_PHRASES;

    #[test]
    fn detects_default_phrases_in_any_case() {
        let d = BlockDetector::new(BLOCK_PHRASES);
        let page = "<html><body><h1>The Server Is Busy</h1><p>Please TRY AGAIN LATER.</p></body></html>";
        assert_eq!(d.detect(page), Some("server is busy"));
        assert!(d.is_blocked("<p>Service Temporarily Unavailable</p>"));
    }

    #[test]
    fn real_docket_passes() {
        let d = BlockDetector::new(BLOCK_PHRASES);
        assert!(!d.is_blocked(r#"<div id="tblDocket2">Party Name</div>"#));
    }

    #[test]
    fn empty_phrase_list_never_blocks() {
        let d = BlockDetector::new(Vec::<String>::new());
        assert!(!d.is_blocked("server is busy"));
        let d = BlockDetector::new(["", "  "]);
        assert!(!d.is_blocked("anything"));
    }
}
