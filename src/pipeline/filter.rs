//! Pattern-based exclusion of non-heading blocks.

use regex::Regex;

/// Text patterns that are structurally ineligible to be headings.
///
/// Contact lines, dates, URLs, page numbers, captions and legal boilerplate
/// routinely appear in display sizes, so they must be excluded before
/// classification ever sees them. The filter errs toward exclusion: an
/// over-filtered heading is merely dropped, while a promoted noise line
/// corrupts the outline visibly.
///
/// All patterns are compiled once at construction; build one filter per
/// batch run and share it by reference.
pub struct PatternFilter {
    patterns: Vec<Regex>,
}

const NOISE_PATTERNS: &[&str] = &[
    r"(?i)^\s*rsvp[:\-]?",
    r"(?i)^\s*www\.[\w.\-]+\.[a-z]{2,}\s*$",
    r"(?i)^\s*https?://[\w.\-]+",
    r"(?i)^\s*email[:\-]?\s*[\w.\-]+@[\w.\-]+\s*$",
    r"(?i)^\s*[\w.+\-]+@[\w.\-]+\.[a-z]{2,}\s*$",
    r"(?i)^\s*phone[:\-]?\s*\+?\d[\d\-\s]+$",
    r"(?i)^\s*\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{4}\s*$",
    r"(?i)^\s*(tel|fax)[:\-]?\s*\+?\d[\d\-\s]+$",
    r"(?i)^\s*(address|location)[:\-]\s*.*$",
    r"(?i)^\s*\d{1,3}(\.\d+)*\s*$",
    r"(?i)^\s*page\s*\d+\s*$",
    r"(?i)^\s*\d{1,4}[/.\-]\d{1,2}[/.\-]\d{2,4}\s*$",
    r"(?i)^\s*(copyright|©).*$",
    r"(?i)^\s*(confidential|disclaimer).*$",
    r"(?i)^\s*(figure|table|fig\.)\s*\d+\s*[:\-]?.*$",
    r"(?i)^\s*(date|time)[:\-]\s*.*$",
    r"(?i)^\s*contact\s*(us)?[:\-]\s*.*$",
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

impl PatternFilter {
    /// Compile the filter patterns.
    pub fn new() -> Self {
        let patterns = NOISE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("built-in noise pattern must compile"))
            .collect();
        Self { patterns }
    }

    /// Whether a block's text is structurally ineligible to be a heading.
    pub fn is_noise(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return true;
        }
        if self.patterns.iter().any(|p| p.is_match(text)) {
            return true;
        }
        self.is_month_year_date(text)
    }

    /// Lines like "March 21, 2003" carry a month name plus a 4-digit year.
    fn is_month_year_date(&self, text: &str) -> bool {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c| c == '.' || c == ',').to_lowercase())
            .collect();
        let has_month = words.iter().any(|w| MONTHS.contains(&w.as_str()));
        let has_year = words
            .iter()
            .any(|w| w.len() == 4 && w.chars().all(|c| c.is_ascii_digit()));
        has_month && has_year
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_numbers_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("3"));
        assert!(filter.is_noise("1.2"));
        assert!(filter.is_noise("2.1.4"));
        assert!(filter.is_noise("Page 12"));
        assert!(filter.is_noise("  page 3 "));
    }

    #[test]
    fn test_urls_and_email_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("www.topjump.com"));
        assert!(filter.is_noise("https://example.org/docs"));
        assert!(filter.is_noise("Email: info@example.com"));
        assert!(filter.is_noise("info@example.com"));
    }

    #[test]
    fn test_phone_numbers_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("(555) 123-4567"));
        assert!(filter.is_noise("Phone: +1 555-0100"));
        assert!(filter.is_noise("Fax: 555 0100 200"));
    }

    #[test]
    fn test_boilerplate_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("Copyright 2024 Acme Corp"));
        assert!(filter.is_noise("© 2024 Acme Corp"));
        assert!(filter.is_noise("Confidential - internal use only"));
        assert!(filter.is_noise("RSVP: by Friday"));
    }

    #[test]
    fn test_captions_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("Figure 3: System architecture"));
        assert!(filter.is_noise("Table 12 - Results"));
        assert!(filter.is_noise("Fig. 2"));
    }

    #[test]
    fn test_dates_rejected() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("March 21, 2003"));
        assert!(filter.is_noise("21 December 1999"));
        assert!(filter.is_noise("12/31/2024"));
        assert!(filter.is_noise("2024-01-15"));
    }

    #[test]
    fn test_headings_pass() {
        let filter = PatternFilter::new();
        assert!(!filter.is_noise("Introduction"));
        assert!(!filter.is_noise("Table of Contents"));
        assert!(!filter.is_noise("3. Methodology"));
        assert!(!filter.is_noise("May Day Celebrations"));
        assert!(!filter.is_noise("Timeline of Events"));
    }

    #[test]
    fn test_blank_is_noise() {
        let filter = PatternFilter::new();
        assert!(filter.is_noise("   "));
    }
}
