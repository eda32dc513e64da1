/// Fallback when a merchant matches no rule.
pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// An ordered (label, substring-set) pair. A merchant matches the rule when
/// its lowercased form contains any of the matcher substrings.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: String,
    pub matchers: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: &str, matchers: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            matchers: matchers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    fn matches(&self, merchant_lower: &str) -> bool {
        self.matchers.iter().any(|m| merchant_lower.contains(m.as_str()))
    }
}

/// Assigns categories from an explicit, ordered rule list. First matching
/// rule wins; list order is the only priority mechanism. Never mutated after
/// construction.
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The stock rule table shipped with the importer.
    pub fn default_rules() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new("Coffee", &["starbucks", "dunkin"]),
            CategoryRule::new("Transportation", &["uber", "lyft"]),
            CategoryRule::new("Groceries", &["whole foods", "trader joes", "kroger", "aldi"]),
            CategoryRule::new("Dining", &["mcdonalds", "chipotle", "dominos", "ubereats", "doordash"]),
            CategoryRule::new("Fuel", &["shell", "chevron", "bp"]),
            CategoryRule::new("Entertainment", &["netflix", "spotify", "hulu"]),
            CategoryRule::new("Utilities", &["verizon", "comcast", "att"]),
        ]
    }

    /// Resolve the category for a record. An explicit category (anything
    /// non-empty other than the literal "uncategorized", case-insensitive)
    /// is returned unchanged; otherwise the merchant is matched against the
    /// rule list. Matching is plain substring containment, so a matcher
    /// embedded in an unrelated merchant name ("att" in "attraction") is a
    /// hit; that imprecision is kept as-is.
    pub fn resolve(&self, merchant: &str, existing: &str) -> String {
        if !existing.is_empty() && !existing.eq_ignore_ascii_case(FALLBACK_CATEGORY) {
            return existing.to_string();
        }
        let merchant_lower = merchant.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&merchant_lower))
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(Self::default_rules())
    }
}
