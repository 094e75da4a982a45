/// Allow-list of exact responses accepted on Enter.
///
/// Comparison is against the response with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    allowed: Vec<String>,
}

impl ValidationPolicy {
    /// Build a policy; an empty list yields `None` (no validation).
    pub fn new<I, S>(allowed: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        if allowed.is_empty() {
            None
        } else {
            Some(Self { allowed })
        }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn allows(&self, response: &str) -> bool {
        let trimmed = response.trim();
        self.allowed.iter().any(|a| a == trimmed)
    }

    /// User-facing rejection text listing the acceptable values.
    pub fn rejection_message(&self, response: &str) -> String {
        format!(
            "Invalid response: {:?} (allowed: {})",
            response,
            self.allowed.join(", ")
        )
    }
}
