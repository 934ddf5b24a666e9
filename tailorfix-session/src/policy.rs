use tailorfix_types::suggestion::Section;

/// Which sections a session may touch.
///
/// Deny wins over allow; an empty allow list leaves every section eligible.
/// Suggestions in an ineligible section stay pending and report as blocked.
#[derive(Debug, Clone, Default)]
pub struct SectionPolicy {
    pub allow: Vec<Section>,
    pub deny: Vec<Section>,
}

impl SectionPolicy {
    pub fn eligible(&self, section: Section) -> bool {
        if self.deny.contains(&section) {
            return false;
        }
        self.allow.is_empty() || self.allow.contains(&section)
    }
}
