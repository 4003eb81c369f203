use std::collections::HashSet;

/// Radio firmware limit on channel name length.
const MAX_NAME_LEN: usize = 16;

/// Run-wide registry of allocated channel names. Names are never released;
/// uniqueness depends on the full allocation history.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        NameRegistry::default()
    }

    /// Allocate a unique channel name from `base`, truncated to 16 characters.
    /// On collision (or an empty base) a shorter prefix gets an uppercase-hex
    /// counter appended, counting up until the name is free.
    pub fn allocate(&mut self, base: &str) -> String {
        let truncated: String = base.chars().take(MAX_NAME_LEN).collect();
        if !truncated.is_empty() && !self.used.contains(&truncated) {
            self.used.insert(truncated.clone());
            return truncated;
        }

        let mut suffix: u32 = 1;
        loop {
            let tag = format!("{:X}", suffix);
            let keep = (MAX_NAME_LEN - 1).saturating_sub(tag.len());
            let mut candidate: String = base.chars().take(keep).collect();
            candidate.push_str(&tag);
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_allocation_is_unchanged() {
        let mut reg = NameRegistry::new();
        assert_eq!(reg.allocate("Montpelier W1ABC"), "Montpelier W1ABC");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn long_names_are_truncated() {
        let mut reg = NameRegistry::new();
        let name = reg.allocate("Saint Johnsbury KB1FRW");
        assert_eq!(name, "Saint Johnsbury ");
        assert_eq!(name.chars().count(), 16);
    }

    #[test]
    fn collisions_get_hex_suffixes() {
        let mut reg = NameRegistry::new();
        let first = reg.allocate("Burlington W1VTX");
        let second = reg.allocate("Burlington W1VTX");
        let third = reg.allocate("Burlington W1VTX");
        assert_eq!(first, "Burlington W1VTX");
        assert_eq!(second, "Burlington W1V1");
        assert_eq!(third, "Burlington W1V2");
    }

    #[test]
    fn suffixes_render_as_uppercase_hex() {
        let mut reg = NameRegistry::new();
        reg.allocate("Rutland K1XYZ rp");
        let mut last = String::new();
        for _ in 0..10 {
            last = reg.allocate("Rutland K1XYZ rp");
        }
        assert_eq!(last, "Rutland K1XYZ A");
    }

    #[test]
    fn empty_base_yields_counter_names() {
        let mut reg = NameRegistry::new();
        assert_eq!(reg.allocate(""), "1");
        assert_eq!(reg.allocate(""), "2");
        assert_eq!(reg.allocate(""), "3");
    }

    #[test]
    fn all_names_stay_distinct_and_bounded() {
        let mut reg = NameRegistry::new();
        let mut seen = HashSet::new();
        for base in ["Derby NX1P", "Derby NX1P", "Derby NX1P repeater", "", "", "x"] {
            let name = reg.allocate(base);
            assert!(name.chars().count() <= 16, "{name:?} too long");
            assert!(seen.insert(name.clone()), "{name:?} allocated twice");
        }
    }
}
