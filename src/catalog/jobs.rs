//! Class/job abbreviation lookup used by import sources.

/// `(abbreviation, class job id)` for combat jobs.
const JOBS: &[(&str, u32)] = &[
    ("PLD", 19),
    ("MNK", 20),
    ("WAR", 21),
    ("DRG", 22),
    ("BRD", 23),
    ("WHM", 24),
    ("BLM", 25),
    ("SMN", 27),
    ("SCH", 28),
    ("NIN", 30),
    ("MCH", 31),
    ("DRK", 32),
    ("AST", 33),
    ("SAM", 34),
    ("RDM", 35),
    ("BLU", 36),
    ("GNB", 37),
    ("DNC", 38),
    ("RPR", 39),
    ("SGE", 40),
    ("VPR", 41),
    ("PCT", 42),
];

/// Look up a class job id by its English abbreviation (case-insensitive).
pub fn class_job_id(abbreviation: &str) -> Option<u32> {
    let needle = abbreviation.trim();
    JOBS.iter()
        .find(|(abbrev, _)| abbrev.eq_ignore_ascii_case(needle))
        .map(|(_, id)| *id)
}

/// Reverse lookup: abbreviation for a class job id.
pub fn job_abbreviation(class_job_id: u32) -> Option<&'static str> {
    JOBS.iter()
        .find(|(_, id)| *id == class_job_id)
        .map(|(abbrev, _)| *abbrev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_job() {
        assert_eq!(class_job_id("WHM"), Some(24));
        assert_eq!(class_job_id("sge"), Some(40));
    }

    #[test]
    fn unknown_job_is_none() {
        assert_eq!(class_job_id("XYZ"), None);
        assert_eq!(class_job_id(""), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(job_abbreviation(21), Some("WAR"));
        assert_eq!(job_abbreviation(0), None);
    }
}
