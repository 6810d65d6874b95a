/// Maximum number of perspectives a registry holds.
pub const MAX_PERSPECTIVES: usize = 10;

/// Maximum length of a perspective or KPI name, in characters.
pub const MAX_NAME_LEN: usize = 49;

/// Resource bounds enforced by a [`crate::Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_perspectives: usize,
    pub max_name_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_perspectives: MAX_PERSPECTIVES,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

/// Cut `name` down to at most `max_len` characters without splitting a char.
pub fn truncate_name(name: &str, max_len: usize) -> &str {
    match name.char_indices().nth(max_len) {
        Some((byte_idx, _)) => &name[..byte_idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate_name("Financial", MAX_NAME_LEN), "Financial");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_name("ééé", 2), "éé");
        let long = "x".repeat(60);
        assert_eq!(truncate_name(&long, MAX_NAME_LEN).len(), MAX_NAME_LEN);
    }
}
