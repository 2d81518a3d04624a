//! Environment variable validation with helpful warnings
//!
//! Provides consistent validation for environment variable values with:
//! - Clear warning messages for invalid values
//! - Levenshtein-based typo suggestions
//! - Fallback to the previously configured value

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value; an invalid value yields `fallback` plus a warning
    pub fn parse<T, F>(&self, value: &str, parser: F, fallback: T) -> (T, Option<String>)
    where
        F: Fn(&str) -> Option<T>,
    {
        match parser(value) {
            Some(parsed) => (parsed, None),
            None => (fallback, Some(self.warning(value))),
        }
    }

    fn warning(&self, value: &str) -> String {
        format!(
            "Invalid {} value '{}'{}. Valid values: {}",
            self.var_name,
            value,
            self.suggest(value),
            self.valid_values.join(", ")
        )
    }

    /// Suggest a valid value based on Levenshtein distance
    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        // Only suggest if distance is reasonable (≤ 2 edits)
        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => {
                format!(" (did you mean '{}'?)", suggested)
            }
            _ => String::new(),
        }
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("bundel", "bundle"), 2);
        assert_eq!(levenshtein("aset", "asset"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_env_validator_valid_value() {
        let validator = EnvVarValidator::new("TEST_VAR", &["foo", "bar"]);
        let (value, warning) =
            validator.parse("foo", |s| if s == "foo" { Some(1) } else { None }, 0);
        assert_eq!(value, 1);
        assert!(warning.is_none());
    }

    #[test]
    fn test_env_validator_invalid_value_returns_fallback() {
        let validator = EnvVarValidator::new("TEST_VAR", &["foo", "bar"]);
        let (value, warning) = validator.parse("invalid", |_| None::<i32>, 7);
        assert_eq!(value, 7);
        let warning = warning.unwrap();
        assert!(warning.contains("TEST_VAR"));
        assert!(warning.contains("'invalid'"));
    }

    #[test]
    fn test_env_validator_suggestion_typo() {
        let validator = EnvVarValidator::new("DEPLOYER_STRATEGY", &["bundle", "asset"]);
        let (_, warning) = validator.parse("aset", |_| None::<()>, ());
        let warning = warning.unwrap();
        assert!(
            warning.contains("did you mean 'asset'?"),
            "Should suggest correction: {}",
            warning
        );
    }

    #[test]
    fn test_env_validator_no_suggestion_for_distant_value() {
        let validator = EnvVarValidator::new("TEST", &["bundle", "asset"]);
        let (_, warning) = validator.parse("something_completely_different", |_| None::<()>, ());
        assert!(!warning.unwrap().contains("did you mean"));
    }

    #[test]
    fn test_env_validator_shows_valid_values() {
        let validator = EnvVarValidator::new("TEST", &["a", "b", "c"]);
        let (_, warning) = validator.parse("x", |_| None::<()>, ());
        assert!(warning.unwrap().ends_with("Valid values: a, b, c"));
    }
}
