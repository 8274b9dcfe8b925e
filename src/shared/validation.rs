use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Characters not allowed in stored attachment names
    /// - Allowed: ASCII letters, digits, '.', '_' and '-'
    /// - Everything else (spaces, '#', '/', non-ASCII) is replaced by '_'
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9._-]").unwrap();
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Validation messages ordered by field name
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_sanitize_filename_keeps_safe_chars() {
        assert_eq!(sanitize_filename("report-2024_v1.pdf"), "report-2024_v1.pdf");
        assert_eq!(sanitize_filename("ABCxyz019"), "ABCxyz019");
    }

    #[test]
    fn test_sanitize_filename_replaces_unsafe_chars() {
        assert_eq!(sanitize_filename("a b#.txt"), "a_b_.txt");
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename("café menu.png"), "caf__menu.png");
        assert_eq!(sanitize_filename(""), "");
    }

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "title is required"))]
        title: String,
        #[validate(length(min = 1))]
        body: String,
    }

    #[test]
    fn test_validation_messages_sorted_by_field() {
        let form = Form {
            title: String::new(),
            body: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["body is invalid".to_string(), "title is required".to_string()]
        );
    }

    #[test]
    fn test_unsafe_regex() {
        assert!(UNSAFE_FILENAME_CHARS.is_match(" "));
        assert!(UNSAFE_FILENAME_CHARS.is_match("#"));
        assert!(UNSAFE_FILENAME_CHARS.is_match("/"));
        assert!(!UNSAFE_FILENAME_CHARS.is_match("a.b-c_d"));
    }
}
