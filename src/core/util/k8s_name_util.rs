use anyhow::Result;

use crate::errors::AppError;

pub const DNS_LABEL_MAX_LEN: usize = 63;

/// Checks a name against the RFC 1123 label rules Kubernetes applies to
/// namespaces (and which cluster names reuse): lowercase alphanumerics and
/// `-`, starting and ending with an alphanumeric, at most 63 characters.
pub fn is_dns_label(name: &str) -> bool {
    if name.is_empty() || name.len() > DNS_LABEL_MAX_LEN {
        return false;
    }

    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let first_last_ok = name.starts_with(valid_char) && name.ends_with(valid_char);

    first_last_ok && name.chars().all(|c| valid_char(c) || c == '-')
}

pub fn ensure_dns_label(kind: &str, name: &str) -> Result<()> {
    if is_dns_label(name) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{kind} name '{name}' must be a lowercase RFC 1123 label (a-z, 0-9, '-', max {DNS_LABEL_MAX_LEN} chars)"
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_labels() {
        assert!(is_dns_label("default"));
        assert!(is_dns_label("kube-system"));
        assert!(is_dns_label("a"));
        assert!(is_dns_label("team-42"));
        assert!(is_dns_label(&"a".repeat(63)));
    }

    #[test]
    fn rejects_invalid_labels() {
        assert!(!is_dns_label(""));
        assert!(!is_dns_label("-leading"));
        assert!(!is_dns_label("trailing-"));
        assert!(!is_dns_label("Upper"));
        assert!(!is_dns_label("dots.not.allowed"));
        assert!(!is_dns_label(&"a".repeat(64)));
    }

    #[test]
    fn ensure_reports_bad_request() {
        let err = ensure_dns_label("namespace", "Bad_Name").unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));
    }
}
