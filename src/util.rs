use crate::error::CoreError;
use crate::types::StaffMember;

/// Derive a two-letter initials code from the first two space-separated
/// name components.
///
/// Example: "Marcus Low" → "ML". Names with fewer than two components have
/// no initials code and can never match an assignee.
pub fn initials(name: &str) -> Option<String> {
    let mut parts = name.split_whitespace();
    let first = parts.next()?.chars().next()?;
    let second = parts.next()?.chars().next()?;
    Some(format!("{first}{second}"))
}

/// Resolve an assignee initials code to a staff member.
///
/// Weak reference by value-matching: staff order decides ties (first match
/// wins), and unmatchable names are skipped rather than treated as errors.
pub fn find_staff_by_initials<'a>(
    staff: &'a [StaffMember],
    code: &str,
) -> Option<&'a StaffMember> {
    staff
        .iter()
        .find(|s| initials(&s.name).as_deref() == Some(code))
}

/// Validate and trim a string field against length bounds.
pub fn validate_bounded_string(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.len() < min {
        return Err(CoreError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if trimmed.len() > max {
        return Err(CoreError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a monetary amount: finite and strictly positive.
pub fn validate_positive_amount(value: f64, field: &'static str) -> Result<f64, CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::validation(
            field,
            "must be a positive amount".to_string(),
        ));
    }
    Ok(value)
}

/// Validate an email address (shape only: non-empty local and domain parts).
pub fn validate_email(value: &str, field: &'static str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    let valid = matches!(
        trimmed.split_once('@'),
        Some((local, domain)) if !local.is_empty() && domain.contains('.')
    );
    if !valid {
        return Err(CoreError::validation(
            field,
            "must be an email address".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a workspace URL slug: lowercase alphanumerics and hyphens.
pub fn validate_url_slug(value: &str, field: &'static str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && !trimmed.starts_with('-')
        && !trimmed.ends_with('-')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(CoreError::validation(
            field,
            "must be lowercase letters, digits and hyphens".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Format a whole-dollar amount with thousands separators: 12000 → "$12,000".
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PermissionRole, StaffStatus};

    fn member(id: u64, name: &str) -> StaffMember {
        StaffMember {
            id,
            name: name.to_string(),
            role: "Designer".to_string(),
            team: "Brand Design".to_string(),
            utilization: 80.0,
            velocity: 10,
            fpa: 90.0,
            status: StaffStatus::Healthy,
            timezone: "AMER".to_string(),
            email: "x@agency.com".to_string(),
            permission_role: PermissionRole::Member,
        }
    }

    #[test]
    fn test_initials_basic() {
        assert_eq!(initials("Marcus Low").as_deref(), Some("ML"));
        assert_eq!(initials("Sarah Connors").as_deref(), Some("SC"));
    }

    #[test]
    fn test_initials_single_component_is_none() {
        assert_eq!(initials("Cher"), None);
        assert_eq!(initials(""), None);
        assert_eq!(initials("   "), None);
    }

    #[test]
    fn test_initials_uses_first_two_components_only() {
        assert_eq!(initials("Mary Jane Watson").as_deref(), Some("MJ"));
    }

    #[test]
    fn test_find_staff_first_match_wins() {
        let staff = vec![member(1, "Alex Jensen"), member(2, "Amy Jones")];
        let found = find_staff_by_initials(&staff, "AJ").unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_find_staff_skips_unmatchable_names() {
        let staff = vec![member(1, "Cher"), member(2, "Casey Hale")];
        let found = find_staff_by_initials(&staff, "CH").unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_bounded_string_trims_and_bounds() {
        assert_eq!(
            validate_bounded_string("  Acme  ", "name", 1, 10).unwrap(),
            "Acme"
        );
        assert!(validate_bounded_string("", "name", 1, 10).is_err());
        assert!(validate_bounded_string("way too long", "name", 1, 5).is_err());
    }

    #[test]
    fn test_positive_amount_rejects_non_finite() {
        assert!(validate_positive_amount(0.0, "amount").is_err());
        assert!(validate_positive_amount(-4.0, "amount").is_err());
        assert!(validate_positive_amount(f64::NAN, "amount").is_err());
        assert_eq!(validate_positive_amount(12.5, "amount").unwrap(), 12.5);
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("jane.doe@example.com", "email").is_ok());
        assert!(validate_email("not-an-email", "email").is_err());
        assert!(validate_email("@example.com", "email").is_err());
        assert!(validate_email("jane@nodot", "email").is_err());
    }

    #[test]
    fn test_url_slug() {
        assert_eq!(validate_url_slug("agency", "url").unwrap(), "agency");
        assert!(validate_url_slug("My Agency", "url").is_err());
        assert!(validate_url_slug("-agency", "url").is_err());
        assert!(validate_url_slug("", "url").is_err());
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(12000.0), "$12,000");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(-8500.0), "-$8,500");
    }
}
