//! Field rules shared by the services. Each returns the normalised value.
use crate::services::error::DomainError;

const TITLE_MAX: usize = 255;
const DESCRIPTION_MAX: usize = 2000;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

pub fn title(raw: &str) -> Result<String, DomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::InvalidInput("title is required"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(DomainError::InvalidInput("title must be <= 255 chars"));
    }
    Ok(title.to_string())
}

// Blank descriptions are stored as NULL.
pub fn description(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(description) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(DomainError::InvalidInput("description must be <= 2000 chars"));
    }
    Ok(Some(description.to_string()))
}

pub fn name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("name is required"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(DomainError::InvalidInput("name must be <= 100 chars"));
    }
    Ok(name.to_string())
}

pub fn email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_ascii_lowercase();
    if email.len() > EMAIL_MAX {
        return Err(DomainError::InvalidInput("email must be <= 255 chars"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(DomainError::InvalidInput("email is invalid")),
    }
}

pub fn password(raw: &str) -> Result<(), DomainError> {
    let len = raw.chars().count();
    if len < PASSWORD_MIN {
        return Err(DomainError::InvalidInput("password must be at least 8 chars"));
    }
    if len > PASSWORD_MAX {
        return Err(DomainError::InvalidInput("password must be <= 128 chars"));
    }
    Ok(())
}

pub fn id(raw: i64) -> Result<i64, DomainError> {
    if raw <= 0 {
        return Err(DomainError::InvalidInput("id must be positive"));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_bounded() {
        assert_eq!(title("  buy milk ").unwrap(), "buy milk");
        assert!(title("   ").is_err());
        assert!(title(&"x".repeat(256)).is_err());
        assert!(title(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(description(None).unwrap(), None);
        assert_eq!(description(Some("  ")).unwrap(), None);
        assert_eq!(description(Some(" 2% ")).unwrap().as_deref(), Some("2%"));
        assert!(description(Some(&"d".repeat(2001))).is_err());
    }

    #[test]
    fn email_is_normalised() {
        assert_eq!(email(" Alice@Example.COM ").unwrap(), "alice@example.com");
        for bad in ["", "alice", "@example.com", "alice@", "a@b@c"] {
            assert!(email(bad).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(password("short").is_err());
        assert!(password("long enough").is_ok());
        assert!(password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(id(0).is_err());
        assert!(id(-3).is_err());
        assert_eq!(id(9).unwrap(), 9);
    }
}
