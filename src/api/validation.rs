use super::ApiError;

pub fn validate_film_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid film ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_title(title: &str) -> Result<&str, ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Title cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_film_id() {
        assert!(validate_film_id(1).is_ok());
        assert!(validate_film_id(12345).is_ok());
        assert!(validate_film_id(0).is_err());
        assert!(validate_film_id(-1).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("Alien").unwrap(), "Alien");
        assert_eq!(validate_title("  trimmed  ").unwrap(), "trimmed");
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }
}
