//! Unit tests for catalog error types

#[cfg(test)]
mod tests {
    use crate::catalog::error::CatalogError;
    use std::error::Error;

    #[test]
    fn test_not_found_error() {
        let error = CatalogError::NotFound("drill-7".to_string());
        assert_eq!(error.to_string(), "Drill not found: drill-7");
    }

    #[test]
    fn test_invalid_record_error() {
        let error = CatalogError::InvalidRecord("missing id".to_string());
        assert_eq!(error.to_string(), "Invalid drill record: missing id");
    }

    #[test]
    fn test_parse_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: CatalogError = json_err.into();
        assert!(matches!(error, CatalogError::Parse(_)));
        assert!(error.to_string().starts_with("Failed to parse catalog"));
    }

    #[test]
    fn test_io_error_has_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = CatalogError::from(io);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("no such file"));
    }

    #[test]
    fn test_error_debug() {
        let error = CatalogError::Parse("unexpected token".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("Parse"));
        assert!(debug.contains("unexpected token"));
    }
}
