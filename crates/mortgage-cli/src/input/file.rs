use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Input document formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml` / `.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Read a JSON or YAML loan file and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    log::debug!("reading loan input from {}", canonical.display());
    parse(&contents, InputFormat::from_path(&canonical))
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

/// Parse a document in the given format.
pub fn parse<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

/// Resolve the path relative to the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::amortization::analysis::AmortizationInput;
    use mortgage_core::TermUnit;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("loan.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("loan.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("loan.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("loan")), InputFormat::Json);
    }

    #[test]
    fn test_parse_yaml_loan() {
        let doc = "principal: 100005\nannual_rate_percent: 6.0\nterm: 4\nterm_unit: months\n";
        let inp: AmortizationInput = parse(doc, InputFormat::Yaml).unwrap();
        assert_eq!(inp.loan.principal, dec!(100005));
        assert_eq!(inp.loan.term_unit, TermUnit::Months);
        assert_eq!(inp.monthly_payment, None);
    }

    #[test]
    fn test_parse_json_loan() {
        let doc = r#"{"principal": "100000", "annual_rate_percent": "6.0", "term": 5}"#;
        let inp: AmortizationInput = parse(doc, InputFormat::Json).unwrap();
        assert_eq!(inp.loan.term_months(), 60);
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<AmortizationInput>("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
