use crate::error::Result;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Create the directory a file will be written into
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Format a dollar amount for display, rounded to cents with thousands separators
pub fn format_cost(cost: f64) -> String {
    let formatted = format!("{:.2}", cost.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cost < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Plain number with thousands separators, for quantities like GB-seconds
pub fn format_quantity(value: f64) -> String {
    let cost = format_cost(value);
    let trimmed = cost.replacen('$', "", 1);
    trimmed
        .strip_suffix(".00")
        .map(str::to_string)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(0.0), "$0.00");
        assert_eq!(format_cost(6.89), "$6.89");
        assert_eq!(format_cost(3.53334), "$3.53");
        assert_eq!(format_cost(1234.5), "$1,234.50");
        assert_eq!(format_cost(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_cost(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_cost_negative() {
        assert_eq!(format_cost(-12.5), "-$12.50");
        assert_eq!(format_cost(-0.001), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(25.0), "25.0%");
        assert_eq!(format_percentage(19.987), "20.0%");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(200_000.0), "200,000");
        assert_eq!(format_quantity(1234.5), "1,234.50");
    }

    #[test]
    fn test_ensure_parent_dir() {
        use tempfile::TempDir;
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a").join("b").join("out.json");

        assert!(ensure_parent_dir(&file).is_ok());
        assert!(file.parent().unwrap().is_dir());
        assert!(ensure_parent_dir(Path::new("relative.json")).is_ok());
    }
}
