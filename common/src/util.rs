/// Formats a fraction the way it is written in a config or on the command line: integral values
/// keep a trailing `.0` so `0.0` stays `0.0` rather than `0`, and values with a decimal exponent
/// below -4 or from 16 up use exponent notation with a signed two-digit exponent (`1e-05`).
pub fn format_fraction(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return value.to_string();
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e')
        && let Ok(exponent) = exponent.parse::<i32>()
        && !(-4..16).contains(&exponent)
    {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_keep_decimal_point() {
        assert_eq!(format_fraction(0.0), "0.0");
        assert_eq!(format_fraction(1.0), "1.0");
        assert_eq!(format_fraction(0.02), "0.02");
        assert_eq!(format_fraction(0.1), "0.1");
        assert_eq!(format_fraction(0.3), "0.3");
        assert_eq!(format_fraction(0.0001), "0.0001");
        assert_eq!(format_fraction(1e15), "1000000000000000.0");
    }

    #[test]
    fn exponent_range_uses_exponent_notation() {
        assert_eq!(format_fraction(1e-5), "1e-05");
        assert_eq!(format_fraction(1.5e-7), "1.5e-07");
        assert_eq!(format_fraction(1e16), "1e+16");
        assert_eq!(format_fraction(2.5e-123), "2.5e-123");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_fraction(f64::NAN), "nan");
        assert_eq!(format_fraction(f64::INFINITY), "inf");
        assert_eq!(format_fraction(f64::NEG_INFINITY), "-inf");
    }
}
