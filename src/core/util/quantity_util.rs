use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

const BINARY_SUFFIXES: [(&str, f64); 6] = [
    ("Ki", 1024.0),
    ("Mi", 1_048_576.0),
    ("Gi", 1_073_741_824.0),
    ("Ti", 1_099_511_627_776.0),
    ("Pi", 1_125_899_906_842_624.0),
    ("Ei", 1_152_921_504_606_846_976.0),
];

const DECIMAL_SUFFIXES: [(&str, f64); 7] = [
    ("m", 1e-3),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

/// Converts Kubernetes resource quantities into plain integer units.
pub struct QuantityUtil;

impl QuantityUtil {
    /// Parses a CPU quantity (`"250m"`, `"1"`, `"0.5"`, `"1500000n"`) into millicores.
    /// Fractions of a millicore are rounded up.
    pub fn cpu_millicores(raw: &str) -> Option<u64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (number, scale) = if let Some(v) = raw.strip_suffix('n') {
            (v, 1e-6)
        } else if let Some(v) = raw.strip_suffix('u') {
            (v, 1e-3)
        } else if let Some(v) = raw.strip_suffix('m') {
            (v, 1.0)
        } else {
            (raw, 1000.0)
        };

        Self::scaled(number, scale)
    }

    /// Parses a memory quantity (`"128Mi"`, `"1G"`, `"1e3"`, `"512"`) into bytes.
    /// Fractions of a byte are rounded up.
    pub fn memory_bytes(raw: &str) -> Option<u64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        // plain and exponent forms ("1e3", "12E6") parse directly
        if let Some(bytes) = Self::scaled(raw, 1.0) {
            return Some(bytes);
        }

        for (suffix, factor) in BINARY_SUFFIXES {
            if let Some(number) = raw.strip_suffix(suffix) {
                return Self::scaled(number, factor);
            }
        }

        for (suffix, factor) in DECIMAL_SUFFIXES {
            if let Some(number) = raw.strip_suffix(suffix) {
                return Self::scaled(number, factor);
            }
        }

        None
    }

    #[inline]
    pub fn quantity_cpu_millicores(q: &Quantity) -> Option<u64> {
        Self::cpu_millicores(&q.0)
    }

    #[inline]
    pub fn quantity_memory_bytes(q: &Quantity) -> Option<u64> {
        Self::memory_bytes(&q.0)
    }

    fn scaled(number: &str, factor: f64) -> Option<u64> {
        // f64 parsing also accepts "inf"/"nan"; only plain digits are quantities
        if !number.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }

        let value: f64 = number.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        let scaled = value * factor;
        let rounded = scaled.round();
        // absorb float noise such as 0.1 * 1000 = 100.00000000000001
        if (scaled - rounded).abs() < 1e-9 {
            return Some(rounded as u64);
        }

        Some(scaled.ceil() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_quantities_in_all_suffixes() {
        assert_eq!(QuantityUtil::cpu_millicores("250m"), Some(250));
        assert_eq!(QuantityUtil::cpu_millicores("2"), Some(2000));
        assert_eq!(QuantityUtil::cpu_millicores("0.1"), Some(100));
        assert_eq!(QuantityUtil::cpu_millicores("1500000n"), Some(2));
        assert_eq!(QuantityUtil::cpu_millicores("1000000n"), Some(1));
        assert_eq!(QuantityUtil::cpu_millicores("2500u"), Some(3));
        assert_eq!(QuantityUtil::cpu_millicores("0"), Some(0));
    }

    #[test]
    fn memory_quantities_in_all_suffixes() {
        assert_eq!(QuantityUtil::memory_bytes("512"), Some(512));
        assert_eq!(QuantityUtil::memory_bytes("1Ki"), Some(1024));
        assert_eq!(QuantityUtil::memory_bytes("128Mi"), Some(134_217_728));
        assert_eq!(QuantityUtil::memory_bytes("1Gi"), Some(1_073_741_824));
        assert_eq!(QuantityUtil::memory_bytes("1.5Gi"), Some(1_610_612_736));
        assert_eq!(QuantityUtil::memory_bytes("500M"), Some(500_000_000));
        assert_eq!(QuantityUtil::memory_bytes("2k"), Some(2000));
        assert_eq!(QuantityUtil::memory_bytes("1e3"), Some(1000));
        assert_eq!(QuantityUtil::memory_bytes("1E"), Some(1_000_000_000_000_000_000));
        assert_eq!(QuantityUtil::memory_bytes("1500m"), Some(2));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(QuantityUtil::cpu_millicores(""), None);
        assert_eq!(QuantityUtil::cpu_millicores("abc"), None);
        assert_eq!(QuantityUtil::cpu_millicores("-1"), None);
        assert_eq!(QuantityUtil::memory_bytes("12Xi"), None);
        assert_eq!(QuantityUtil::memory_bytes("inf"), None);
        assert_eq!(QuantityUtil::memory_bytes("NaN"), None);
    }

    #[test]
    fn wraps_openapi_quantity() {
        let q = Quantity("64Mi".to_string());
        assert_eq!(QuantityUtil::quantity_memory_bytes(&q), Some(67_108_864));
        assert_eq!(QuantityUtil::quantity_cpu_millicores(&Quantity("1".into())), Some(1000));
    }
}
