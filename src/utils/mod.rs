//! 进制转换等小工具

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 把非负整数编码为小写 base36 字符串
pub fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while value > 0 {
        buf.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();

    // 只包含 ASCII 字符
    String::from_utf8(buf).unwrap_or_default()
}

/// 提取 [0,1) 小数的 base36 小数位，最多 `max_digits` 位，去掉尾部的 0。
///
/// 对应 JS `Math.random().toString(36).substring(2, 2 + max_digits)` 的取位方式，
/// 因此结果长度可变，全 0 时可能为空串。
pub fn fraction_base36(fraction: f64, max_digits: usize) -> String {
    let mut f = if (0.0..1.0).contains(&fraction) {
        fraction
    } else {
        0.0
    };
    let mut out = String::with_capacity(max_digits);

    for _ in 0..max_digits {
        f *= 36.0;
        let digit = f as usize;
        out.push(BASE36_ALPHABET[digit.min(35)] as char);
        f -= digit as f64;
    }

    while out.ends_with('0') {
        out.pop();
    }
    out
}

/// base36 字母表中的第 `index` 个字符
pub fn base36_char(index: usize) -> char {
    BASE36_ALPHABET[index % 36] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base36_zero() {
        assert_eq!(encode_base36(0), "0");
    }

    #[test]
    fn test_encode_base36_known_values() {
        assert_eq!(encode_base36(35), "z");
        assert_eq!(encode_base36(36), "10");
        // 1700000000000 毫秒时间戳的 base36 表示
        assert_eq!(encode_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_fraction_base36_half() {
        // 0.5 * 36 = 18 -> 'i'，余数为 0，后续位全部被裁掉
        assert_eq!(fraction_base36(0.5, 13), "i");
    }

    #[test]
    fn test_fraction_base36_zero_is_empty() {
        assert_eq!(fraction_base36(0.0, 13), "");
    }

    #[test]
    fn test_fraction_base36_length_bound() {
        let s = fraction_base36(0.123456789, 13);
        assert!(s.len() <= 13);
        assert!(s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_base36_char_wraps() {
        assert_eq!(base36_char(0), '0');
        assert_eq!(base36_char(35), 'z');
        assert_eq!(base36_char(36), '0');
    }
}
