//! CNPJ (Brazilian company tax registration) utilities
//!
//! A CNPJ has 14 digits: an 8-digit root, a 4-digit branch number and two
//! check digits. It is written either bare (`12345678000195`) or punctuated
//! (`12.345.678/0001-95`).
//!
//! Each check digit is a mod-11 sum over the preceding digits with weights
//! cycling down to 2 and wrapping to 9: the first digit uses weights starting
//! at 5, the second at 6. A remainder below 2 yields 0, otherwise the digit is
//! `11 - remainder`.

/// Number of digits in a CNPJ
pub const CNPJ_DIGITS: usize = 14;

/// Strips everything but ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true if the value is written in an accepted CNPJ layout
///
/// Accepted layouts are 14 bare digits or `00.000.000/0000-00`. Check digits
/// are not verified here; see [`is_valid`].
pub fn has_valid_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        14 => bytes.iter().all(u8::is_ascii_digit),
        18 => bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 6 => *b == b'.',
            10 => *b == b'/',
            15 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        _ => false,
    }
}

fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let mut weight = first_weight;
    let mut sum = 0;
    for digit in digits {
        sum += digit * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }

    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Verifies layout, repeated-digit sequences and both check digits
///
/// # Example
///
/// ```rust
/// use domain_fund::cnpj;
///
/// assert!(cnpj::is_valid("11.222.333/0001-81"));
/// assert!(cnpj::is_valid("11222333000181"));
/// assert!(!cnpj::is_valid("11.222.333/0001-82"));
/// assert!(!cnpj::is_valid("00000000000000"));
/// ```
pub fn is_valid(value: &str) -> bool {
    let value = value.trim();
    if !has_valid_format(value) {
        return false;
    }

    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CNPJ_DIGITS || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    digits[12] == check_digit(&digits[..12], 5) && digits[13] == check_digit(&digits[..13], 6)
}

/// Appends both check digits to a 12-digit base
///
/// Returns the bare 14-digit form. Entries above 9 are not digits and make
/// the result shorter than [`CNPJ_DIGITS`].
///
/// # Example
///
/// ```rust
/// use domain_fund::cnpj;
///
/// assert_eq!(cnpj::complete([1, 1, 2, 2, 2, 3, 3, 3, 0, 0, 0, 1]), "11222333000181");
/// ```
pub fn complete(base: [u32; 12]) -> String {
    let mut digits = base.to_vec();
    digits.push(check_digit(&digits, 5));
    digits.push(check_digit(&digits, 6));
    digits.iter().filter_map(|d| char::from_digit(*d, 10)).collect()
}

/// Formats a CNPJ as `00.000.000/0000-00`
///
/// Returns `None` unless the value holds exactly 14 digits.
pub fn format(value: &str) -> Option<String> {
    let d = digits_only(value);
    if d.len() != CNPJ_DIGITS {
        return None;
    }

    Some(format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    ))
}
