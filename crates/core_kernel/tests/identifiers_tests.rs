//! Unit tests for the identifiers module
//!
//! Covers parsing of path segments, display, and integer conversion.

use core_kernel::FundId;
use proptest::prelude::*;

mod fund_id_tests {
    use super::*;

    #[test]
    fn test_new_and_value() {
        let id = FundId::new(7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_display_is_plain_integer() {
        assert_eq!(format!("{}", FundId::new(1234)), "1234");
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        let id: FundId = " 9 ".parse().unwrap();
        assert_eq!(id, FundId::new(9));
    }

    #[test]
    fn test_from_str_rejects_text() {
        let err = "abc".parse::<FundId>().unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_i64_conversion() {
        let id = FundId::from(55);
        let back: i64 = id.into();
        assert_eq!(back, 55);
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&FundId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_ordering_follows_integer() {
        assert!(FundId::new(2) < FundId::new(10));
    }
}

proptest! {
    #[test]
    fn prop_positive_ids_parse_back(n in 1i64..i64::MAX) {
        let parsed: FundId = n.to_string().parse().unwrap();
        prop_assert_eq!(parsed.value(), n);
    }
}
